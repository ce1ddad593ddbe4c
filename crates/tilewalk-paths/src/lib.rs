//! Pathfinding on weighted, 8-connected 2D grids.
//!
//! This crate computes walking paths across a grid of weighted,
//! optionally blocked cells, and optionally smooths the result:
//!
//! - **Precomputed links** with corner-cutting rules, up to 8 per cell
//!   ([`PathGrid::build_links`])
//! - **Epoch-stamped A\***: repeated searches reuse all storage, with
//!   generation counters instead of per-search clears
//! - **Line-of-sight shortcut**: a clear Bresenham line bypasses the
//!   search entirely ([`PathGrid::line_of_sight`])
//! - **Floyd-style smoothing**: collinear compaction plus greedy
//!   line-of-sight shortcuts over the finished path
//! - **Indexable heap** ([`IndexHeap`]) driving the frontier, with
//!   in-place updates, removal and membership tests
//!
//! Everything operates through [`PathGrid`], which owns the terrain
//! (from `tilewalk-core`) together with every per-search cache.

mod astar;
mod bresenham;
mod distance;
mod floyd;
mod heap;
mod links;
mod pathgrid;

pub use distance::octile;
pub use heap::IndexHeap;
pub use links::{CARDINAL_COST, DIAGONAL_COST};
pub use pathgrid::{PathGrid, Waypoints};
