//! **tilewalk-core**: terrain model and geometry for the *tilewalk*
//! pathfinding crates.
//!
//! This crate provides the foundational types used across the *tilewalk*
//! workspace: the [`Point`] geometry primitive and the [`TerrainGrid`]
//! holding per-cell movement cost and blocked flags.

pub mod geom;
pub mod grid;

pub use geom::Point;
pub use grid::{OutOfBounds, TerrainGrid, Tile};
