//! The [`TerrainGrid`] type, a dense 2D grid of [`Tile`]s.
//!
//! A `TerrainGrid` stores the routing-relevant attributes of every cell:
//! a movement cost weight and a blocked flag. It knows nothing about
//! searches; the `tilewalk-paths` crate layers its scratch state on top
//! using the same flat indices.

use std::fmt;

use crate::geom::Point;

/// Terrain attributes of one grid cell.
///
/// A `cost` of zero is read as cost 1 by the link builder, so
/// zero-initialized grids behave as uniform unit-cost terrain.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    /// Non-negative movement cost weight of entering this cell.
    pub cost: i32,
    /// Whether the cell cannot be walked through.
    pub blocked: bool,
}

impl Tile {
    /// A walkable tile with the given cost.
    #[inline]
    pub const fn floor(cost: i32) -> Self {
        Self {
            cost,
            blocked: false,
        }
    }

    /// A blocked tile.
    #[inline]
    pub const fn wall() -> Self {
        Self {
            cost: 0,
            blocked: true,
        }
    }
}

/// Error returned when a coordinate lies outside a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OutOfBounds(pub Point);

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "point {} is outside the grid", self.0)
    }
}

impl std::error::Error for OutOfBounds {}

// ---------------------------------------------------------------------------
// TerrainGrid
// ---------------------------------------------------------------------------

/// A dense row-major grid of [`Tile`]s with fixed dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TerrainGrid {
    /// Create a new grid of the given dimensions, filled with default
    /// (walkable, zero-cost) tiles. Negative dimensions are clamped to 0.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0);
        let h = height.max(0);
        Self {
            width: w,
            height: h,
            tiles: vec![Tile::default(); (w as usize) * (h as usize)],
        }
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.width as usize) + (p.x as usize))
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Read the tile at `p`. Returns `Tile::default()` if `p` is outside
    /// the grid.
    #[inline]
    pub fn at(&self, p: Point) -> Tile {
        self.idx(p).map(|i| self.tiles[i]).unwrap_or_default()
    }

    /// Set the tile at `p`.
    ///
    /// Out-of-range coordinates are reported as [`OutOfBounds`] rather
    /// than ignored. Changes only affect routing after the link table is
    /// rebuilt.
    pub fn set(&mut self, p: Point, tile: Tile) -> Result<(), OutOfBounds> {
        match self.idx(p) {
            Some(i) => {
                self.tiles[i] = tile;
                Ok(())
            }
            None => Err(OutOfBounds(p)),
        }
    }

    /// Fill every cell with `tile`.
    pub fn fill(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    /// Whether `p` is inside the grid and not blocked.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        match self.idx(p) {
            Some(i) => !self.tiles[i].blocked,
            None => false,
        }
    }
}
