//! The [`PathGrid`] facade: terrain plus everything a search needs.

use tilewalk_core::{OutOfBounds, Point, TerrainGrid, Tile};

use crate::heap::IndexHeap;
use crate::links::Link;

/// Sentinel index meaning "no predecessor / end of path".
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Search scratch
// ---------------------------------------------------------------------------

/// Per-cell search scratch. Cells are never cleared between searches;
/// the epoch stamps are compared against the grid's current counters
/// instead, so stale values from earlier searches are simply ignored.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    /// Best-known predecessor during a search; after path
    /// reconstruction the same field holds the forward "next waypoint"
    /// link, exactly as in the search it was rebuilt from.
    pub(crate) parent: usize,
    pub(crate) open_gen: u32,
    pub(crate) closed_gen: u32,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            parent: NO_PARENT,
            open_gen: 0,
            closed_gen: 0,
        }
    }
}

/// Open-list entry: a cell index carrying its cached `f = g + h` key.
/// Identity is the cell index alone, so a key change still finds the
/// same entry.
#[derive(Copy, Clone, Debug)]
pub(crate) struct OpenRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
}

impl PartialEq for OpenRef {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx
    }
}

impl Eq for OpenRef {}

pub(crate) fn f_before(a: &OpenRef, b: &OpenRef) -> bool {
    a.f < b.f
}

// ---------------------------------------------------------------------------
// PathGrid
// ---------------------------------------------------------------------------

/// A pathfinding grid: terrain, precomputed neighbor links, per-cell
/// search scratch, the open-list heap and the current result path.
///
/// All state is instance-scoped and all mutation takes `&mut self`;
/// independent grids can be used from independent threads, a single
/// grid cannot be shared.
///
/// Typical use:
///
/// ```
/// use tilewalk_core::Point;
/// use tilewalk_paths::PathGrid;
///
/// let mut grid = PathGrid::new(16, 16);
/// grid.set_cell(Point::new(5, 5), 0, true).unwrap();
/// grid.build_links();
/// let count = grid.find_path(Point::new(1, 1), Point::new(12, 9), true);
/// assert!(count > 0);
/// while let Some(step) = grid.next_waypoint() {
///     let _ = step;
/// }
/// ```
pub struct PathGrid {
    pub(crate) terrain: TerrainGrid,
    pub(crate) nodes: Vec<Node>,
    pub(crate) links: Vec<[Option<Link>; 8]>,
    pub(crate) open: IndexHeap<OpenRef>,
    pub(crate) open_gen: u32,
    pub(crate) closed_gen: u32,
    pub(crate) path_head: Option<usize>,
    /// Base cost assigned to links into non-walkable or corner-cut
    /// neighbors: `width * height * 3`, larger than any real route.
    pub(crate) block_cost: i32,
}

impl PathGrid {
    /// Create a grid of the given dimensions with zero-initialized
    /// (walkable, unit-cost) cells. Call
    /// [`build_links`](PathGrid::build_links) after terrain setup and
    /// before the first search.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_terrain(TerrainGrid::new(width, height))
    }

    /// Adopt an existing terrain grid. The link table is built eagerly,
    /// so the returned grid is immediately searchable.
    pub fn from_terrain(terrain: TerrainGrid) -> Self {
        let mut grid = Self::with_terrain(terrain);
        grid.build_links();
        grid
    }

    fn with_terrain(terrain: TerrainGrid) -> Self {
        let len = terrain.len();
        Self {
            nodes: vec![Node::default(); len],
            links: vec![[None; 8]; len],
            open: IndexHeap::with_capacity(16, f_before),
            open_gen: 0,
            closed_gen: 0,
            path_head: None,
            block_cost: terrain.width() * terrain.height() * 3,
            terrain,
        }
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.terrain.width()
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.terrain.height()
    }

    /// The underlying terrain.
    #[inline]
    pub fn terrain(&self) -> &TerrainGrid {
        &self.terrain
    }

    /// Mutable terrain access. Changes only affect routing after
    /// [`build_links`](PathGrid::build_links) runs again.
    #[inline]
    pub fn terrain_mut(&mut self) -> &mut TerrainGrid {
        &mut self.terrain
    }

    /// Whether `p` is inside the grid and not blocked.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.terrain.is_walkable(p)
    }

    /// Set one cell's terrain cost and blocked flag. Out-of-range
    /// coordinates are reported, not ignored. Takes effect on routing
    /// at the next [`build_links`](PathGrid::build_links).
    pub fn set_cell(&mut self, p: Point, cost: i32, blocked: bool) -> Result<(), OutOfBounds> {
        self.terrain.set(p, Tile { cost, blocked })
    }

    /// Find a path from `from` to `to` and return its waypoint count.
    ///
    /// Returns 0 for out-of-range endpoints, identical endpoints, or no
    /// path; the three cases are not distinguished. A clear line of
    /// sight short-circuits the search with the direct two-waypoint
    /// path. With `smooth`, the raw path is compacted by
    /// Floyd-style smoothing before counting.
    ///
    /// The resulting path is consumed with
    /// [`next_waypoint`](PathGrid::next_waypoint) and replaced by the
    /// next `find_path` call.
    pub fn find_path(&mut self, from: Point, to: Point, smooth: bool) -> usize {
        self.path_head = None;
        let (Some(s), Some(e)) = (self.terrain.idx(from), self.terrain.idx(to)) else {
            return 0;
        };
        if s == e {
            return 0;
        }
        self.open.clear();
        if self.line_of_sight(from, to) {
            self.nodes[e].parent = s;
            self.nodes[s].parent = NO_PARENT;
        } else if !self.search(s, e) {
            log::debug!("no path from {from} to {to}");
            return 0;
        }

        // Reverse the parent chain into a forward list. A cell that is
        // no longer walkable wipes everything gathered so far: a stale
        // block invalidates the whole route behind it.
        let mut head = NO_PARENT;
        let mut count = 0;
        let mut cur = e;
        while cur != NO_PARENT {
            let back = self.nodes[cur].parent;
            if self.terrain.is_walkable(self.terrain.point(cur)) {
                self.nodes[cur].parent = head;
                head = cur;
                count += 1;
            } else {
                self.nodes[cur].parent = NO_PARENT;
                head = NO_PARENT;
                count = 0;
            }
            cur = back;
        }
        if head == NO_PARENT {
            return 0;
        }
        self.path_head = Some(head);
        if smooth { self.floyd() } else { count }
    }

    /// Pop the next waypoint of the current path, front to back, or
    /// `None` once the path is exhausted.
    pub fn next_waypoint(&mut self) -> Option<Point> {
        let head = self.path_head?;
        let next = self.nodes[head].parent;
        self.path_head = (next != NO_PARENT).then_some(next);
        Some(self.terrain.point(head))
    }

    /// Iterate over the remaining waypoints without consuming them.
    pub fn waypoints(&self) -> Waypoints<'_> {
        Waypoints {
            grid: self,
            cur: self.path_head,
        }
    }
}

/// Iterator over the remaining waypoints of a [`PathGrid`]'s current
/// path. See [`PathGrid::waypoints`].
pub struct Waypoints<'a> {
    grid: &'a PathGrid,
    cur: Option<usize>,
}

impl Iterator for Waypoints<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let i = self.cur?;
        let next = self.grid.nodes[i].parent;
        self.cur = (next != NO_PARENT).then_some(next);
        Some(self.grid.terrain.point(i))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathGrid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.terrain.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathGrid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let terrain = TerrainGrid::deserialize(deserializer)?;
        Ok(PathGrid::from_terrain(terrain))
    }
}
