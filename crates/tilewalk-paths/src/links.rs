//! Precomputed neighbor links with corner-cutting rules.
//!
//! Every cell carries up to 8 directed edges to its grid neighbors,
//! rebuilt wholesale by [`PathGrid::build_links`]. Blocked neighbors
//! keep their edge at a sentinel cost instead of losing it, so the
//! search graph stays fully connected and "forbidden" is just "too
//! expensive to ever win".

use tilewalk_core::Point;

use crate::pathgrid::PathGrid;

/// Cost multiplier for cardinal (same row or column) moves.
pub const CARDINAL_COST: i32 = 2;
/// Cost multiplier for diagonal moves.
pub const DIAGONAL_COST: i32 = 3;

/// A directed edge to one of a cell's 8 grid neighbors. `None` slots
/// only occur for neighbors clipped away at the grid border.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) to: usize,
    pub(crate) cost: i32,
}

impl PathGrid {
    /// (Re)build the neighbor link table for every cell.
    ///
    /// Must run at least once before a search uses graph edges, and
    /// again after any terrain change that should affect routing.
    ///
    /// Per neighbor: the base cost is the neighbor's terrain cost (1 if
    /// zero), forced to the sentinel `width * height * 3` when the
    /// neighbor is not walkable. Diagonal moves also force the sentinel
    /// when either orthogonal cell adjacent to both endpoints is not
    /// walkable, so routes cannot cut through a blocked corner. The
    /// stored cost is the base times [`CARDINAL_COST`] or
    /// [`DIAGONAL_COST`].
    pub fn build_links(&mut self) {
        let w = self.terrain.width();
        let h = self.terrain.height();
        for i in 0..self.links.len() {
            let p = self.terrain.point(i);
            let mut slots = [None; 8];
            let mut slot = 0;
            for x in (p.x - 1).max(0)..=(p.x + 1).min(w - 1) {
                for y in (p.y - 1).max(0)..=(p.y + 1).min(h - 1) {
                    let t = Point::new(x, y);
                    if t == p {
                        continue;
                    }
                    let Some(ti) = self.terrain.idx(t) else {
                        continue;
                    };
                    let tile = self.terrain.at(t);
                    let mut base = if tile.cost != 0 { tile.cost } else { 1 };
                    if !self.terrain.is_walkable(t) {
                        base = self.block_cost;
                    }
                    let mult = if x != p.x && y != p.y {
                        if !self.terrain.is_walkable(Point::new(p.x, y))
                            || !self.terrain.is_walkable(Point::new(x, p.y))
                        {
                            base = self.block_cost;
                        }
                        DIAGONAL_COST
                    } else {
                        CARDINAL_COST
                    };
                    slots[slot] = Some(Link {
                        to: ti,
                        cost: mult * base,
                    });
                    slot += 1;
                }
            }
            self.links[i] = slots;
        }
        log::trace!("rebuilt links for {w}x{h} grid");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_cost(grid: &PathGrid, from: Point, to: Point) -> Option<i32> {
        let fi = grid.terrain.idx(from).unwrap();
        let ti = grid.terrain.idx(to).unwrap();
        grid.links[fi]
            .iter()
            .flatten()
            .find(|l| l.to == ti)
            .map(|l| l.cost)
    }

    #[test]
    fn center_cell_links_all_eight_neighbors_x_major() {
        let mut grid = PathGrid::new(3, 3);
        grid.build_links();
        let center = grid.terrain.idx(Point::new(1, 1)).unwrap();
        let targets: Vec<Point> = grid.links[center]
            .iter()
            .flatten()
            .map(|l| grid.terrain.point(l.to))
            .collect();
        let expected: Vec<Point> = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ]
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect();
        assert_eq!(targets, expected);
    }

    #[test]
    fn border_cells_have_clipped_links() {
        let mut grid = PathGrid::new(3, 3);
        grid.build_links();
        let corner = grid.terrain.idx(Point::new(0, 0)).unwrap();
        let edge = grid.terrain.idx(Point::new(1, 0)).unwrap();
        assert_eq!(grid.links[corner].iter().flatten().count(), 3);
        assert_eq!(grid.links[edge].iter().flatten().count(), 5);
    }

    #[test]
    fn cardinal_and_diagonal_multipliers() {
        let mut grid = PathGrid::new(3, 3);
        grid.build_links();
        let c = Point::new(1, 1);
        assert_eq!(link_cost(&grid, c, Point::new(1, 0)), Some(CARDINAL_COST));
        assert_eq!(link_cost(&grid, c, Point::new(2, 1)), Some(CARDINAL_COST));
        assert_eq!(link_cost(&grid, c, Point::new(0, 0)), Some(DIAGONAL_COST));
        assert_eq!(link_cost(&grid, c, Point::new(2, 2)), Some(DIAGONAL_COST));
    }

    #[test]
    fn terrain_cost_scales_links_and_zero_reads_as_one() {
        let mut grid = PathGrid::new(3, 3);
        grid.set_cell(Point::new(2, 1), 5, false).unwrap();
        grid.build_links();
        let c = Point::new(1, 1);
        // Costed neighbor: multiplier times terrain cost.
        assert_eq!(link_cost(&grid, c, Point::new(2, 1)), Some(2 * 5));
        assert_eq!(link_cost(&grid, Point::new(1, 0), Point::new(2, 1)), Some(3 * 5));
        // Zero-cost neighbor behaves as cost 1.
        assert_eq!(link_cost(&grid, c, Point::new(0, 1)), Some(2));
    }

    #[test]
    fn blocked_neighbor_keeps_link_at_sentinel_cost() {
        let mut grid = PathGrid::new(3, 3);
        grid.set_cell(Point::new(1, 0), 0, true).unwrap();
        grid.build_links();
        let sentinel = 3 * 3 * 3;
        assert_eq!(
            link_cost(&grid, Point::new(0, 0), Point::new(1, 0)),
            Some(CARDINAL_COST * sentinel)
        );
        assert_eq!(
            link_cost(&grid, Point::new(0, 1), Point::new(1, 0)),
            Some(DIAGONAL_COST * sentinel)
        );
    }

    #[test]
    fn diagonal_past_blocked_corner_costs_sentinel() {
        let mut grid = PathGrid::new(3, 3);
        grid.set_cell(Point::new(1, 0), 0, true).unwrap();
        grid.build_links();
        let sentinel = 3 * 3 * 3;
        // (0,0) -> (1,1): the target is walkable, but the corner cell
        // (1,0) is not, so the diagonal is priced out.
        assert_eq!(
            link_cost(&grid, Point::new(0, 0), Point::new(1, 1)),
            Some(DIAGONAL_COST * sentinel)
        );
        // The unrelated diagonal stays cheap.
        assert_eq!(
            link_cost(&grid, Point::new(1, 1), Point::new(2, 2)),
            Some(DIAGONAL_COST)
        );
    }

    #[test]
    fn rebuild_is_idempotent() {
        let mut grid = PathGrid::new(4, 4);
        grid.set_cell(Point::new(1, 2), 3, false).unwrap();
        grid.set_cell(Point::new(2, 2), 0, true).unwrap();
        grid.build_links();
        let first = grid.links.clone();
        grid.build_links();
        assert_eq!(grid.links, first);
    }

    #[test]
    fn rebuild_reflects_terrain_changes() {
        let mut grid = PathGrid::new(3, 3);
        grid.build_links();
        let before = link_cost(&grid, Point::new(0, 1), Point::new(1, 1)).unwrap();
        grid.set_cell(Point::new(1, 1), 0, true).unwrap();
        // Not rebuilt yet: the old cost is still in the table.
        assert_eq!(link_cost(&grid, Point::new(0, 1), Point::new(1, 1)), Some(before));
        grid.build_links();
        assert_eq!(
            link_cost(&grid, Point::new(0, 1), Point::new(1, 1)),
            Some(CARDINAL_COST * 27)
        );
    }
}
