//! Epoch-stamped A* over the precomputed link table.

use crate::distance::octile;
use crate::pathgrid::{NO_PARENT, OpenRef, PathGrid};

impl PathGrid {
    /// Run A* from `start` to `goal` (flat indices, distinct, in
    /// range). On success the `goal` node's parent chain leads back to
    /// `start`.
    ///
    /// Both epoch counters bump on entry, which invalidates every
    /// cell's scratch from earlier searches without touching it; on
    /// return the heap and the stamps are simply left behind, harmless
    /// for the same reason. The caller clears the open heap between
    /// searches.
    pub(crate) fn search(&mut self, start: usize, goal: usize) -> bool {
        self.closed_gen = self.closed_gen.wrapping_add(1);
        self.open_gen = self.open_gen.wrapping_add(1);

        let start_p = self.terrain.point(start);
        let goal_p = self.terrain.point(goal);
        {
            let n = &mut self.nodes[start];
            n.g = 0;
            n.h = octile(start_p, goal_p);
            n.parent = NO_PARENT;
            n.open_gen = self.open_gen;
        }
        self.nodes[goal].parent = NO_PARENT;
        self.open.push(OpenRef {
            idx: start,
            f: self.nodes[start].g + self.nodes[start].h,
        });

        while let Some(cur) = self.open.pop() {
            let ci = cur.idx;
            if ci == goal {
                return true;
            }
            self.nodes[ci].closed_gen = self.closed_gen;
            let cg = self.nodes[ci].g;
            let links = self.links[ci];
            for link in links.into_iter().flatten() {
                let ti = link.to;
                if self.nodes[ti].closed_gen == self.closed_gen {
                    continue;
                }
                let g = cg + link.cost;
                let h = octile(self.terrain.point(ti), goal_p);
                if self.nodes[ti].open_gen != self.open_gen {
                    let n = &mut self.nodes[ti];
                    n.g = g;
                    n.h = h;
                    n.parent = ci;
                    n.open_gen = self.open_gen;
                    self.open.push(OpenRef { idx: ti, f: g + h });
                } else if g + h < self.nodes[ti].g + self.nodes[ti].h {
                    let n = &mut self.nodes[ti];
                    n.g = g;
                    n.h = h;
                    n.parent = ci;
                    self.open.update(OpenRef { idx: ti, f: g + h });
                }
            }
        }
        false
    }
}
