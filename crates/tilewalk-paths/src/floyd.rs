//! Floyd-style smoothing of the reconstructed waypoint chain.

use crate::pathgrid::{NO_PARENT, PathGrid};

impl PathGrid {
    /// Smooth the current path in place and return its new length.
    ///
    /// Pass 1 collapses runs of identical step direction by rewriting
    /// the forward links. Pass 2 repeatedly anchors at the list tail
    /// and relinks the earliest waypoint with clear line of sight
    /// straight to the anchor, dropping everything between; it stops
    /// once the anchor reaches the front of the list.
    pub(crate) fn floyd(&mut self) -> usize {
        let Some(head) = self.path_head else {
            return 0;
        };

        // Pass 1: collinear compaction.
        let mut p = head;
        let mut p2 = self.nodes[p].parent;
        let mut tail = p2;
        if p2 != NO_PARENT && self.nodes[p2].parent != NO_PARENT {
            let mut p3 = self.nodes[p2].parent;
            let mut dir = self.terrain.point(p) - self.terrain.point(p2);
            while p3 != NO_PARENT {
                let step = self.terrain.point(p2) - self.terrain.point(p3);
                if step == dir {
                    self.nodes[p].parent = p3;
                } else {
                    dir = step;
                    p = p2;
                }
                p2 = self.nodes[p].parent;
                p3 = if p2 == NO_PARENT {
                    NO_PARENT
                } else {
                    self.nodes[p2].parent
                };
            }
            tail = p2;
        }

        // Pass 2: greedy line-of-sight shortcuts, anchored at the tail.
        while tail != NO_PARENT && head != tail && self.nodes[head].parent != tail {
            let mut q = head;
            while self.nodes[q].parent != tail {
                let qp = self.terrain.point(q);
                let tp = self.terrain.point(tail);
                if self.line_of_sight(qp, tp) {
                    break;
                }
                q = self.nodes[q].parent;
            }
            self.nodes[q].parent = tail;
            tail = q;
        }

        // Count the surviving chain.
        let mut n = 0;
        let mut cur = head;
        while cur != NO_PARENT {
            n += 1;
            cur = self.nodes[cur].parent;
        }
        n
    }
}
