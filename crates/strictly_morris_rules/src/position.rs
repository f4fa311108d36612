//! Position index space and adjacency for concentric square rings.
//!
//! A board with `N` rings has `8N` positions. Position `p` sits on ring
//! `p / 8` (ring 0 is the outermost) at slot `p % 8`. Slots run clockwise
//! from the top midpoint:
//!
//! ```text
//!   7 0 1
//!   6   2
//!   5 4 3
//! ```
//!
//! Even slots are midpoints and connect to the midpoint at the same slot
//! on the neighboring rings. Odd slots are corners and only connect along
//! their own ring.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of positions on one ring.
pub const RING_SIZE: usize = 8;

/// Geometry of a board with a fixed number of rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layout {
    rings: usize,
}

impl Layout {
    /// Creates a layout with `rings` concentric rings.
    pub fn new(rings: usize) -> Self {
        Self { rings }
    }

    /// Number of rings.
    pub fn rings(&self) -> usize {
        self.rings
    }

    /// Total number of positions.
    pub fn len(&self) -> usize {
        self.rings * RING_SIZE
    }

    /// Returns true for a layout without rings.
    pub fn is_empty(&self) -> bool {
        self.rings == 0
    }

    /// Returns true if `position` is a valid index.
    pub fn contains(&self, position: usize) -> bool {
        position < self.len()
    }

    /// Iterates over all positions in index order.
    pub fn positions(&self) -> std::ops::Range<usize> {
        0..self.len()
    }

    /// Iterates over midpoint positions in index order.
    pub fn midpoints(&self) -> impl Iterator<Item = usize> {
        self.positions().step_by(2)
    }

    /// Iterates over corner positions in index order.
    pub fn corners(&self) -> impl Iterator<Item = usize> {
        self.positions().skip(1).step_by(2)
    }

    /// Ring containing `position`.
    pub fn ring(position: usize) -> usize {
        position / RING_SIZE
    }

    /// Slot of `position` within its ring.
    pub fn slot(position: usize) -> usize {
        position % RING_SIZE
    }

    /// Returns true for odd slots.
    pub fn is_corner(position: usize) -> bool {
        Self::slot(position) % 2 == 1
    }

    /// Returns true for even slots (spoke points).
    pub fn is_midpoint(position: usize) -> bool {
        !Self::is_corner(position)
    }

    /// Clockwise neighbor on the same ring.
    pub fn next_in_ring(position: usize) -> usize {
        let slot = Self::slot(position);
        position - slot + (slot + 1) % RING_SIZE
    }

    /// Counter-clockwise neighbor on the same ring.
    pub fn prev_in_ring(position: usize) -> usize {
        let slot = Self::slot(position);
        position - slot + (slot + RING_SIZE - 1) % RING_SIZE
    }

    /// Midpoint on the next ring out, if `position` is a midpoint and that ring exists.
    pub fn outward(&self, position: usize) -> Option<usize> {
        (Self::is_midpoint(position) && Self::ring(position) > 0).then(|| position - RING_SIZE)
    }

    /// Midpoint on the next ring in, if `position` is a midpoint and that ring exists.
    pub fn inward(&self, position: usize) -> Option<usize> {
        (Self::is_midpoint(position) && Self::ring(position) + 1 < self.rings)
            .then(|| position + RING_SIZE)
    }

    /// Neighbors of `position`: previous, next, then outward and inward for midpoints.
    ///
    /// Empty for positions off the board.
    #[instrument(level = "trace", skip(self))]
    pub fn neighbors(&self, position: usize) -> Vec<usize> {
        if !self.contains(position) {
            return Vec::new();
        }
        let mut neighbors = vec![Self::prev_in_ring(position), Self::next_in_ring(position)];
        neighbors.extend(self.outward(position));
        neighbors.extend(self.inward(position));
        neighbors
    }

    /// Returns true if a piece can step from `a` to `b`.
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.contains(a) && self.contains(b) && self.neighbors(a).contains(&b)
    }

    /// Candidate mill lines through `position`, in priority order.
    ///
    /// A midpoint lies on one edge: `[p, next, prev]`. A corner joins two
    /// edges; the edge ahead `[p, p+1, p+2]` is listed before the edge
    /// behind `[p, p-1, p-2]`. Lines never cross rings.
    pub fn mill_lines(position: usize) -> Vec<[usize; 3]> {
        let next = Self::next_in_ring(position);
        let prev = Self::prev_in_ring(position);
        if Self::is_midpoint(position) {
            vec![[position, next, prev]]
        } else {
            vec![
                [position, next, Self::next_in_ring(next)],
                [position, prev, Self::prev_in_ring(prev)],
            ]
        }
    }
}
