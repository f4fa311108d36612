//! Board occupancy, mill detection and winner queries.

use crate::history::History;
use crate::position::Layout;
use crate::types::{Color, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Three positions along one ring edge, all holding the same color.
///
/// The first entry is the position the mill was found through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mill([usize; 3]);

impl Mill {
    /// Positions forming the mill.
    pub fn positions(&self) -> [usize; 3] {
        self.0
    }

    /// Returns true if `position` is part of the mill.
    pub fn contains(&self, position: usize) -> bool {
        self.0.contains(&position)
    }
}

impl std::fmt::Display for Mill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{{{a}, {b}, {c}}}")
    }
}

/// Board occupancy for a ring layout.
///
/// The board performs no legality checks; writes are unconditional and
/// every write is recorded in the repetition history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    layout: Layout,
    squares: Vec<Square>,
    history: History,
}

impl Board {
    /// Creates an empty board with `rings` rings.
    #[instrument]
    pub fn new(rings: usize) -> Self {
        let layout = Layout::new(rings);
        Self {
            layout,
            squares: vec![Square::Empty; layout.len()],
            history: History::new(),
        }
    }

    /// Reconstructs a board from a snapshot. History starts empty.
    ///
    /// Returns `None` if `squares` does not have one entry per position.
    #[instrument(skip(squares), fields(len = squares.len()))]
    pub fn from_squares(rings: usize, squares: Vec<Square>) -> Option<Self> {
        let layout = Layout::new(rings);
        if squares.len() != layout.len() {
            return None;
        }
        Some(Self {
            layout,
            squares,
            history: History::new(),
        })
    }

    /// Board geometry.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Returns true for a board without positions.
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Occupancy at `position`, or `None` when out of bounds.
    pub fn get(&self, position: usize) -> Option<Square> {
        self.squares.get(position).copied()
    }

    /// Returns true if `position` is on the board and empty.
    pub fn is_vacant(&self, position: usize) -> bool {
        matches!(self.get(position), Some(Square::Empty))
    }

    /// Current occupancy of every position, in index order.
    pub fn snapshot(&self) -> &[Square] {
        &self.squares
    }

    /// Writes `square` at `position` and records the result.
    ///
    /// Out-of-range positions are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn set_occupancy(&mut self, position: usize, square: Square) {
        let Some(slot) = self.squares.get_mut(position) else {
            debug!(position, "Ignoring write outside the board");
            return;
        };
        *slot = square;
        self.history.record(&self.squares);
    }

    /// Moves the piece at `source` to `target` as one recorded half-move.
    ///
    /// Out-of-range positions are ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn relocate(&mut self, source: usize, target: usize) {
        if !self.layout.contains(source) || !self.layout.contains(target) {
            debug!(source, target, "Ignoring relocation outside the board");
            return;
        }
        let piece = std::mem::take(&mut self.squares[source]);
        self.squares[target] = piece;
        self.history.record(&self.squares);
    }

    /// Returns the mill through `position`, if one exists.
    ///
    /// For corners the edge ahead is checked before the edge behind.
    pub fn mill_at(&self, position: usize) -> Option<Mill> {
        let color = self.get(position)?.color()?;
        Layout::mill_lines(position)
            .into_iter()
            .find(|line| line.iter().all(|p| self.squares[*p].is(color)))
            .map(Mill)
    }

    /// Returns true if the piece at `position` sits in a mill.
    pub fn in_mill(&self, position: usize) -> bool {
        self.mill_at(position).is_some()
    }

    /// Returns true if every piece of `color` sits in some mill.
    ///
    /// Vacuously true when `color` has no pieces.
    #[instrument(skip(self))]
    pub fn only_mills_remain(&self, color: Color) -> bool {
        self.positions_of(color).all(|p| self.in_mill(p))
    }

    /// Positions holding `color`, in index order.
    pub fn positions_of(&self, color: Color) -> impl Iterator<Item = usize> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.is(color))
            .map(|(p, _)| p)
    }

    /// Number of pieces of `color` on the board.
    pub fn count(&self, color: Color) -> usize {
        self.positions_of(color).count()
    }

    /// Number of empty positions.
    pub fn empty_count(&self) -> usize {
        self.squares.iter().filter(|s| s.is_empty()).count()
    }

    /// The color whose opponent is down to exactly two pieces.
    #[instrument(skip(self))]
    pub fn winner(&self) -> Option<Color> {
        if self.count(Color::Blue) == 2 {
            Some(Color::Red)
        } else if self.count(Color::Red) == 2 {
            Some(Color::Blue)
        } else {
            None
        }
    }

    /// Empty neighbors of `source`, in neighbor order.
    pub fn legal_targets(&self, source: usize) -> Vec<usize> {
        if !self.layout.contains(source) {
            return Vec::new();
        }
        self.layout
            .neighbors(source)
            .into_iter()
            .filter(|p| self.is_vacant(*p))
            .collect()
    }

    /// Returns true if any piece of `color` can step to an empty neighbor.
    #[instrument(skip(self))]
    pub fn has_legal_move(&self, color: Color) -> bool {
        let movable = self
            .positions_of(color)
            .any(|p| !self.legal_targets(p).is_empty());
        trace!(%color, movable, "Checked for legal moves");
        movable
    }

    /// Consecutive repeated-cycle windows observed so far.
    pub fn repetition_count(&self) -> usize {
        self.history.repeats()
    }

    /// The repetition history.
    pub fn history(&self) -> &History {
        &self.history
    }
}
