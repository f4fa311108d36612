//! Core domain types for ring morris.

use serde::{Deserialize, Serialize};

/// Piece color. Blue is numeric 1 and moves on turn 0, red is numeric 2
/// and moves on turn 1.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Color {
    /// Blue pieces.
    #[display("Blue")]
    Blue,
    /// Red pieces.
    #[display("Red")]
    Red,
}

impl Color {
    /// Returns the opposing color.
    pub fn opponent(self) -> Self {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
        }
    }

    /// Numeric occupancy code (1 for blue, 2 for red).
    pub fn code(self) -> u8 {
        match self {
            Color::Blue => 1,
            Color::Red => 2,
        }
    }

    /// Parses an occupancy code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Color::Blue),
            2 => Some(Color::Red),
            _ => None,
        }
    }

    /// Turn index (0 for blue, 1 for red).
    pub fn turn_index(self) -> u8 {
        self.code() - 1
    }

    /// Parses a turn index.
    pub fn from_turn_index(index: u8) -> Option<Self> {
        index.checked_add(1).and_then(Self::from_code)
    }
}

/// Occupancy of a single board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// No piece.
    #[default]
    Empty,
    /// A piece of the given color.
    Occupied(Color),
}

impl Square {
    /// Returns true if no piece sits here.
    pub fn is_empty(self) -> bool {
        matches!(self, Square::Empty)
    }

    /// Color of the occupying piece, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Square::Empty => None,
            Square::Occupied(color) => Some(color),
        }
    }

    /// Returns true if a piece of `color` sits here.
    pub fn is(self, color: Color) -> bool {
        self == Square::Occupied(color)
    }

    /// Numeric code: 0 empty, 1 blue, 2 red.
    pub fn code(self) -> u8 {
        self.color().map_or(0, Color::code)
    }

    /// Parses a numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Square::Empty),
            other => Color::from_code(other).map(Square::Occupied),
        }
    }
}

impl From<Color> for Square {
    fn from(color: Color) -> Self {
        Square::Occupied(color)
    }
}
