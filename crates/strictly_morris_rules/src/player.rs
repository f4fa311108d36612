//! Per-color supply of unplaced pieces.

use crate::types::Color;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A player: a color and the pieces it has yet to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    color: Color,
    remaining: usize,
}

impl Player {
    /// Creates a player holding `allowance` unplaced pieces.
    #[instrument]
    pub fn new(color: Color, allowance: usize) -> Self {
        Self {
            color,
            remaining: allowance,
        }
    }

    /// The player's color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Pieces not yet placed.
    pub fn remaining_to_place(&self) -> usize {
        self.remaining
    }

    /// Takes one piece from the supply.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::NoPiecesLeft`] when the supply is empty.
    #[instrument(skip(self), fields(color = %self.color, remaining = self.remaining))]
    pub fn place(&mut self) -> Result<(), PlayerError> {
        self.remaining = self
            .remaining
            .checked_sub(1)
            .ok_or(PlayerError::NoPiecesLeft(self.color))?;
        Ok(())
    }

    /// Discards the rest of the supply.
    pub(crate) fn exhaust(&mut self) {
        self.remaining = 0;
    }
}

/// Invalid operation on a player's supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlayerError {
    /// All pieces were already placed.
    #[display("{_0} has no pieces left to place")]
    NoPiecesLeft(Color),
}

impl std::error::Error for PlayerError {}
