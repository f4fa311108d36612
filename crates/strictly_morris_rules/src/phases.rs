//! Game phases and outcomes.

use crate::types::Color;
use serde::{Deserialize, Serialize};

/// The stage of play a removal interrupts and later resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Pieces are still being placed.
    Placing,
    /// Pieces move along the lines.
    Moving,
}

/// Phase of the game state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Players place pieces from their supply.
    Placing,
    /// Players move pieces to adjacent empty positions.
    Moving,
    /// The mover just formed a mill and owes one removal.
    Removing {
        /// Phase to return to once the removal is made.
        resume: Stage,
    },
    /// The game is over. Absorbing.
    Terminal(Outcome),
}

impl Phase {
    /// Returns true once the game has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Terminal(_))
    }

    /// Returns true while a removal is owed.
    pub fn removal_owed(&self) -> bool {
        matches!(self, Phase::Removing { .. })
    }

    /// The outcome of a finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Phase::Terminal(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

impl From<Stage> for Phase {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Placing => Phase::Placing,
            Stage::Moving => Phase::Moving,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Placing => write!(f, "Placing Pieces"),
            Phase::Moving => write!(f, "Game in Progress"),
            Phase::Removing { .. } => write!(f, "Remove a Piece"),
            Phase::Terminal(outcome) => write!(f, "{outcome}"),
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the game.
    Winner(Color),
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Winner(color) => Some(*color),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(color) => write!(f, "{color} Wins"),
            Outcome::Draw => write!(f, "Game Drawn"),
        }
    }
}
