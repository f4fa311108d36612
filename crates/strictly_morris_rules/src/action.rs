//! First-class action types and their rejection reasons.
//!
//! Actions are expressed as position indices and are always attributed to
//! the color whose turn it is. A rejected action leaves the game untouched.

use crate::player::PlayerError;
use crate::types::Color;
use serde::{Deserialize, Serialize};

/// An action the player to move can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Place a piece from the supply.
    Place(usize),
    /// Move a piece to an adjacent empty position.
    Move {
        /// Position of the piece.
        source: usize,
        /// Destination.
        target: usize,
    },
    /// Remove an opponent piece after forming a mill.
    Remove(usize),
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place(position) => write!(f, "place at {position}"),
            Action::Move { source, target } => write!(f, "move {source} -> {target}"),
            Action::Remove(position) => write!(f, "remove at {position}"),
        }
    }
}

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlacementError {
    /// The position already holds a piece.
    #[display("Position {_0} is already occupied")]
    Occupied(usize),
    /// The mover has placed all pieces.
    #[display("{_0} has no pieces left to place")]
    NoPiecesLeft(Color),
    /// The position is not on the board.
    #[display("Position {_0} is not on the board")]
    OutOfBounds(usize),
    /// The color is not the one to move.
    #[display("It's not {_0}'s turn")]
    WrongPlayer(Color),
    /// Placement is over, or a removal is owed.
    #[display("Pieces cannot be placed now")]
    WrongPhase,
}

impl std::error::Error for PlacementError {}

impl From<PlayerError> for PlacementError {
    fn from(err: PlayerError) -> Self {
        match err {
            PlayerError::NoPiecesLeft(color) => PlacementError::NoPiecesLeft(color),
        }
    }
}

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The source does not hold a piece of the mover.
    #[display("Position {_0} does not hold one of your pieces")]
    NotOwnPiece(usize),
    /// The destination already holds a piece.
    #[display("Position {_0} is already occupied")]
    TargetOccupied(usize),
    /// The destination is not next to the source.
    #[display("Position {target} is not adjacent to {source}")]
    NotAdjacent {
        /// Position of the piece.
        source: usize,
        /// Requested destination.
        target: usize,
    },
    /// A position is not on the board.
    #[display("Position {_0} is not on the board")]
    OutOfBounds(usize),
    /// Pieces are still being placed, or a removal is owed.
    #[display("Pieces cannot be moved now")]
    WrongPhase,
}

impl std::error::Error for MoveError {}

/// Why a removal was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RemovalError {
    /// Nothing to remove there.
    #[display("Position {_0} is empty")]
    Empty(usize),
    /// The piece belongs to the mover.
    #[display("Position {_0} holds your own piece")]
    OwnPiece(usize),
    /// The piece sits in a mill while unprotected pieces remain.
    #[display("Position {_0} is in a mill; choose a piece not in a mill")]
    ProtectedByMill(usize),
    /// The position is not on the board.
    #[display("Position {_0} is not on the board")]
    OutOfBounds(usize),
    /// No removal is owed.
    #[display("No removal is owed")]
    WrongPhase,
}

impl std::error::Error for RemovalError {}

/// Error returned when an action is rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionError {
    /// Illegal placement.
    #[display("Invalid placement: {_0}")]
    InvalidPlacement(PlacementError),
    /// Illegal move.
    #[display("Invalid move: {_0}")]
    InvalidMove(MoveError),
    /// Illegal removal.
    #[display("Invalid removal: {_0}")]
    InvalidRemoval(RemovalError),
    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {_0}")]
    InvariantViolation(String),
}

impl std::error::Error for ActionError {}

impl From<PlacementError> for ActionError {
    fn from(err: PlacementError) -> Self {
        ActionError::InvalidPlacement(err)
    }
}

impl From<MoveError> for ActionError {
    fn from(err: MoveError) -> Self {
        ActionError::InvalidMove(err)
    }
}

impl From<RemovalError> for ActionError {
    fn from(err: RemovalError) -> Self {
        ActionError::InvalidRemoval(err)
    }
}

impl From<PlayerError> for ActionError {
    fn from(err: PlayerError) -> Self {
        ActionError::InvalidPlacement(err.into())
    }
}
