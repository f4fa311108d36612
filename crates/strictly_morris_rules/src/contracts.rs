//! Contract-based validation for ring morris.
//!
//! Contracts define correctness through preconditions and postconditions.
//! Preconditions are always checked and reject illegal actions before any
//! state changes; postconditions re-check the invariant set in debug builds.

use crate::action::{Action, ActionError, MoveError, PlacementError, RemovalError};
use crate::game::Game;
use crate::invariants::{InvariantSet, MorrisInvariants};
use crate::phases::Phase;
use crate::types::{Color, Square};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), ActionError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), ActionError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not ended.
pub struct GameNotOver;

impl GameNotOver {
    /// Rejects any action on a finished game.
    pub fn check(game: &Game) -> Result<(), ActionError> {
        if game.is_terminal() {
            Err(ActionError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition for placing a piece.
///
/// The game must be placing with no removal owed, `color` must be to move
/// and still hold pieces, and the position must be an empty point on the board.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates a placement of `color` at `position`.
    #[instrument(skip(game))]
    pub fn check(position: usize, color: Color, game: &Game) -> Result<(), PlacementError> {
        if game.phase() != Phase::Placing {
            return Err(PlacementError::WrongPhase);
        }
        if color != game.turn() {
            return Err(PlacementError::WrongPlayer(color));
        }
        match game.board().get(position) {
            None => return Err(PlacementError::OutOfBounds(position)),
            Some(Square::Occupied(_)) => return Err(PlacementError::Occupied(position)),
            Some(Square::Empty) => {}
        }
        if game.player(color).remaining_to_place() == 0 {
            return Err(PlacementError::NoPiecesLeft(color));
        }
        Ok(())
    }
}

/// Precondition: the source of a move holds a piece of the mover.
pub struct OwnPieceAtSource;

impl OwnPieceAtSource {
    /// Validates the phase and the piece being moved.
    #[instrument(skip(game))]
    pub fn check(source: usize, game: &Game) -> Result<(), MoveError> {
        if game.phase() != Phase::Moving {
            return Err(MoveError::WrongPhase);
        }
        match game.board().get(source) {
            None => Err(MoveError::OutOfBounds(source)),
            Some(square) if square.is(game.turn()) => Ok(()),
            Some(_) => Err(MoveError::NotOwnPiece(source)),
        }
    }
}

/// Precondition: the destination of a move is an adjacent empty point.
pub struct AdjacentEmptyTarget;

impl AdjacentEmptyTarget {
    /// Validates the destination of a move from `source`.
    #[instrument(skip(game))]
    pub fn check(source: usize, target: usize, game: &Game) -> Result<(), MoveError> {
        match game.board().get(target) {
            None => return Err(MoveError::OutOfBounds(target)),
            Some(Square::Occupied(_)) => return Err(MoveError::TargetOccupied(target)),
            Some(Square::Empty) => {}
        }
        if !game.board().layout().are_adjacent(source, target) {
            return Err(MoveError::NotAdjacent { source, target });
        }
        Ok(())
    }
}

/// Composite precondition for moving a piece.
///
/// Moving a piece onto its own square is a cancelled selection, not an
/// error, so only the source is checked in that case.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(source: usize, target: usize, game: &Game) -> Result<(), MoveError> {
        OwnPieceAtSource::check(source, game)?;
        if source == target {
            return Ok(());
        }
        AdjacentEmptyTarget::check(source, target, game)
    }
}

/// Precondition for removing an opponent piece.
///
/// A piece inside a mill is protected unless every opponent piece is in a mill.
pub struct LegalRemoval;

impl LegalRemoval {
    /// Validates a removal at `position` by the player to move.
    #[instrument(skip(game))]
    pub fn check(position: usize, game: &Game) -> Result<(), RemovalError> {
        if !game.phase().removal_owed() {
            return Err(RemovalError::WrongPhase);
        }
        let opponent = game.turn().opponent();
        match game.board().get(position) {
            None => Err(RemovalError::OutOfBounds(position)),
            Some(Square::Empty) => Err(RemovalError::Empty(position)),
            Some(Square::Occupied(color)) if color != opponent => {
                Err(RemovalError::OwnPiece(position))
            }
            Some(Square::Occupied(_)) => {
                let board = game.board();
                if board.in_mill(position) && !board.only_mills_remain(opponent) {
                    Err(RemovalError::ProtectedByMill(position))
                } else {
                    Ok(())
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Action Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for actions attributed to a color.
///
/// Preconditions:
/// - Game is not over
/// - The action-specific legality check passes
///
/// Postconditions:
/// - Occupancy counts cover the board
/// - No color exceeds its piece allowance
/// - Moving only happens with empty supplies
pub struct ActionContract;

impl Contract<Game, (Color, Action)> for ActionContract {
    fn pre(game: &Game, (color, action): &(Color, Action)) -> Result<(), ActionError> {
        GameNotOver::check(game)?;
        let result: Result<(), ActionError> = match *action {
            Action::Place(position) => LegalPlacement::check(position, *color, game).map_err(Into::into),
            Action::Move { source, target } => LegalMove::check(source, target, game).map_err(Into::into),
            Action::Remove(position) => LegalRemoval::check(position, game).map_err(Into::into),
        };
        if let Err(err) = &result {
            warn!(%color, %action, error = %err, "Rejected action");
        }
        result
    }

    fn post(_before: &Game, after: &Game) -> Result<(), ActionError> {
        MorrisInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            ActionError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RulesConfig;

    fn new_game() -> Game {
        Game::new(RulesConfig::default())
    }

    #[test]
    fn test_precondition_empty_square() {
        let game = new_game();
        assert!(ActionContract::pre(&game, &(Color::Blue, Action::Place(4))).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square() {
        let mut game = new_game();
        game.place(4, Color::Blue).unwrap();
        assert_eq!(
            ActionContract::pre(&game, &(Color::Red, Action::Place(4))),
            Err(ActionError::InvalidPlacement(PlacementError::Occupied(4)))
        );
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let game = new_game();
        assert_eq!(
            ActionContract::pre(&game, &(Color::Red, Action::Place(4))),
            Err(ActionError::InvalidPlacement(PlacementError::WrongPlayer(Color::Red)))
        );
    }

    #[test]
    fn test_move_rejected_while_placing() {
        let game = new_game();
        assert_eq!(
            LegalMove::check(0, 1, &game),
            Err(MoveError::WrongPhase)
        );
    }

    #[test]
    fn test_removal_rejected_when_not_owed() {
        let game = new_game();
        assert_eq!(LegalRemoval::check(0, &game), Err(RemovalError::WrongPhase));
    }

    #[test]
    fn test_postcondition_holds_after_placement() {
        let before = new_game();
        let mut after = before.clone();
        after.place(0, Color::Blue).unwrap();
        assert!(ActionContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = new_game();
        let mut after = before.clone();
        for position in 0..7 {
            after.board.set_occupancy(position, Square::Occupied(Color::Blue));
        }
        assert!(ActionContract::post(&before, &after).is_err());
    }
}
