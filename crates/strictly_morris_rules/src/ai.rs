//! Heuristic computer opponent.
//!
//! The heuristics are deliberately simple: midpoints before corners when
//! placing, unprotected pieces first when removing, and the first movable
//! piece with a random empty neighbor when moving. Randomness comes from the
//! caller so games can be replayed from a seed.

use crate::action::Action;
use crate::board::Board;
use crate::game::Game;
use crate::phases::Phase;
use crate::types::Color;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// First empty midpoint, else first empty corner.
#[instrument(skip(board))]
pub fn propose_placement(board: &Board) -> Option<usize> {
    let layout = board.layout();
    let choice = layout
        .midpoints()
        .find(|p| board.is_vacant(*p))
        .or_else(|| layout.corners().find(|p| board.is_vacant(*p)));
    debug!(?choice, "Proposed placement");
    choice
}

/// A piece of `opponent` to take after forming a mill.
///
/// Prefers the first piece outside every mill; when only mills remain, the
/// first piece of `opponent` is taken.
#[instrument(skip(board))]
pub fn propose_removal(board: &Board, opponent: Color) -> Option<usize> {
    let choice = if board.only_mills_remain(opponent) {
        board.positions_of(opponent).next()
    } else {
        board.positions_of(opponent).find(|p| !board.in_mill(*p))
    };
    debug!(?choice, "Proposed removal");
    choice
}

/// The first piece of `own` that can move, stepping to a random empty neighbor.
#[instrument(skip(board, rng))]
pub fn propose_move(board: &Board, own: Color, rng: &mut impl Rng) -> Option<(usize, usize)> {
    let (source, targets) = board
        .positions_of(own)
        .map(|source| (source, board.legal_targets(source)))
        .find(|(_, targets)| !targets.is_empty())?;
    let target = *targets.choose(rng)?;
    debug!(source, target, "Proposed move");
    Some((source, target))
}

/// The action the computer takes for the player to move, if any.
pub fn propose_action(game: &Game, rng: &mut impl Rng) -> Option<Action> {
    let board = game.board();
    match game.phase() {
        Phase::Placing => propose_placement(board).map(Action::Place),
        Phase::Moving => {
            propose_move(board, game.turn(), rng).map(|(source, target)| Action::Move { source, target })
        }
        Phase::Removing { .. } => propose_removal(board, game.turn().opponent()).map(Action::Remove),
        Phase::Terminal(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn board_with(pieces: &[(usize, Color)]) -> Board {
        let mut board = Board::new(2);
        for (position, color) in pieces {
            board.set_occupancy(*position, Square::Occupied(*color));
        }
        board
    }

    #[test]
    fn test_placement_prefers_midpoints() {
        let board = board_with(&[(0, Color::Blue), (2, Color::Red)]);
        assert_eq!(propose_placement(&board), Some(4));
    }

    #[test]
    fn test_placement_falls_back_to_corners() {
        let midpoints: Vec<_> = Board::new(2)
            .layout()
            .midpoints()
            .map(|p| (p, Color::Blue))
            .collect();
        let board = board_with(&midpoints);
        assert_eq!(propose_placement(&board), Some(1));
    }

    #[test]
    fn test_placement_on_full_board() {
        let all: Vec<_> = (0..16).map(|p| (p, Color::Red)).collect();
        assert_eq!(propose_placement(&board_with(&all)), None);
    }

    #[test]
    fn test_removal_skips_mills() {
        let board = board_with(&[(0, Color::Red), (1, Color::Red), (7, Color::Red), (12, Color::Red)]);
        assert_eq!(propose_removal(&board, Color::Red), Some(12));
    }

    #[test]
    fn test_removal_when_only_mills_remain() {
        let board = board_with(&[(0, Color::Red), (1, Color::Red), (7, Color::Red)]);
        assert_eq!(propose_removal(&board, Color::Red), Some(0));
    }

    #[test]
    fn test_move_stays_adjacent() {
        let board = board_with(&[(8, Color::Blue), (0, Color::Red)]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let (source, target) = propose_move(&board, Color::Blue, &mut rng).unwrap();
            assert_eq!(source, 8);
            assert!([9, 15].contains(&target));
        }
    }

    #[test]
    fn test_no_move_when_blocked() {
        let board = board_with(&[(1, Color::Blue), (0, Color::Red), (2, Color::Red)]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(propose_move(&board, Color::Blue, &mut rng), None);
    }
}
