//! Occupancy total invariant: every position is in exactly one state.

use super::Invariant;
use crate::{Color, Game};

/// Invariant: blue, red and empty counts add up to the number of positions.
pub struct OccupancyTotalInvariant;

impl Invariant<Game> for OccupancyTotalInvariant {
    fn holds(game: &Game) -> bool {
        let board = game.board();
        board.count(Color::Blue) + board.count(Color::Red) + board.empty_count()
            == board.layout().len()
    }

    fn description() -> &'static str {
        "Blue, red and empty counts cover every position exactly once"
    }
}
