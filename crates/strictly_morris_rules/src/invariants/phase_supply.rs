//! Phase/supply invariant: pieces move only once every piece is placed.

use super::Invariant;
use crate::{Color, Game, Phase, Stage};

/// Invariant: the moving stage has empty supplies and the placing stage does not.
pub struct PhaseSupplyInvariant;

impl Invariant<Game> for PhaseSupplyInvariant {
    fn holds(game: &Game) -> bool {
        let blue = game.player(Color::Blue).remaining_to_place();
        let red = game.player(Color::Red).remaining_to_place();
        match game.phase() {
            Phase::Moving | Phase::Removing { resume: Stage::Moving } => blue == 0 && red == 0,
            Phase::Placing => blue > 0 || red > 0,
            Phase::Removing { resume: Stage::Placing } | Phase::Terminal(_) => true,
        }
    }

    fn description() -> &'static str {
        "Moving starts only after both supplies are empty"
    }
}
