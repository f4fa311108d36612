//! Piece budget invariant: nobody has more pieces than the supply allows.

use super::Invariant;
use crate::{Color, Game};
use strum::IntoEnumIterator;

/// Invariant: pieces on the board plus pieces in hand never exceed the allowance.
///
/// Removals make the sum drop below the allowance; nothing ever raises it.
pub struct PieceBudgetInvariant;

impl Invariant<Game> for PieceBudgetInvariant {
    fn holds(game: &Game) -> bool {
        let allowance = *game.config().pieces_per_player();
        Color::iter().all(|color| {
            game.board().count(color) + game.player(color).remaining_to_place() <= allowance
        })
    }

    fn description() -> &'static str {
        "Pieces on board plus pieces in hand never exceed the allowance"
    }
}
