//! First-class invariants for ring morris.
//!
//! Invariants are logical properties that must hold throughout game execution.
//! They are checked after every action in debug builds and can be tested
//! independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        finish(violations)
    }
}

pub mod occupancy_total;
pub mod phase_supply;
pub mod piece_budget;

pub use occupancy_total::OccupancyTotalInvariant;
pub use phase_supply::PhaseSupplyInvariant;
pub use piece_budget::PieceBudgetInvariant;

/// All ring morris invariants as a composable set.
pub type MorrisInvariants = (
    OccupancyTotalInvariant,
    PieceBudgetInvariant,
    PhaseSupplyInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Game, RulesConfig, Square};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        let game = Game::new(RulesConfig::default());
        assert!(MorrisInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_placements() {
        let mut game = Game::new(RulesConfig::default());
        game.place(0, Color::Blue).unwrap();
        game.place(8, Color::Red).unwrap();
        game.place(3, Color::Blue).unwrap();
        assert!(MorrisInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut game = Game::new(RulesConfig::default());
        for position in 0..7 {
            game.board.set_occupancy(position, Square::Occupied(Color::Red));
        }
        let violations = MorrisInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].description, PieceBudgetInvariant::description());
    }
}
