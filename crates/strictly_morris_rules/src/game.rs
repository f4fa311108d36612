//! The game state machine.
//!
//! [`Game`] is the single owner of the board and both piece supplies and the
//! only thing that mutates them. Every action is validated by
//! [`ActionContract`] before it touches state, so a rejected action is always
//! retryable.

use crate::action::{Action, ActionError, RemovalError};
use crate::board::{Board, Mill};
use crate::config::{ConfigError, RulesConfig};
use crate::contracts::{ActionContract, Contract, LegalRemoval};
use crate::phases::{Outcome, Phase, Stage};
use crate::player::Player;
use crate::types::{Color, Square};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

/// What an accepted action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The action was applied and play continues.
    Continued,
    /// The action completed a mill; the mover now owes a removal.
    MillFormed(Mill),
    /// A piece was put back on its own square; nothing changed.
    Cancelled,
    /// The action ended the game.
    Finished(Outcome),
}

/// The tuple a save collaborator stores and hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    /// Phase; a pending removal is carried by `removal_owed` instead of `Phase::Removing`.
    pub phase: Phase,
    /// Color to move.
    pub turn: Color,
    /// Whether the player to move owes a removal.
    pub removal_owed: bool,
    /// Occupancy of every position in index order.
    pub squares: Vec<Square>,
}

/// Why a saved state could not be restored.
#[derive(Debug, Clone, derive_more::Display)]
pub enum RestoreError {
    /// The rules themselves are invalid.
    #[display("{_0}")]
    Config(ConfigError),
    /// The snapshot does not match the board size.
    #[display("Expected {expected} positions, found {found}")]
    WrongLength {
        /// Positions on the configured board.
        expected: usize,
        /// Positions in the snapshot.
        found: usize,
    },
    /// A color has more pieces on the board than its allowance.
    #[display("{_0} has more pieces than allowed")]
    TooManyPieces(Color),
}

impl std::error::Error for RestoreError {}

/// Ring morris game state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(crate) config: RulesConfig,
    pub(crate) board: Board,
    pub(crate) blue: Player,
    pub(crate) red: Player,
    pub(crate) phase: Phase,
    pub(crate) turn: Color,
}

impl Game {
    /// Creates a new game with blue to place first.
    #[instrument]
    pub fn new(config: RulesConfig) -> Self {
        Self::with_first_player(config, Color::Blue)
    }

    /// Creates a new game with `first` to place first.
    #[instrument]
    pub fn with_first_player(config: RulesConfig, first: Color) -> Self {
        let allowance = *config.pieces_per_player();
        Self {
            board: Board::new(*config.rings()),
            blue: Player::new(Color::Blue, allowance),
            red: Player::new(Color::Red, allowance),
            phase: Phase::Placing,
            turn: first,
            config,
        }
    }

    /// Rebuilds a game from a saved `(phase, turn, removal_owed, occupancy)` tuple.
    ///
    /// Piece supplies are not part of the tuple. While placing, each color
    /// holds its allowance minus the pieces it has on the board; once
    /// moving, both supplies are empty. The repetition history starts fresh.
    /// A removal owed while the opponent has nothing on the board is dropped
    /// and the opponent moves next.
    #[instrument(skip(saved), fields(phase = ?saved.phase, turn = %saved.turn))]
    pub fn restore(config: RulesConfig, saved: SavedState) -> Result<Self, RestoreError> {
        config.validate().map_err(RestoreError::Config)?;
        let expected = *config.rings() * crate::position::RING_SIZE;
        let found = saved.squares.len();
        let board = Board::from_squares(*config.rings(), saved.squares)
            .ok_or(RestoreError::WrongLength { expected, found })?;

        let allowance = *config.pieces_per_player();
        if let Some(color) = Color::iter().find(|c| board.count(*c) > allowance) {
            return Err(RestoreError::TooManyPieces(color));
        }

        // A removal owed against an empty side is forfeited and the turn passes.
        let owed = saved.removal_owed && board.count(saved.turn.opponent()) > 0;
        let turn = if saved.removal_owed && !owed {
            debug!(turn = %saved.turn, "Dropping removal owed against an empty side");
            saved.turn.opponent()
        } else {
            saved.turn
        };
        let phase = match (saved.phase, owed) {
            (Phase::Placing, true) => Phase::Removing { resume: Stage::Placing },
            (Phase::Moving, true) => Phase::Removing { resume: Stage::Moving },
            (phase, _) => phase,
        };
        let placing = matches!(
            phase,
            Phase::Placing | Phase::Removing { resume: Stage::Placing }
        );
        let supply = |color: Color| {
            let mut player = Player::new(color, allowance.saturating_sub(board.count(color)));
            if !placing {
                player.exhaust();
            }
            player
        };

        let mut game = Self {
            blue: supply(Color::Blue),
            red: supply(Color::Red),
            board,
            phase,
            turn,
            config,
        };
        if matches!(game.phase, Phase::Placing | Phase::Moving) {
            game.settle();
        }
        info!(phase = ?game.phase, turn = %game.turn, "Game restored");
        Ok(game)
    }

    /// The tuple needed to restore this game later.
    pub fn saved_state(&self) -> SavedState {
        let (phase, removal_owed) = match self.phase {
            Phase::Removing { resume } => (resume.into(), true),
            phase => (phase, false),
        };
        SavedState {
            phase,
            turn: self.turn,
            removal_owed,
            squares: self.board.snapshot().to_vec(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Actions
    // ─────────────────────────────────────────────────────────────

    /// Places a piece of `color` at `position`.
    ///
    /// # Errors
    ///
    /// Rejects the placement when the game is over, pieces cannot be placed
    /// now, `color` is not to move or has no pieces left, or the position is
    /// occupied or off the board.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn place(&mut self, position: usize, color: Color) -> Result<Transition, ActionError> {
        ActionContract::pre(self, &(color, Action::Place(position)))?;
        #[cfg(debug_assertions)]
        let before = self.clone();

        self.player_mut(color).place()?;
        self.board.set_occupancy(position, Square::Occupied(color));
        debug!(position, %color, "Piece placed");
        let transition = self.after_arrival(position, Stage::Placing);

        #[cfg(debug_assertions)]
        ActionContract::post(&before, self)?;
        Ok(transition)
    }

    /// Moves the mover's piece at `source` to the adjacent empty `target`.
    ///
    /// Moving a piece onto its own square cancels the selection and returns
    /// [`Transition::Cancelled`] without changing anything.
    ///
    /// # Errors
    ///
    /// Rejects the move when the game is over, pieces cannot be moved now,
    /// `source` does not hold the mover's piece, or `target` is occupied,
    /// not adjacent, or off the board.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn move_piece(&mut self, source: usize, target: usize) -> Result<Transition, ActionError> {
        ActionContract::pre(self, &(self.turn, Action::Move { source, target }))?;
        if source == target {
            debug!(source, "Selection cancelled");
            return Ok(Transition::Cancelled);
        }
        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board.relocate(source, target);
        debug!(source, target, "Piece moved");
        // Only the destination can complete a mill.
        let transition = self.after_arrival(target, Stage::Moving);

        #[cfg(debug_assertions)]
        ActionContract::post(&before, self)?;
        Ok(transition)
    }

    /// Removes the opponent piece at `position` after a mill.
    ///
    /// # Errors
    ///
    /// Rejects the removal when the game is over, no removal is owed, the
    /// position is empty, holds the mover's own piece, or holds a piece in a
    /// mill while the opponent still has pieces outside mills.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn remove(&mut self, position: usize) -> Result<Transition, ActionError> {
        ActionContract::pre(self, &(self.turn, Action::Remove(position)))?;
        #[cfg(debug_assertions)]
        let before = self.clone();

        let Phase::Removing { resume } = self.phase else {
            return Err(RemovalError::WrongPhase.into());
        };
        self.board.set_occupancy(position, Square::Empty);
        debug!(position, "Piece removed");
        self.phase = resume.into();
        self.turn = self.turn.opponent();
        let transition = self.settle();

        #[cfg(debug_assertions)]
        ActionContract::post(&before, self)?;
        Ok(transition)
    }

    /// Applies `action` for the player to move.
    pub fn apply(&mut self, action: Action) -> Result<Transition, ActionError> {
        match action {
            Action::Place(position) => self.place(position, self.turn),
            Action::Move { source, target } => self.move_piece(source, target),
            Action::Remove(position) => self.remove(position),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Color to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Rule parameters.
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Read-only board view.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Occupancy of every position in index order.
    pub fn snapshot(&self) -> &[Square] {
        self.board.snapshot()
    }

    /// The supply of `color`.
    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::Blue => &self.blue,
            Color::Red => &self.red,
        }
    }

    /// Returns true once the game has ended.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// The outcome of a finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        self.phase.outcome()
    }

    /// Every action the player to move could take, in index order.
    #[instrument(skip(self))]
    pub fn legal_actions(&self) -> Vec<Action> {
        let board = &self.board;
        let layout = board.layout();
        match self.phase {
            Phase::Placing if self.player(self.turn).remaining_to_place() > 0 => layout
                .positions()
                .filter(|p| board.is_vacant(*p))
                .map(Action::Place)
                .collect(),
            Phase::Placing | Phase::Terminal(_) => Vec::new(),
            Phase::Moving => board
                .positions_of(self.turn)
                .flat_map(|source| {
                    board
                        .legal_targets(source)
                        .into_iter()
                        .map(move |target| Action::Move { source, target })
                })
                .collect(),
            Phase::Removing { .. } => layout
                .positions()
                .filter(|p| LegalRemoval::check(*p, self).is_ok())
                .map(Action::Remove)
                .collect(),
        }
    }

    /// Returns false when the player to move has nothing legal to do.
    pub fn has_legal_action(&self) -> bool {
        !self.legal_actions().is_empty()
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────────

    fn player_mut(&mut self, color: Color) -> &mut Player {
        match color {
            Color::Blue => &mut self.blue,
            Color::Red => &mut self.red,
        }
    }

    /// Handles a piece arriving at `position` during `stage`.
    fn after_arrival(&mut self, position: usize, stage: Stage) -> Transition {
        let opponent = self.turn.opponent();
        // A mill against an empty side owes nothing.
        let mill = self
            .board
            .mill_at(position)
            .filter(|_| self.board.count(opponent) > 0);
        if let Some(mill) = mill {
            info!(%mill, color = %self.turn, "Mill formed");
            self.phase = Phase::Removing { resume: stage };
            return Transition::MillFormed(mill);
        }
        self.turn = opponent;
        self.settle()
    }

    /// Advances placing to moving when both supplies are empty and checks
    /// for the end of the game once pieces move.
    fn settle(&mut self) -> Transition {
        if self.phase == Phase::Placing {
            if self.blue.remaining_to_place() == 0 && self.red.remaining_to_place() == 0 {
                info!("All pieces placed");
                self.phase = Phase::Moving;
            } else if self.player(self.turn).remaining_to_place() == 0 {
                debug!(color = %self.turn, "No pieces left to place, passing");
                self.turn = self.turn.opponent();
            }
        }

        if self.phase != Phase::Moving {
            return Transition::Continued;
        }
        match self.evaluate() {
            Some(outcome) => {
                info!(%outcome, "Game over");
                self.phase = Phase::Terminal(outcome);
                Transition::Finished(outcome)
            }
            None => Transition::Continued,
        }
    }

    /// Draw by repetition, then a reduced opponent, then a blocked mover.
    fn evaluate(&self) -> Option<Outcome> {
        if self.board.repetition_count() > *self.config.max_repeats() {
            return Some(Outcome::Draw);
        }
        if let Some(winner) = self.board.winner() {
            return Some(Outcome::Winner(winner));
        }
        if !self.board.has_legal_move(self.turn) {
            debug!(color = %self.turn, "No legal moves");
            return Some(Outcome::Winner(self.turn.opponent()));
        }
        None
    }
}
