//! Ring morris rules - a type-safe game engine.
//!
//! Two players alternately place pieces on the points of `N` concentric
//! square rings, then move them to adjacent empty points. Three in a row on
//! a ring side is a mill and lets the mover take an opponent piece. A player
//! reduced to two pieces, or left without a move, loses; long repetition
//! draws.
//!
//! # Architecture
//!
//! - **Layout**: position indexing, adjacency and mill lines
//! - **Board**: occupancy plus the repetition history
//! - **Game**: the phase state machine, validated by contracts
//! - **AI**: heuristic opponent with injected randomness
//!
//! # Example
//!
//! ```
//! use strictly_morris_rules::{Color, Game, Phase, RulesConfig};
//!
//! let mut game = Game::new(RulesConfig::default());
//! game.place(0, Color::Blue)?;
//! game.place(8, Color::Red)?;
//! assert_eq!(game.phase(), Phase::Placing);
//! # Ok::<(), strictly_morris_rules::ActionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod config;
mod game;
mod history;
mod phases;
mod player;
mod position;
mod types;

pub mod ai;
pub mod contracts;
pub mod invariants;

// Crate-level exports - Primitives
pub use position::{Layout, RING_SIZE};
pub use types::{Color, Square};

// Crate-level exports - Board
pub use board::{Board, Mill};
pub use history::{HISTORY_LEN, History};

// Crate-level exports - Players and phases
pub use phases::{Outcome, Phase, Stage};
pub use player::{Player, PlayerError};

// Crate-level exports - Actions
pub use action::{Action, ActionError, MoveError, PlacementError, RemovalError};

// Crate-level exports - Game
pub use config::{ConfigError, RulesConfig};
pub use game::{Game, RestoreError, SavedState, Transition};
