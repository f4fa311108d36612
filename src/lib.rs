//! Strictly Morris library - terminal play around the ring morris rules.
//!
//! The rules live in `strictly_morris_rules`; this crate adds everything
//! that touches the outside world.
//!
//! # Architecture
//!
//! - **Save**: the line-oriented save record
//! - **Setup**: validation of hand-arranged starting boards
//! - **Config**: TOML launcher configuration
//! - **Terminal**: the interactive game loop
//!
//! # Example
//!
//! ```no_run
//! use strictly_morris::{AppConfig, SaveRecord};
//! use strictly_morris_rules::Game;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = AppConfig::from_file("morris.toml")?;
//! let record = SaveRecord::load(config.save_path())?;
//! let (state, _, _) = record.into_parts();
//! let game = Game::restore(*config.rules(), state)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod app_config;
mod save;
mod setup;
mod terminal;

// Crate-level exports - Configuration
pub use app_config::{AiSide, AppConfig, AppConfigError, FirstPlayer};

// Crate-level exports - Save record
pub use save::{SaveError, SaveRecord};

// Crate-level exports - Setup validation
pub use setup::{SetupError, SetupProblem, check_setup, load_setup, parse_setup, start_from_setup};

// Crate-level exports - Terminal play
pub use terminal::{Command, TerminalSession, render_board};
