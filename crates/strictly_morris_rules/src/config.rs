//! Rule parameters for a game.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Rule parameters: board size, piece supply and the draw threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Number of concentric rings.
    #[serde(default = "default_rings")]
    rings: usize,

    /// Pieces each player places (6 in six men's morris).
    #[serde(default = "default_pieces_per_player")]
    pieces_per_player: usize,

    /// The game is drawn once the repetition count exceeds this.
    #[serde(default = "default_max_repeats")]
    max_repeats: usize,
}

fn default_rings() -> usize {
    2
}

fn default_pieces_per_player() -> usize {
    6
}

fn default_max_repeats() -> usize {
    12
}

impl RulesConfig {
    /// Creates a validated configuration.
    #[instrument]
    pub fn new(
        rings: usize,
        pieces_per_player: usize,
        max_repeats: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            rings,
            pieces_per_player,
            max_repeats,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the board can hold both supplies and a mill is possible.
    #[instrument(skip(self), fields(rings = self.rings, pieces = self.pieces_per_player))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rings == 0 {
            return Err(ConfigError::new("board needs at least one ring".to_string()));
        }
        if self.pieces_per_player < 3 {
            return Err(ConfigError::new(format!(
                "{} pieces per player cannot form a mill",
                self.pieces_per_player
            )));
        }
        let positions = self.rings * crate::position::RING_SIZE;
        if self.pieces_per_player * 2 > positions {
            return Err(ConfigError::new(format!(
                "{} pieces per player do not fit on {} positions",
                self.pieces_per_player, positions
            )));
        }
        debug!("Rules config is valid");
        Ok(())
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            rings: default_rings(),
            pieces_per_player: default_pieces_per_player(),
            max_repeats: default_max_repeats(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_six_mens_morris() {
        let config = RulesConfig::default();
        assert_eq!(*config.rings(), 2);
        assert_eq!(*config.pieces_per_player(), 6);
        assert_eq!(*config.max_repeats(), 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_overfull_board() {
        assert!(RulesConfig::new(1, 5, 12).is_err());
        assert!(RulesConfig::new(1, 4, 12).is_ok());
    }

    #[test]
    fn test_rejects_degenerate_boards() {
        assert!(RulesConfig::new(0, 6, 12).is_err());
        assert!(RulesConfig::new(3, 2, 12).is_err());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: RulesConfig = serde_json::from_str(r#"{"rings": 3}"#).unwrap();
        assert_eq!(*config.rings(), 3);
        assert_eq!(*config.pieces_per_player(), 6);
    }
}
