//! Launcher configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_morris_rules::{Color, RulesConfig};
use tracing::{debug, info, instrument};

/// Which side the computer plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AiSide {
    /// The computer plays blue.
    Blue,
    /// The computer plays red.
    Red,
    /// A coin flip picks the computer's color.
    Random,
}

impl AiSide {
    /// Resolves the side to a color, flipping a coin for [`AiSide::Random`].
    pub fn resolve(self, rng: &mut impl Rng) -> Color {
        match self {
            AiSide::Blue => Color::Blue,
            AiSide::Red => Color::Red,
            AiSide::Random => coin_flip(rng),
        }
    }
}

/// Who places the first piece of a new game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FirstPlayer {
    /// Blue opens.
    Blue,
    /// Red opens.
    Red,
    /// A coin flip picks the opener.
    #[default]
    Random,
}

impl FirstPlayer {
    /// Resolves the opener to a color, flipping a coin for [`FirstPlayer::Random`].
    pub fn resolve(self, rng: &mut impl Rng) -> Color {
        match self {
            FirstPlayer::Blue => Color::Blue,
            FirstPlayer::Red => Color::Red,
            FirstPlayer::Random => coin_flip(rng),
        }
    }
}

fn coin_flip(rng: &mut impl Rng) -> Color {
    if rng.random_bool(0.5) {
        Color::Blue
    } else {
        Color::Red
    }
}

/// Launcher configuration: the rules plus launcher defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Rule parameters.
    #[serde(default)]
    rules: RulesConfig,

    /// Where the `save` command writes.
    #[serde(default = "default_save_path")]
    save_path: PathBuf,

    /// Computer opponent, if any.
    #[serde(default)]
    ai: Option<AiSide>,

    /// Who opens a new game.
    #[serde(default)]
    first_player: FirstPlayer,
}

#[instrument]
fn default_save_path() -> PathBuf {
    PathBuf::from("morris.save")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            save_path: default_save_path(),
            ai: None,
            first_player: FirstPlayer::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file and validates the rules.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AppConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text and validates the rules.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, AppConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AppConfigError::new(format!("Failed to parse config: {}", e)))?;
        config
            .rules
            .validate()
            .map_err(|e| AppConfigError::new(e.message))?;
        info!(rings = *config.rules.rings(), "Config loaded successfully");
        Ok(config)
    }

    /// Overrides the save path.
    pub fn with_save_path(mut self, save_path: PathBuf) -> Self {
        self.save_path = save_path;
        self
    }

    /// Overrides the computer opponent.
    pub fn with_ai(mut self, ai: Option<AiSide>) -> Self {
        self.ai = ai;
        self
    }

    /// Overrides who opens a new game.
    pub fn with_first_player(mut self, first_player: FirstPlayer) -> Self {
        self.first_player = first_player;
        self
    }
}

/// Launcher configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct AppConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl AppConfigError {
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
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_rules_table() {
        let config = AppConfig::from_toml(
            r#"
            ai = "red"

            [rules]
            rings = 3
            pieces_per_player = 9
            "#,
        )
        .unwrap();
        assert_eq!(*config.rules().rings(), 3);
        assert_eq!(*config.rules().pieces_per_player(), 9);
        assert_eq!(*config.ai(), Some(AiSide::Red));
        assert_eq!(*config.first_player(), FirstPlayer::Random);
    }

    #[test]
    fn test_first_player_table_value() {
        let config = AppConfig::from_toml("first_player = \"red\"\n").unwrap();
        assert_eq!(*config.first_player(), FirstPlayer::Red);
    }

    #[test]
    fn test_random_first_player_picks_both_colors() {
        let openers: Vec<Color> = (0..32)
            .map(|seed| FirstPlayer::Random.resolve(&mut StdRng::seed_from_u64(seed)))
            .collect();
        assert!(openers.contains(&Color::Blue));
        assert!(openers.contains(&Color::Red));
    }

    #[test]
    fn test_invalid_rules_rejected() {
        let err = AppConfig::from_toml("[rules]\nrings = 1\npieces_per_player = 6\n").unwrap_err();
        assert!(err.message.contains("do not fit"));
    }

    #[test]
    fn test_fixed_sides_ignore_rng() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(AiSide::Blue.resolve(&mut rng), Color::Blue);
        assert_eq!(AiSide::Red.resolve(&mut rng), Color::Red);
        assert_eq!(FirstPlayer::Blue.resolve(&mut rng), Color::Blue);
        assert_eq!(FirstPlayer::Red.resolve(&mut rng), Color::Red);
    }
}
