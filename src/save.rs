//! Plain-text save record.
//!
//! One value per line: phase code, turn, removal owed, AI enabled, AI color,
//! then one occupancy code per position.

use derive_getters::Getters;
use derive_more::{Display, Error};
use std::path::Path;
use strictly_morris_rules::{Color, Outcome, Phase, SavedState, Square, Stage};
use tracing::{debug, info, instrument};

/// Number of header lines before the occupancy codes.
const HEADER_LINES: usize = 5;

/// Sentinel stored when no color is computer-controlled.
const NO_AI_COLOR: i32 = -1;

/// A saved game plus the launcher's AI settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct SaveRecord {
    /// The game tuple handed back to the rules engine.
    state: SavedState,
    /// Whether a computer opponent was playing.
    ai_enabled: bool,
    /// Which color the computer played.
    ai_color: Option<Color>,
}

impl SaveRecord {
    /// Splits the record into the game tuple and AI settings.
    pub fn into_parts(self) -> (SavedState, bool, Option<Color>) {
        (self.state, self.ai_enabled, self.ai_color)
    }

    /// Renders the record in its line-oriented text form.
    pub fn to_text(&self) -> String {
        let ai_color = self
            .ai_color
            .map_or(NO_AI_COLOR, |color| i32::from(color.code()));
        let mut lines = vec![
            phase_code(self.state.phase).to_string(),
            self.state.turn.turn_index().to_string(),
            self.state.removal_owed.to_string(),
            self.ai_enabled.to_string(),
            ai_color.to_string(),
        ];
        lines.extend(self.state.squares.iter().map(|s| s.code().to_string()));
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Parses the line-oriented text form.
    ///
    /// Blank lines are skipped. The number of positions is not checked here;
    /// the rules engine rejects a board of the wrong size on restore.
    #[instrument(skip(text))]
    pub fn parse(text: &str) -> Result<Self, SaveError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() < HEADER_LINES {
            return Err(SaveError::new(format!(
                "Expected at least {} lines, found {}",
                HEADER_LINES,
                lines.len()
            )));
        }

        let phase = parse_phase(lines[0])?;
        let turn = lines[1]
            .parse::<u8>()
            .ok()
            .and_then(Color::from_turn_index)
            .ok_or_else(|| SaveError::new(format!("Invalid turn '{}'", lines[1])))?;
        let removal_owed = parse_bool(lines[2])?;
        let ai_enabled = parse_bool(lines[3])?;
        let ai_color = parse_ai_color(lines[4])?;
        let squares = lines[HEADER_LINES..]
            .iter()
            .map(|line| parse_square(line))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(?phase, %turn, positions = squares.len(), "Parsed save record");
        Ok(Self::new(
            SavedState {
                phase,
                turn,
                removal_owed,
                squares,
            },
            ai_enabled,
            ai_color,
        ))
    }

    /// Reads and parses a save file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SaveError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SaveError::new(format!("Failed to read save file: {}", e)))?;
        let record = Self::parse(&text)?;
        info!("Save file loaded");
        Ok(record)
    }

    /// Writes the record to `path`, replacing any previous save.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn store(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        std::fs::write(path.as_ref(), self.to_text())
            .map_err(|e| SaveError::new(format!("Failed to write save file: {}", e)))?;
        info!("Game saved");
        Ok(())
    }
}

fn phase_code(phase: Phase) -> u8 {
    match phase {
        Phase::Placing | Phase::Removing { resume: Stage::Placing } => 0,
        Phase::Moving | Phase::Removing { .. } => 1,
        Phase::Terminal(Outcome::Winner(Color::Blue)) => 2,
        Phase::Terminal(Outcome::Winner(Color::Red)) => 3,
        Phase::Terminal(Outcome::Draw) => 4,
    }
}

fn parse_phase(line: &str) -> Result<Phase, SaveError> {
    match line {
        "0" => Ok(Phase::Placing),
        "1" => Ok(Phase::Moving),
        "2" => Ok(Phase::Terminal(Outcome::Winner(Color::Blue))),
        "3" => Ok(Phase::Terminal(Outcome::Winner(Color::Red))),
        "4" => Ok(Phase::Terminal(Outcome::Draw)),
        other => Err(SaveError::new(format!("Invalid phase code '{}'", other))),
    }
}

fn parse_bool(line: &str) -> Result<bool, SaveError> {
    if line.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if line.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(SaveError::new(format!("Expected true or false, found '{}'", line)))
    }
}

fn parse_ai_color(line: &str) -> Result<Option<Color>, SaveError> {
    let code: i32 = line
        .parse()
        .map_err(|_| SaveError::new(format!("Invalid AI color '{}'", line)))?;
    if code == NO_AI_COLOR {
        return Ok(None);
    }
    u8::try_from(code)
        .ok()
        .and_then(Color::from_code)
        .map(Some)
        .ok_or_else(|| SaveError::new(format!("Invalid AI color '{}'", line)))
}

fn parse_square(line: &str) -> Result<Square, SaveError> {
    line.parse::<u8>()
        .ok()
        .and_then(Square::from_code)
        .ok_or_else(|| SaveError::new(format!("Invalid square code '{}'", line)))
}

/// Save record error.
#[derive(Debug, Clone, Display, Error)]
#[display("Save error: {} at {}:{}", message, file, line)]
pub struct SaveError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SaveError {
    /// Creates a new save error.
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
    fn test_removing_is_stored_as_resume_phase() {
        assert_eq!(
            phase_code(Phase::Removing { resume: Stage::Moving }),
            1
        );
        assert_eq!(phase_code(Phase::Terminal(Outcome::Draw)), 4);
    }

    #[test]
    fn test_booleans_ignore_case() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(!parse_bool("False").unwrap());
        assert!(parse_bool("yes").is_err());
    }

    #[test]
    fn test_ai_color_sentinel() {
        assert_eq!(parse_ai_color("-1").unwrap(), None);
        assert_eq!(parse_ai_color("2").unwrap(), Some(Color::Red));
        assert!(parse_ai_color("0").is_err());
    }
}
