//! Hand-arranged starting boards.
//!
//! A setup lists one occupancy code per position (0 empty, 1 blue, 2 red),
//! separated by whitespace. A valid setup starts a game in the placing
//! phase with blue to move and each supply reduced by the pieces already on
//! the board.

use derive_more::{Display, Error};
use std::path::Path;
use strictly_morris_rules::{Color, Game, Phase, RulesConfig, SavedState, Square};
use tracing::{debug, info, instrument, warn};

/// Something wrong with a hand-arranged board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SetupProblem {
    /// More pieces of a color than its allowance.
    #[display("There are more than the allowed number of {} pieces.", color_name(*_0))]
    OverAllowance(Color),
    /// One side has at most one piece while the other has three or more.
    #[display("The {} player has too many pieces", color_name(*_0))]
    Lopsided(Color),
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::Blue => "blue",
        Color::Red => "red",
    }
}

/// Checks piece counts on a hand-arranged board.
///
/// Returns every problem found, in a fixed order: blue over allowance, red
/// over allowance, then at most one lopsided-count problem.
#[instrument(skip(squares))]
pub fn check_setup(squares: &[Square], allowance: usize) -> Vec<SetupProblem> {
    let count = |color: Color| squares.iter().filter(|s| s.is(color)).count();
    let blue = count(Color::Blue);
    let red = count(Color::Red);
    debug!(blue, red, "Counted setup pieces");

    let mut problems = Vec::new();
    if blue > allowance {
        problems.push(SetupProblem::OverAllowance(Color::Blue));
    }
    if red > allowance {
        problems.push(SetupProblem::OverAllowance(Color::Red));
    }
    if blue <= 1 && red >= 3 {
        problems.push(SetupProblem::Lopsided(Color::Red));
    } else if red <= 1 && blue >= 3 {
        problems.push(SetupProblem::Lopsided(Color::Blue));
    }
    problems
}

/// Parses whitespace-separated occupancy codes.
pub fn parse_setup(text: &str) -> Result<Vec<Square>, SetupError> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<u8>()
                .ok()
                .and_then(Square::from_code)
                .ok_or_else(|| SetupError::new(format!("Invalid square code '{}'", token)))
        })
        .collect()
}

/// Reads a setup file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_setup(path: impl AsRef<Path>) -> Result<Vec<Square>, SetupError> {
    let text = std::fs::read_to_string(path.as_ref())
        .map_err(|e| SetupError::new(format!("Failed to read setup file: {}", e)))?;
    parse_setup(&text)
}

/// Starts a game from a hand-arranged board with `first` to place.
///
/// # Errors
///
/// Fails when the board has the wrong number of positions or any
/// [`SetupProblem`] applies; the message lists every problem.
#[instrument(skip(config, squares))]
pub fn start_from_setup(
    config: RulesConfig,
    squares: Vec<Square>,
    first: Color,
) -> Result<Game, SetupError> {
    let expected = *config.rings() * strictly_morris_rules::RING_SIZE;
    if squares.len() != expected {
        return Err(SetupError::new(format!(
            "Expected {} positions, found {}",
            expected,
            squares.len()
        )));
    }

    let problems = check_setup(&squares, *config.pieces_per_player());
    if !problems.is_empty() {
        let message = problems
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        warn!(problems = problems.len(), "Rejected setup");
        return Err(SetupError::new(message));
    }

    let game = Game::restore(
        config,
        SavedState {
            phase: Phase::Placing,
            turn: first,
            removal_owed: false,
            squares,
        },
    )
    .map_err(|e| SetupError::new(e.to_string()))?;
    info!(phase = %game.phase(), "Game started from setup");
    Ok(game)
}

/// Setup error.
#[derive(Debug, Clone, Display, Error)]
#[display("Setup error: {} at {}:{}", message, file, line)]
pub struct SetupError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SetupError {
    /// Creates a new setup error.
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
