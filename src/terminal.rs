//! Line-oriented terminal game loop.
//!
//! Reads commands from any [`BufRead`] and writes the board and messages to
//! any [`Write`], so sessions can be scripted in tests.

use crate::save::SaveRecord;
use anyhow::Result;
use rand::rngs::StdRng;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use strictly_morris_rules::ai::propose_action;
use strictly_morris_rules::{
    Action, ActionError, Board, Color, Game, Layout, Outcome, Phase, Square, Transition,
};
use tracing::{debug, info, instrument, warn};

/// A command typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place or remove at a position, depending on the phase.
    Select(usize),
    /// Move a piece.
    Move(usize, usize),
    /// Let the computer make the current move.
    Ai,
    /// Save the game.
    Save,
    /// Redraw the board.
    Board,
    /// Show the command list.
    Help,
    /// Leave the game.
    Quit,
}

impl Command {
    /// Parses one input line.
    pub fn parse(line: &str) -> Option<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["ai"] => Some(Command::Ai),
            ["save"] => Some(Command::Save),
            ["board"] => Some(Command::Board),
            ["help" | "?"] => Some(Command::Help),
            ["quit" | "exit" | "q"] => Some(Command::Quit),
            [position] => position.parse().ok().map(Command::Select),
            [source, target] => Some(Command::Move(source.parse().ok()?, target.parse().ok()?)),
            _ => None,
        }
    }
}

const HELP: &str = "\
Commands:
  <n>        place a piece at n, or remove the piece at n after a mill
  <a> <b>    move your piece from a to b
  ai         let the computer make this move
  save       save the game
  board      show the board
  quit       leave the game";

/// An interactive game on a terminal.
pub struct TerminalSession<R, W> {
    game: Game,
    ai: Option<Color>,
    rng: StdRng,
    save_path: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalSession<R, W> {
    /// Creates a session over `input` and `output`.
    pub fn new(
        game: Game,
        ai: Option<Color>,
        rng: StdRng,
        save_path: PathBuf,
        input: R,
        output: W,
    ) -> Self {
        Self {
            game,
            ai,
            rng,
            save_path,
            input,
            output,
        }
    }

    /// The game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays until the game ends, the user quits, or input runs out.
    ///
    /// Returns the outcome of a finished game.
    #[instrument(skip(self), fields(ai = ?self.ai))]
    pub fn run(&mut self) -> Result<Option<Outcome>> {
        writeln!(self.output, "{}", HELP)?;
        self.show_board()?;

        let mut line = String::new();
        loop {
            if let Some(outcome) = self.game.outcome() {
                writeln!(self.output, "{}", outcome)?;
                info!(%outcome, "Session finished");
                return Ok(Some(outcome));
            }

            if self.ai == Some(self.game.turn()) {
                if !self.play_ai()? {
                    return Ok(None);
                }
                continue;
            }

            write!(self.output, "{} - {}> ", self.game.turn(), self.game.phase())?;
            self.output.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("Input closed");
                return Ok(None);
            }

            match Command::parse(&line) {
                Some(Command::Quit) => return Ok(None),
                Some(command) => self.execute(command)?,
                None => writeln!(self.output, "Unknown command. Type 'help' for the list.")?,
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Select(position) => {
                let action = match self.game.phase() {
                    Phase::Removing { .. } => Action::Remove(position),
                    Phase::Moving => {
                        writeln!(self.output, "Pick a piece and a destination: <a> <b>")?;
                        return Ok(());
                    }
                    _ => Action::Place(position),
                };
                self.apply(action)
            }
            Command::Move(source, target) => self.apply(Action::Move { source, target }),
            Command::Ai => self.play_ai().map(|_| ()),
            Command::Save => self.save(),
            Command::Board => self.show_board(),
            Command::Help => Ok(writeln!(self.output, "{}", HELP)?),
            Command::Quit => Ok(()),
        }
    }

    /// Lets the computer act for the player to move; false if it could not.
    fn play_ai(&mut self) -> Result<bool> {
        let Some(action) = propose_action(&self.game, &mut self.rng) else {
            warn!(turn = %self.game.turn(), "Computer found no action");
            writeln!(self.output, "The computer has no move.")?;
            return Ok(false);
        };
        writeln!(self.output, "{} plays: {}", self.game.turn(), action)?;
        self.apply(action)?;
        Ok(true)
    }

    fn apply(&mut self, action: Action) -> Result<()> {
        let mover = self.game.turn();
        match self.game.apply(action) {
            Ok(Transition::MillFormed(mill)) => {
                self.show_board()?;
                writeln!(
                    self.output,
                    "Mill {}! {} removes a {} piece.",
                    mill,
                    mover,
                    mover.opponent()
                )?;
            }
            Ok(Transition::Cancelled) => writeln!(self.output, "Selection cancelled.")?,
            Ok(Transition::Continued | Transition::Finished(_)) => self.show_board()?,
            Err(ActionError::InvariantViolation(message)) => {
                anyhow::bail!("Internal rule violation: {}", message)
            }
            Err(err) => writeln!(self.output, "{}", err)?,
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let record = SaveRecord::new(self.game.saved_state(), self.ai.is_some(), self.ai);
        match record.store(&self.save_path) {
            Ok(()) => writeln!(self.output, "Saved to {}", self.save_path.display())?,
            Err(err) => writeln!(self.output, "{}", err.message)?,
        }
        Ok(())
    }

    fn show_board(&mut self) -> Result<()> {
        write!(self.output, "{}", render_board(self.game.board()))?;
        writeln!(
            self.output,
            "Blue in hand: {}  Red in hand: {}",
            self.game.player(Color::Blue).remaining_to_place(),
            self.game.player(Color::Red).remaining_to_place()
        )?;
        Ok(())
    }
}

/// Grid cell of `position`: ring `r` sits `rings - r` cells from the center.
fn cell(rings: usize, position: usize) -> (usize, usize) {
    let center = rings as isize;
    let d = (rings - Layout::ring(position)) as isize;
    let (dx, dy) = match Layout::slot(position) {
        0 => (0, -d),
        1 => (d, -d),
        2 => (d, 0),
        3 => (d, d),
        4 => (0, d),
        5 => (-d, d),
        6 => (-d, 0),
        _ => (-d, -d),
    };
    ((center + dx) as usize, (center + dy) as usize)
}

/// Draws the board beside a grid of position numbers.
pub fn render_board(board: &Board) -> String {
    let layout = board.layout();
    let size = 2 * layout.rings() + 1;
    let mut pieces = vec![vec!["   ".to_string(); size]; size];
    let mut labels = pieces.clone();

    for position in layout.positions() {
        let (x, y) = cell(layout.rings(), position);
        let symbol = match board.get(position) {
            Some(Square::Occupied(Color::Blue)) => "B",
            Some(Square::Occupied(Color::Red)) => "R",
            _ => ".",
        };
        pieces[y][x] = format!(" {} ", symbol);
        labels[y][x] = format!("{:>3}", position);
    }

    let mut out = String::new();
    for (piece_row, label_row) in pieces.iter().zip(&labels) {
        out.push_str(piece_row.concat().trim_end());
        let padding = 3 * size - piece_row.concat().trim_end().len();
        out.push_str(&" ".repeat(padding + 4));
        out.push_str(label_row.concat().trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("4\n"), Some(Command::Select(4)));
        assert_eq!(Command::parse(" 3  11 "), Some(Command::Move(3, 11)));
        assert_eq!(Command::parse("save"), Some(Command::Save));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("4 x"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_cells_form_nested_squares() {
        assert_eq!(cell(2, 7), (0, 0));
        assert_eq!(cell(2, 0), (2, 0));
        assert_eq!(cell(2, 3), (4, 4));
        assert_eq!(cell(2, 8), (2, 1));
        assert_eq!(cell(2, 14), (1, 2));
    }

    #[test]
    fn test_render_single_ring() {
        let mut board = Board::new(1);
        board.set_occupancy(0, Square::Occupied(Color::Blue));
        board.set_occupancy(4, Square::Occupied(Color::Red));
        let rendered = render_board(&board);
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with(" .  B  ."));
        assert!(rows[1].starts_with(" .     ."));
        assert!(rows[2].starts_with(" .  R  ."));
        assert!(rows[0].ends_with("7  0  1"));
    }
}
