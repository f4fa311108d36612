//! Command-line interface for strictly_morris.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_morris::{AiSide, FirstPlayer};

/// Strictly Morris - ring-based men's morris in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_morris")]
#[command(about = "Play ring-based men's morris in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Let the computer play a side
        #[arg(long, value_enum)]
        ai: Option<AiSide>,

        /// Who places first (overrides the config file)
        #[arg(long, value_enum)]
        first: Option<FirstPlayer>,

        /// Seed for the computer's random choices and the opening coin flip
        #[arg(long)]
        seed: Option<u64>,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Resume a saved game
        #[arg(long, conflicts_with = "setup")]
        load: Option<PathBuf>,

        /// Start from a hand-arranged board
        #[arg(long)]
        setup: Option<PathBuf>,

        /// Where the `save` command writes (overrides the config file)
        #[arg(long)]
        save_path: Option<PathBuf>,
    },

    /// Validate a hand-arranged board without playing it
    CheckSetup {
        /// Setup file: one occupancy code per position (0 empty, 1 blue, 2 red)
        file: PathBuf,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
