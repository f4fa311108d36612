//! Strictly Morris - terminal launcher
//!
//! Plays ring-based men's morris on the terminal, optionally against the
//! computer, and checks hand-arranged boards.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use strictly_morris::{
    AiSide, AppConfig, FirstPlayer, SaveRecord, TerminalSession, check_setup, load_setup, start_from_setup,
};
use strictly_morris_rules::{Color, Game};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            ai,
            first,
            seed,
            config,
            load,
            setup,
            save_path,
        } => run_play(ai, first, seed, config, load, setup, save_path),
        Command::CheckSetup { file, config } => run_check_setup(file, config),
    }
}

/// Loads the config file if one was given.
fn load_config(path: Option<PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => Ok(AppConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?),
        None => Ok(AppConfig::default()),
    }
}

/// Run an interactive game
#[instrument]
fn run_play(
    ai: Option<AiSide>,
    first: Option<FirstPlayer>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    load: Option<PathBuf>,
    setup: Option<PathBuf>,
    save_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(save_path) = save_path {
        config = config.with_save_path(save_path);
    }
    if ai.is_some() {
        config = config.with_ai(ai);
    }
    if let Some(first) = first {
        config = config.with_first_player(first);
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut ai_color: Option<Color> = (*config.ai()).map(|side| side.resolve(&mut rng));
    let opener = config.first_player().resolve(&mut rng);

    let game = if let Some(path) = load {
        let (state, ai_enabled, saved_color) = SaveRecord::load(&path)?.into_parts();
        if ai.is_none() && ai_enabled {
            ai_color = saved_color;
        }
        Game::restore(*config.rules(), state)?
    } else if let Some(path) = setup {
        start_from_setup(*config.rules(), load_setup(&path)?, opener)?
    } else {
        Game::with_first_player(*config.rules(), opener)
    };

    info!(?ai_color, phase = %game.phase(), "Starting game");
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = TerminalSession::new(
        game,
        ai_color,
        rng,
        config.save_path().clone(),
        stdin.lock(),
        stdout.lock(),
    );
    let outcome = session.run()?;
    debug!(?outcome, "Session ended");
    Ok(())
}

/// Validate a hand-arranged board
#[instrument]
fn run_check_setup(file: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config)?;
    let squares = load_setup(&file)?;
    let problems = check_setup(&squares, *config.rules().pieces_per_player());
    if problems.is_empty() {
        // Full check including board size
        start_from_setup(*config.rules(), squares, Color::Blue)?;
        println!("Setup is valid");
        return Ok(());
    }
    for problem in &problems {
        println!("{}", problem);
    }
    anyhow::bail!("{} problem(s) found in {}", problems.len(), file.display())
}
