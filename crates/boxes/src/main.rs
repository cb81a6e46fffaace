//! Boxes - dots and boxes at the terminal
//!
//! Reads one move per line from stdin and draws the grid on stdout.

#![warn(missing_docs)]

mod cli;
mod config;
mod error;

use anyhow::Result;
use cli::Cli;
use config::GameConfig;
use error::{Fatal, fatal};
use std::io;
use std::process::ExitCode;
use strictly_boxes::{GameSetup, Session};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries only game text
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = err.downcast_ref::<Fatal>().copied().unwrap_or(Fatal::System);
            debug!(error = %format!("{err:#}"), code = kind.code(), "Fatal error");
            eprintln!("{kind}");
            ExitCode::from(kind.code())
        }
    }
}

/// Validates arguments, sets up or resumes a game and plays it out.
#[instrument]
fn run() -> Result<()> {
    let cli = Cli::parse_args()?;
    let config = GameConfig::from_cli(cli).map_err(fatal)?;

    let setup = GameSetup::new(*config.dimensions(), *config.players()).map_err(fatal)?;
    let game = match config.save_file() {
        Some(path) => setup.resume(path).map_err(fatal)?,
        None => setup.start(),
    };

    let finished = Session::new(io::stdin().lock(), io::stdout().lock(), io::stderr())
        .run(game)
        .map_err(fatal)?;
    info!(outcome = %finished.outcome(), "Game over");
    Ok(())
}
