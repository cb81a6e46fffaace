//! Validated startup configuration.

use crate::cli::Cli;
use derive_getters::Getters;
use derive_more::{Display, Error};
use std::path::PathBuf;
use strictly_boxes::{Dimensions, PlayerCount};
use tracing::{debug, instrument};

/// Game settings taken from the command line.
#[derive(Debug, Clone, Getters)]
pub struct GameConfig {
    /// Grid size in boxes.
    dimensions: Dimensions,

    /// Number of players.
    players: PlayerCount,

    /// Save file to resume from, if any.
    save_file: Option<PathBuf>,
}

impl GameConfig {
    /// Validates the raw arguments.
    ///
    /// Height and width are checked before the player count.
    #[instrument(skip(cli), fields(height = %cli.height, width = %cli.width, players = %cli.players))]
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let height = parse_count(&cli.height).ok_or_else(|| ConfigError::Dimension(cli.height))?;
        let width = parse_count(&cli.width).ok_or_else(|| ConfigError::Dimension(cli.width))?;
        let dimensions = Dimensions::new(height, width).map_err(|e| {
            debug!(%e, "Dimensions out of range");
            ConfigError::Dimension(format!("{height}x{width}"))
        })?;

        let count = parse_count(&cli.players).ok_or_else(|| ConfigError::Players(cli.players.clone()))?;
        let players = PlayerCount::new(count).map_err(|e| {
            debug!(%e, "Player count out of range");
            ConfigError::Players(cli.players)
        })?;

        Ok(Self {
            dimensions,
            players,
            save_file: cli.filename,
        })
    }
}

/// Invalid command-line values.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    /// Height or width is not a number in range.
    #[display("invalid grid dimension: {_0}")]
    Dimension(#[error(not(source))] String),

    /// Player count is not a number in range.
    #[display("invalid player count: {_0}")]
    Players(#[error(not(source))] String),
}

/// Parses a decimal argument the way `strtol` does: leading whitespace and
/// a sign are allowed, trailing characters are not.
///
/// Negative values yield `None`, as do values too large for `usize`.
fn parse_count(text: &str) -> Option<usize> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = digits
        .bytes()
        .try_fold(0usize, |acc, b| acc.checked_mul(10)?.checked_add(usize::from(b - b'0')))?;
    (!negative || value == 0).then_some(value)
}
