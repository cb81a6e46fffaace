//! Command-line interface for boxes.

use crate::error::Fatal;
use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Dots and boxes for two or more players at one terminal
#[derive(Parser, Debug)]
#[command(name = "boxes")]
#[command(about = "Dots and boxes for two or more players", long_about = None)]
#[command(override_usage = "boxes height width playercount [filename]")]
#[command(version, allow_negative_numbers = true)]
pub struct Cli {
    /// Rows of boxes (2-999)
    #[arg(allow_hyphen_values = true)]
    pub height: String,

    /// Columns of boxes (2-999)
    #[arg(allow_hyphen_values = true)]
    pub width: String,

    /// Number of players (2-100)
    #[arg(allow_hyphen_values = true)]
    pub players: String,

    /// Save file to resume from
    #[arg(allow_hyphen_values = true)]
    pub filename: Option<PathBuf>,
}

impl Cli {
    /// Parses the process arguments.
    ///
    /// `--help` and `--version` print and exit as usual. Any other argument
    /// error is a usage failure.
    #[instrument]
    pub fn parse_args() -> Result<Self, Fatal> {
        Self::parse_from_args(std::env::args_os())
    }

    /// Parses an explicit argument list, program name first.
    #[instrument(skip(args))]
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, Fatal>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
                kind => {
                    debug!(?kind, "Rejected arguments");
                    Err(Fatal::Usage)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_positionals() {
        let cli = Cli::parse_from_args(["boxes", "3", "4", "2"]).unwrap();
        assert_eq!((cli.height.as_str(), cli.width.as_str()), ("3", "4"));
        assert_eq!(cli.players, "2");
        assert!(cli.filename.is_none());
    }

    #[test]
    fn test_save_file_positional() {
        let cli = Cli::parse_from_args(["boxes", "3", "4", "2", "game.txt"]).unwrap();
        assert_eq!(cli.filename, Some(PathBuf::from("game.txt")));
    }

    #[test]
    fn test_hyphenated_save_file() {
        let cli = Cli::parse_from_args(["boxes", "3", "4", "2", "-game.txt"]).unwrap();
        assert_eq!(cli.filename, Some(PathBuf::from("-game.txt")));
    }

    #[test]
    fn test_wrong_argument_count_is_usage() {
        assert_eq!(Cli::parse_from_args(["boxes", "3", "4"]).unwrap_err(), Fatal::Usage);
        assert_eq!(
            Cli::parse_from_args(["boxes", "3", "4", "2", "a", "b"]).unwrap_err(),
            Fatal::Usage
        );
    }

    #[test]
    fn test_negative_values_reach_validation() {
        let cli = Cli::parse_from_args(["boxes", "-3", "4", "2"]).unwrap();
        assert_eq!(cli.height, "-3");
    }
}
