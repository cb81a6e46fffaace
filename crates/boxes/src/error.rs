//! Fatal errors and their exit codes.

use crate::config::ConfigError;
use derive_more::{Display, Error};
use strictly_boxes::{InputError, LoadError, PlayError, SetupError};

/// A failure that ends the program with a fixed message and exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum Fatal {
    /// Wrong number of arguments.
    #[display("Usage: boxes height width playercount [filename]")]
    Usage,

    /// Height or width is not a number in 2..=999.
    #[display("Invalid grid dimensions")]
    Dimensions,

    /// Player count is not a number in 2..=100.
    #[display("Invalid player count")]
    Players,

    /// The save file could not be opened.
    #[display("Invalid grid file")]
    NoFile,

    /// The save file does not describe a game of this shape.
    #[display("Error reading grid contents")]
    Load,

    /// Input ran out while a move was required.
    #[display("End of user input")]
    EndOfInput,

    /// Allocation or output failure.
    #[display("System call failure")]
    System,
}

impl Fatal {
    /// Process exit code.
    pub fn code(self) -> u8 {
        match self {
            Fatal::Usage => 1,
            Fatal::Dimensions => 2,
            Fatal::Players => 3,
            Fatal::NoFile => 4,
            Fatal::Load => 5,
            Fatal::EndOfInput => 6,
            Fatal::System => 9,
        }
    }
}

impl From<&ConfigError> for Fatal {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::Dimension(_) => Fatal::Dimensions,
            ConfigError::Players(_) => Fatal::Players,
        }
    }
}

impl From<&SetupError> for Fatal {
    fn from(err: &SetupError) -> Self {
        match err {
            SetupError::Dimensions { .. } => Fatal::Dimensions,
            SetupError::Players(_) => Fatal::Players,
            SetupError::Allocation(_) => Fatal::System,
        }
    }
}

impl From<&LoadError> for Fatal {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::Open { .. } => Fatal::NoFile,
            LoadError::Malformed { .. } | LoadError::Io(_) => Fatal::Load,
        }
    }
}

impl From<&PlayError> for Fatal {
    fn from(err: &PlayError) -> Self {
        match err {
            PlayError::Input(InputError::Exhausted) => Fatal::EndOfInput,
            PlayError::Input(InputError::Io(_)) => Fatal::EndOfInput,
            PlayError::Output(_) | PlayError::Engine(_) => Fatal::System,
        }
    }
}

/// Wraps `err` with the [`Fatal`] it maps to, so it can be recovered by
/// downcasting the resulting [`anyhow::Error`].
pub fn fatal<E>(err: E) -> anyhow::Error
where
    E: std::error::Error + Send + Sync + 'static,
    for<'a> Fatal: From<&'a E>,
{
    let kind = Fatal::from(&err);
    anyhow::Error::new(err).context(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Fatal::Usage.code(), 1);
        assert_eq!(Fatal::Dimensions.code(), 2);
        assert_eq!(Fatal::Players.code(), 3);
        assert_eq!(Fatal::NoFile.code(), 4);
        assert_eq!(Fatal::Load.code(), 5);
        assert_eq!(Fatal::EndOfInput.code(), 6);
        assert_eq!(Fatal::System.code(), 9);
    }

    #[test]
    fn test_load_errors() {
        let open = LoadError::Open {
            path: "missing".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let malformed = LoadError::Malformed {
            line: 3,
            reason: "edges must be 0 or 1",
        };
        assert_eq!(Fatal::from(&open), Fatal::NoFile);
        assert_eq!(Fatal::from(&malformed), Fatal::Load);
    }

    #[test]
    fn test_fatal_survives_anyhow() {
        let err = fatal(PlayError::Input(InputError::Exhausted));
        assert_eq!(err.downcast_ref::<Fatal>(), Some(&Fatal::EndOfInput));
        assert_eq!(err.to_string(), "End of user input");
        assert_eq!(
            format!("{err:#}"),
            "End of user input: failed to read a move: end of user input"
        );
    }
}
