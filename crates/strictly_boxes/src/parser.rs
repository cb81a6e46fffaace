//! Line-oriented move parser.
//!
//! Grammar, one move per line:
//!
//! ```text
//! <row> <col> h|v      draw an edge
//! w <path>             save the game
//! ```
//!
//! End of input counts as a line terminator, except on the very first byte
//! of a line, where it means no move can ever be read again.

use crate::action::{Move, Placement};
use crate::grid::Orientation;
use crate::scanner::{Scanner, is_line_end};
use crate::types::{MAX_DIMENSION, PlayerId};
use derive_more::{Display, Error, From};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Largest row or column number accepted in a move.
pub const MAX_COORDINATE: usize = MAX_DIMENSION;

/// Longest save path accepted, in bytes.
pub const MAX_SAVE_PATH_LEN: usize = 4094;

/// Input failures that end the game.
#[derive(Debug, Display, Error, From)]
pub enum InputError {
    /// Input ended where a move was required.
    #[display("end of user input")]
    Exhausted,

    /// The input stream failed.
    #[display("failed to read input: {_0}")]
    #[from]
    Io(io::Error),
}

#[derive(Debug)]
enum ParseState {
    AwaitingRow,
    AwaitingCol { row: usize },
    AwaitingOrientation { row: usize, col: usize },
    AwaitingEnd(Placement),
    AwaitingSavePath,
    Invalid(Option<u8>),
}

/// Reads one line of input as a move for `player`.
///
/// Malformed lines are consumed up to their terminator and reported as
/// [`Move::Invalid`].
///
/// # Errors
///
/// [`InputError::Exhausted`] if input ends before the line's first byte.
#[instrument(skip(scanner))]
pub fn read_move<R: BufRead>(
    scanner: &mut Scanner<R>,
    player: PlayerId,
) -> Result<Move, InputError> {
    let mut state = ParseState::AwaitingRow;
    loop {
        state = match state {
            ParseState::AwaitingRow => {
                let number = scanner.read_number(MAX_COORDINATE)?;
                match (number.value, number.stop) {
                    (None, None) => return Err(InputError::Exhausted),
                    (None, Some(b'w')) => match scanner.next_byte()? {
                        Some(b' ') => ParseState::AwaitingSavePath,
                        other => ParseState::Invalid(other),
                    },
                    (Some(row), Some(b' ')) => ParseState::AwaitingCol { row },
                    (_, stop) => ParseState::Invalid(stop),
                }
            }
            ParseState::AwaitingCol { row } => {
                let number = scanner.read_number(MAX_COORDINATE)?;
                match (number.value, number.stop) {
                    (Some(col), Some(b' ')) => ParseState::AwaitingOrientation { row, col },
                    (_, stop) => ParseState::Invalid(stop),
                }
            }
            ParseState::AwaitingOrientation { row, col } => {
                let byte = scanner.next_byte()?;
                match byte.and_then(Orientation::from_code) {
                    Some(orientation) => {
                        ParseState::AwaitingEnd(Placement::new(player, row, col, orientation))
                    }
                    None => ParseState::Invalid(byte),
                }
            }
            ParseState::AwaitingEnd(placement) => {
                let byte = scanner.next_byte()?;
                if is_line_end(byte) {
                    debug!(%placement, "Read placement");
                    return Ok(Move::Place(placement));
                }
                ParseState::Invalid(byte)
            }
            ParseState::AwaitingSavePath => return read_save_path(scanner),
            ParseState::Invalid(stop) => {
                scanner.skip_line(stop)?;
                debug!("Discarded malformed move");
                return Ok(Move::Invalid);
            }
        };
    }
}

fn read_save_path<R: BufRead>(scanner: &mut Scanner<R>) -> Result<Move, InputError> {
    let mut path = Vec::new();
    loop {
        let byte = scanner.next_byte()?;
        match byte {
            None | Some(b'\n') => break,
            Some(_) if path.len() == MAX_SAVE_PATH_LEN => {
                scanner.skip_line(byte)?;
                debug!("Save path too long");
                return Ok(Move::Invalid);
            }
            Some(b) => path.push(b),
        }
    }

    if path.is_empty() {
        return Ok(Move::Invalid);
    }
    match String::from_utf8(path) {
        Ok(path) => Ok(Move::Save(PathBuf::from(path))),
        Err(_) => {
            debug!("Save path is not valid UTF-8");
            Ok(Move::Invalid)
        }
    }
}
