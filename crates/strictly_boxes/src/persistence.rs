//! Plain-text save files.
//!
//! ```text
//! 2              next player, 1-based
//! 10             horizontal edges of printed row 0 (1 = drawn)
//! 111            vertical edges of printed row 1
//! 00             ... alternating down to the last horizontal row
//! 1,0            box owners per row, 0 = unclaimed
//! 0,0
//! ```
//!
//! Loading is strict: anything other than exactly this layout for the
//! configured grid size and player count is rejected.

use crate::scanner::Scanner;
use crate::typestate::{GameInProgress, GameSetup};
use crate::types::PlayerId;
use derive_more::{Display, Error, From};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Failure to resume a game from a save file.
#[derive(Debug, Display, Error, From)]
pub enum LoadError {
    /// The file could not be opened.
    #[display("cannot open save file {}: {source}", path.display())]
    Open {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The contents do not describe a game of the configured shape.
    #[display("malformed save file at line {line}: {reason}")]
    Malformed {
        /// 1-based line where the problem was found.
        line: usize,
        /// What was wrong.
        reason: &'static str,
    },

    /// Reading failed part way through.
    #[display("failed to read save file: {_0}")]
    #[from]
    Io(io::Error),
}

/// Failure to write a save file. The game itself is unaffected.
#[derive(Debug, Display, Error)]
pub enum SaveError {
    /// The destination could not be created.
    #[display("cannot create save file {}: {source}", path.display())]
    Create {
        /// Requested destination.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// Writing the contents failed.
    #[display("failed to write save file {}: {source}", path.display())]
    Write {
        /// Requested destination.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

/// Writes `game` to the file at `path`, replacing any existing file.
#[instrument(skip(game), fields(path = %path.as_ref().display()))]
pub fn save(game: &GameInProgress, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| {
        warn!(%source, "Cannot create save file");
        SaveError::Create {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let mut out = BufWriter::new(file);
    write_game(game, &mut out)
        .and_then(|()| out.flush())
        .map_err(|source| SaveError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    info!(to_move = %game.to_move(), "Game saved");
    Ok(())
}

/// Serializes `game` in save-file format.
pub fn write_game<W: Write>(game: &GameInProgress, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", game.to_move().number())?;

    let grid = game.grid();
    for (orientation, row) in grid.edge_rows() {
        let line: String = (0..grid.view(orientation).per_row())
            .map(|col| {
                let drawn = grid
                    .edge(orientation, row, col)
                    .is_some_and(|edge| grid.is_drawn(edge));
                if drawn { '1' } else { '0' }
            })
            .collect();
        writeln!(out, "{line}")?;
    }

    let dimensions = grid.dimensions();
    for row in 0..dimensions.height() {
        let owners = (0..dimensions.width())
            .map(|col| grid.box_owner(row, col).map_or(0, PlayerId::number).to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(out, "{owners}")?;
    }
    Ok(())
}

/// Opens the save file at `path` and restores it onto `setup`'s blank grid.
#[instrument(skip(setup), fields(path = %path.as_ref().display()))]
pub fn load(setup: GameSetup, path: impl AsRef<Path>) -> Result<GameInProgress, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let game = read_game(setup, BufReader::new(file))?;
    info!(
        to_move = %game.to_move(),
        empty = game.empty(),
        "Game resumed"
    );
    Ok(game)
}

/// Parses a save file from `reader` onto `setup`'s blank grid.
///
/// # Errors
///
/// [`LoadError::Malformed`] for any deviation from the format, including
/// trailing bytes after the last box row.
pub fn read_game<R: BufRead>(setup: GameSetup, reader: R) -> Result<GameInProgress, LoadError> {
    let mut game = setup.into_game();
    let mut loader = Loader {
        scanner: Scanner::new(reader),
        line: 1,
    };

    loader.read_next_player(&mut game)?;
    loader.read_edges(&mut game)?;
    loader.read_owners(&mut game)?;

    if loader.scanner.next_byte()?.is_some() {
        return Err(loader.malformed("unexpected data after the last box row"));
    }
    Ok(game)
}

struct Loader<R> {
    scanner: Scanner<R>,
    line: usize,
}

impl<R: BufRead> Loader<R> {
    fn malformed(&self, reason: &'static str) -> LoadError {
        debug!(line = self.line, reason, "Malformed save file");
        LoadError::Malformed {
            line: self.line,
            reason,
        }
    }

    fn end_line(&mut self, byte: Option<u8>, reason: &'static str) -> Result<(), LoadError> {
        if byte != Some(b'\n') {
            return Err(self.malformed(reason));
        }
        self.line += 1;
        Ok(())
    }

    fn read_next_player(&mut self, game: &mut GameInProgress) -> Result<(), LoadError> {
        let players = game.players();
        let number = self.scanner.read_number(players.get())?;
        game.to_move = number
            .value
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| players.player(index))
            .ok_or_else(|| self.malformed("next player is not in this game"))?;
        self.end_line(number.stop, "next player must end its line")
    }

    fn read_edges(&mut self, game: &mut GameInProgress) -> Result<(), LoadError> {
        for (orientation, row) in game.grid.edge_rows() {
            for col in 0..game.grid.view(orientation).per_row() {
                match self.scanner.next_byte()? {
                    Some(b'1') => {
                        if let Some(edge) = game.grid.edge(orientation, row, col) {
                            game.grid.draw(edge);
                        }
                    }
                    Some(b'0') => {}
                    _ => return Err(self.malformed("edges must be 0 or 1")),
                }
            }
            let stop = self.scanner.next_byte()?;
            self.end_line(stop, "edge row has the wrong length")?;
        }
        Ok(())
    }

    fn read_owners(&mut self, game: &mut GameInProgress) -> Result<(), LoadError> {
        let players = game.players();
        let dimensions = game.grid.dimensions();
        for row in 0..dimensions.height() {
            for col in 0..dimensions.width() {
                let number = self.scanner.read_number(players.get())?;
                let Some(owner) = number.value else {
                    return Err(self.malformed("box owner must be a number"));
                };

                let last = col + 1 == dimensions.width();
                match (last, number.stop) {
                    (false, Some(b',')) => {}
                    (true, stop) => self.end_line(stop, "box row has the wrong length")?,
                    (false, _) => return Err(self.malformed("box owners must be separated by commas")),
                }

                if let Some(index) = owner.checked_sub(1) {
                    let player = players
                        .player(index)
                        .ok_or_else(|| self.malformed("box owner is not in this game"))?;
                    if !game.restore_claim(row, col, player) {
                        return Err(self.malformed("box owner cannot be restored"));
                    }
                }
            }
        }
        Ok(())
    }
}
