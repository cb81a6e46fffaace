//! Interactive play over a line-oriented input stream.

use crate::action::{Move, MoveError};
use crate::parser::{InputError, read_move};
use crate::scanner::Scanner;
use crate::typestate::{GameFinished, GameInProgress, GameResult};
use derive_more::{Display, Error, From};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Failures that end a session before the game is finished.
#[derive(Debug, Display, Error, From)]
pub enum PlayError {
    /// No further move could be read.
    #[display("failed to read a move")]
    Input(InputError),

    /// Game text could not be written.
    #[display("failed to write game output: {_0}")]
    Output(io::Error),

    /// The engine broke one of its own invariants.
    #[display("engine check failed")]
    Engine(MoveError),
}

/// Drives a game: renders the grid, prompts the player to move and applies
/// each move until every box is claimed.
///
/// Game text goes to `output`. Save results go to `diagnostics`.
#[derive(Debug)]
pub struct Session<R, W, E> {
    input: Scanner<R>,
    output: W,
    diagnostics: E,
}

impl<R: BufRead, W: Write, E: Write> Session<R, W, E> {
    /// Creates a session over the given streams.
    pub fn new(input: R, output: W, diagnostics: E) -> Self {
        Self {
            input: Scanner::new(input),
            output,
            diagnostics,
        }
    }

    /// Plays `game` to completion, then prints the final grid and winners.
    ///
    /// # Errors
    ///
    /// [`PlayError::Input`] if input runs out while a move is required.
    #[instrument(skip_all, fields(players = game.players().get(), empty = game.empty()))]
    pub fn run(&mut self, game: GameInProgress) -> Result<GameFinished, PlayError> {
        let mut game = game;
        loop {
            game = match game.finish() {
                GameResult::Finished(finished) => {
                    write!(self.output, "{}", finished.grid())?;
                    writeln!(self.output, "{}", finished.outcome())?;
                    self.output.flush()?;
                    return Ok(finished);
                }
                GameResult::InProgress(game) => game,
            };

            write!(self.output, "{}", game.grid())?;
            self.play_turn(&mut game)?;
        }
    }

    /// Prompts until the player to move draws a legal edge.
    fn play_turn(&mut self, game: &mut GameInProgress) -> Result<usize, PlayError> {
        loop {
            let player = game.to_move();
            write!(self.output, "{player}> ")?;
            self.output.flush()?;

            match read_move(&mut self.input, player).inspect_err(|e| debug!(%e, "No move read"))? {
                Move::Place(placement) => match game.place(placement) {
                    Ok(claimed) => return Ok(claimed),
                    Err(e @ MoveError::InvariantViolation(_)) => {
                        debug!(%e, "Engine invariant broken");
                        return Err(e.into());
                    }
                    Err(e) => debug!(%e, "Re-prompting"),
                },
                Move::Save(path) => self.save(game, &path)?,
                Move::Invalid => debug!("Re-prompting"),
            }
        }
    }

    fn save(&mut self, game: &GameInProgress, path: &Path) -> Result<(), PlayError> {
        match game.save(path) {
            Ok(()) => writeln!(self.diagnostics, "Save complete")?,
            Err(e) => {
                warn!(%e, "Save failed");
                writeln!(self.diagnostics, "Can not open file for write")?;
            }
        }
        self.diagnostics.flush()?;
        Ok(())
    }
}
