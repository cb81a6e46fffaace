//! Phase-specific typestate structs for dots and boxes.
//!
//! Each phase is its own type. A [`GameFinished`] always carries an
//! [`Outcome`], and only a [`GameInProgress`] accepts placements.

use crate::action::{MoveError, Placement};
use crate::contracts::{Contract, PlacementContract};
use crate::grid::Grid;
use crate::persistence::{self, LoadError, SaveError};
use crate::phases::Outcome;
use crate::rules;
use crate::types::{Dimensions, PlayerCount, PlayerId, SetupError};
use std::path::Path;
use tracing::{debug, info, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase: a blank grid and a validated player count.
#[derive(Debug, Clone)]
pub struct GameSetup {
    grid: Grid,
    players: PlayerCount,
}

impl GameSetup {
    /// Allocates the grid for a new game.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Allocation`] if the grid cannot be allocated.
    #[instrument]
    pub fn new(dimensions: Dimensions, players: PlayerCount) -> Result<Self, SetupError> {
        Ok(Self {
            grid: Grid::new(dimensions)?,
            players,
        })
    }

    /// Returns the (blank) grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the number of players.
    pub fn players(&self) -> PlayerCount {
        self.players
    }

    /// Starts a fresh game; player `A` moves first.
    #[instrument(skip(self))]
    pub fn start(self) -> GameInProgress {
        let dimensions = self.grid.dimensions();
        info!(
            height = dimensions.height(),
            width = dimensions.width(),
            players = self.players.get(),
            "Starting new game"
        );
        self.into_game()
    }

    pub(crate) fn into_game(self) -> GameInProgress {
        let dimensions = self.grid.dimensions();
        GameInProgress {
            empty: dimensions.boxes(),
            scores: vec![0; self.players.get()],
            grid: self.grid,
            players: self.players,
            to_move: PlayerId::FIRST,
        }
    }

    /// Resumes a game from a save file.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the file cannot be opened or does not
    /// describe a game of this size and player count.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn resume(self, path: impl AsRef<Path>) -> Result<GameInProgress, LoadError> {
        persistence::load(self, path)
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress: accepts placements until every box is claimed.
#[derive(Debug, Clone)]
pub struct GameInProgress {
    pub(crate) grid: Grid,
    pub(crate) players: PlayerCount,
    pub(crate) to_move: PlayerId,
    pub(crate) empty: usize,
    pub(crate) scores: Vec<usize>,
}

impl GameInProgress {
    /// Draws an edge and claims any boxes it completes.
    ///
    /// Returns the number of boxes claimed. A rejected placement leaves the
    /// game untouched and the same player to move.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always (`LegalPlacement`)
    /// - Postconditions checked in debug builds only, against a snapshot of
    ///   the cells around the edge
    ///
    /// # Errors
    ///
    /// [`MoveError::WrongPlayer`], [`MoveError::OutOfBounds`] or
    /// [`MoveError::AlreadyDrawn`] when the placement is not legal.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn place(&mut self, placement: Placement) -> Result<usize, MoveError> {
        PlacementContract::pre(self, &placement)?;

        let edge = self
            .grid
            .edge(placement.orientation, placement.row, placement.col)
            .ok_or(MoveError::OutOfBounds(placement))?;

        #[cfg(debug_assertions)]
        let before = crate::contracts::PlacementSnapshot::capture(self, edge);

        self.grid.draw(edge);

        let claimed = self.grid.claim_beside(edge, placement.player);
        self.scores[placement.player.index()] += claimed;
        self.empty -= claimed;
        self.to_move = rules::next_to_move(placement.player, self.players, claimed);
        debug!(claimed, empty = self.empty, next = %self.to_move, "Edge drawn");

        #[cfg(debug_assertions)]
        PlacementContract::post_placement(&before, self, &placement, claimed)?;

        Ok(claimed)
    }

    /// Returns the player whose move is being requested.
    pub fn to_move(&self) -> PlayerId {
        self.to_move
    }

    /// Returns the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the number of players.
    pub fn players(&self) -> PlayerCount {
        self.players
    }

    /// Scores indexed by player.
    pub fn scores(&self) -> &[usize] {
        &self.scores
    }

    /// Number of boxes not yet claimed.
    pub fn empty(&self) -> usize {
        self.empty
    }

    /// Whether every box has been claimed.
    pub fn is_over(&self) -> bool {
        self.empty == 0
    }

    /// Writes the game to a save file.
    ///
    /// # Errors
    ///
    /// Returns a [`SaveError`] if the file cannot be created or written.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        persistence::save(self, path)
    }

    /// Moves to the finished phase once every box is claimed.
    #[instrument(skip(self), fields(empty = self.empty))]
    pub fn finish(self) -> GameResult {
        if !self.is_over() {
            return GameResult::InProgress(self);
        }
        let outcome = Outcome::new(rules::winners(&self.scores));
        info!(%outcome, "Game finished");
        GameResult::Finished(GameFinished {
            grid: self.grid,
            scores: self.scores,
            outcome,
        })
    }

    /// Claims a box while restoring a saved game.
    pub(crate) fn restore_claim(&mut self, row: usize, col: usize, player: PlayerId) -> bool {
        if !self.grid.set_owner(row, col, player) {
            return false;
        }
        self.scores[player.index()] += 1;
        self.empty -= 1;
        true
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished: every box is claimed and the outcome is known.
#[derive(Debug, Clone)]
pub struct GameFinished {
    grid: Grid,
    scores: Vec<usize>,
    outcome: Outcome,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the final grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Final scores indexed by player.
    pub fn scores(&self) -> &[usize] {
        &self.scores
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of [`GameInProgress::finish`].
#[derive(Debug)]
pub enum GameResult {
    /// Boxes remain.
    InProgress(GameInProgress),
    /// Every box is claimed.
    Finished(GameFinished),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Orientation::{Horizontal, Vertical};

    fn new_game(players: usize) -> GameInProgress {
        GameSetup::new(
            Dimensions::new(2, 2).unwrap(),
            PlayerCount::new(players).unwrap(),
        )
        .unwrap()
        .start()
    }

    fn place(
        game: &mut GameInProgress,
        orientation: crate::grid::Orientation,
        row: usize,
        col: usize,
    ) -> Result<usize, MoveError> {
        let placement = Placement::new(game.to_move(), row, col, orientation);
        game.place(placement)
    }

    #[test]
    fn test_fresh_game_state() {
        let game = new_game(3);
        assert_eq!(game.to_move(), PlayerId::FIRST);
        assert_eq!(game.empty(), 4);
        assert_eq!(game.scores(), &[0, 0, 0]);
        assert!(!game.is_over());
    }

    #[test]
    fn test_turn_advances_without_claim() {
        let mut game = new_game(3);
        assert_eq!(place(&mut game, Horizontal, 0, 0), Ok(0));
        assert_eq!(game.to_move().index(), 1);
        assert_eq!(place(&mut game, Horizontal, 0, 1), Ok(0));
        assert_eq!(place(&mut game, Vertical, 0, 0), Ok(0));
        assert_eq!(game.to_move(), PlayerId::FIRST);
    }

    #[test]
    fn test_claim_keeps_turn_and_scores() {
        let mut game = new_game(2);
        place(&mut game, Horizontal, 0, 0).unwrap();
        place(&mut game, Horizontal, 1, 0).unwrap();
        place(&mut game, Vertical, 0, 0).unwrap();
        let b = game.to_move();
        assert_eq!(b.index(), 1);
        assert_eq!(place(&mut game, Vertical, 0, 1), Ok(1));
        assert_eq!(game.to_move(), b);
        assert_eq!(game.scores(), &[0, 1]);
        assert_eq!(game.empty(), 3);
    }

    #[test]
    fn test_restore_claim_refuses_owned_box() {
        let mut game = new_game(2);
        let b = PlayerId::new(1).unwrap();
        assert!(game.restore_claim(0, 1, b));
        assert!(!game.restore_claim(0, 1, PlayerId::FIRST));
        assert!(!game.restore_claim(2, 0, b));
        assert_eq!(game.grid().box_owner(0, 1), Some(b));
        assert_eq!(game.scores(), &[0, 1]);
        assert_eq!(game.empty(), 3);
    }

    #[test]
    fn test_rejected_placement_changes_nothing() {
        let mut game = new_game(2);
        place(&mut game, Vertical, 1, 2).unwrap();
        let snapshot = game.clone();

        assert!(matches!(
            place(&mut game, Vertical, 1, 2),
            Err(MoveError::AlreadyDrawn(_))
        ));
        assert!(matches!(
            place(&mut game, Vertical, 2, 0),
            Err(MoveError::OutOfBounds(_))
        ));
        assert!(matches!(
            place(&mut game, Horizontal, 0, 2),
            Err(MoveError::OutOfBounds(_))
        ));

        assert_eq!(game.grid(), snapshot.grid());
        assert_eq!(game.to_move(), snapshot.to_move());
        assert_eq!(game.scores(), snapshot.scores());
    }

    #[test]
    fn test_finish_requires_all_boxes() {
        let game = new_game(2);
        assert!(matches!(game.finish(), GameResult::InProgress(_)));
    }
}
