//! Core domain types for dots and boxes.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Smallest number of players in a game.
pub const MIN_PLAYERS: usize = 2;

/// Largest number of players in a game.
///
/// Player letters are `'A' + index`, so the last player is shown as the
/// Latin-1 character `'A' + 99`.
pub const MAX_PLAYERS: usize = 100;

/// Smallest grid height or width, in boxes.
pub const MIN_DIMENSION: usize = 2;

/// Largest grid height or width, in boxes.
pub const MAX_DIMENSION: usize = 999;

/// A player, identified by its 0-based turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who moves first in a fresh game.
    pub const FIRST: PlayerId = PlayerId(0);

    /// Creates a player id from a 0-based index.
    ///
    /// Returns `None` when the index is at or above [`MAX_PLAYERS`].
    pub fn new(index: usize) -> Option<Self> {
        (index < MAX_PLAYERS).then(|| Self(index as u8))
    }

    /// Returns the 0-based index.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Returns the 1-based number used in save files.
    pub fn number(self) -> usize {
        self.index() + 1
    }

    /// Returns the letter shown in prompts and on claimed boxes.
    pub fn letter(self) -> char {
        char::from(b'A' + self.0)
    }

    /// Returns the player who moves after this one.
    pub fn next(self, players: PlayerCount) -> Self {
        Self(((self.index() + 1) % players.get()) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Number of players taking part in a game (2..=100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerCount(u8);

impl PlayerCount {
    /// Validates a player count.
    #[instrument]
    pub fn new(players: usize) -> Result<Self, SetupError> {
        if (MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            Ok(Self(players as u8))
        } else {
            Err(SetupError::Players(players))
        }
    }

    /// Returns the count.
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    /// Returns the player with the given 0-based index, if it takes part.
    pub fn player(self, index: usize) -> Option<PlayerId> {
        if index < self.get() {
            PlayerId::new(index)
        } else {
            None
        }
    }
}

/// Grid size in boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    height: usize,
    width: usize,
}

impl Dimensions {
    /// Validates a grid size; both sides must lie in 2..=999.
    #[instrument]
    pub fn new(height: usize, width: usize) -> Result<Self, SetupError> {
        let valid = MIN_DIMENSION..=MAX_DIMENSION;
        if valid.contains(&height) && valid.contains(&width) {
            Ok(Self { height, width })
        } else {
            Err(SetupError::Dimensions { height, width })
        }
    }

    /// Rows of boxes.
    pub fn height(self) -> usize {
        self.height
    }

    /// Columns of boxes.
    pub fn width(self) -> usize {
        self.width
    }

    /// Total number of boxes.
    pub fn boxes(self) -> usize {
        self.height * self.width
    }
}

/// Errors raised while setting up a game.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SetupError {
    /// Height or width outside 2..=999.
    #[display("grid dimensions {height}x{width} are outside {}..={}", MIN_DIMENSION, MAX_DIMENSION)]
    Dimensions {
        /// Requested height.
        height: usize,
        /// Requested width.
        width: usize,
    },

    /// Player count outside 2..=100.
    #[display("player count {_0} is outside {}..={}", MIN_PLAYERS, MAX_PLAYERS)]
    Players(#[error(not(source))] usize),

    /// The grid buffer could not be allocated.
    #[display("unable to allocate a grid of {_0} cells")]
    Allocation(#[error(not(source))] usize),
}
