//! First-class move types for dots and boxes.
//!
//! A line of player input becomes exactly one [`Move`]. Placements carry the
//! player they were read for, so they can be validated against the game
//! independently of where they came from.

use crate::grid::Orientation;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::instrument;

/// A request to draw one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// The player drawing the edge.
    pub player: PlayerId,
    /// Row within the orientation's view.
    pub row: usize,
    /// Column within the orientation's view.
    pub col: usize,
    /// Which view the coordinates refer to.
    pub orientation: Orientation,
}

impl Placement {
    /// Creates a new placement.
    #[instrument]
    pub fn new(player: PlayerId, row: usize, col: usize, orientation: Orientation) -> Self {
        Self {
            player,
            row,
            col,
            orientation,
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} {} {}",
            self.player, self.row, self.col, self.orientation
        )
    }
}

/// One parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    /// Draw an edge.
    Place(Placement),
    /// Write the game to a file and keep playing.
    Save(PathBuf),
    /// The line was not a move; ask the same player again.
    Invalid,
}

/// Why a placement was refused. The game is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The coordinates lie outside the orientation's view.
    #[display("Edge {} {} {} is out of bounds", _0.row, _0.col, _0.orientation)]
    OutOfBounds(Placement),

    /// The edge has already been drawn.
    #[display("Edge {} {} {} is already drawn", _0.row, _0.col, _0.orientation)]
    AlreadyDrawn(Placement),

    /// It is not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(PlayerId),

    /// A postcondition failed after applying the move.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_display() {
        let p = Placement::new(PlayerId::FIRST, 3, 4, Orientation::Vertical);
        assert_eq!(p.to_string(), "A -> 3 4 v");
    }

    #[test]
    fn test_error_messages() {
        let p = Placement::new(PlayerId::FIRST, 9, 0, Orientation::Horizontal);
        assert_eq!(
            MoveError::OutOfBounds(p).to_string(),
            "Edge 9 0 h is out of bounds"
        );
        assert!(MoveError::AlreadyDrawn(p).to_string().contains("already drawn"));
        assert_eq!(
            MoveError::WrongPlayer(PlayerId::new(1).unwrap()).to_string(),
            "It's not B's turn"
        );
    }

    #[test]
    fn test_placement_serializes() {
        let p = Placement::new(PlayerId::new(2).unwrap(), 1, 0, Orientation::Horizontal);
        let json = serde_json::to_string(&p).unwrap();
        let back: Placement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
