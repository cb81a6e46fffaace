//! Outcome of a finished game.

use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// The players holding the highest score when the last box was claimed.
///
/// Never empty; more than one entry means a tie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    winners: Vec<PlayerId>,
}

impl Outcome {
    pub(crate) fn new(winners: Vec<PlayerId>) -> Self {
        debug_assert!(!winners.is_empty(), "a finished game has a winner");
        Self { winners }
    }

    /// Winners in turn order.
    pub fn winners(&self) -> &[PlayerId] {
        &self.winners
    }

    /// Returns true if more than one player shares the top score.
    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Winner(s): ")?;
        for (i, winner) in self.winners.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{winner}")?;
        }
        Ok(())
    }
}
