//! Score conservation: every box is either claimed or still empty.

use super::Invariant;
use crate::GameInProgress;

/// Invariant: `sum(scores) + empty == height * width`.
pub struct ScoreConservationInvariant;

impl Invariant<GameInProgress> for ScoreConservationInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let claimed: usize = game.scores().iter().sum();
        claimed + game.empty() == game.grid().dimensions().boxes()
    }

    fn description() -> &'static str {
        "Claimed plus empty boxes equals the grid size"
    }
}
