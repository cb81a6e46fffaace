//! The player to move always takes part in the game.

use super::Invariant;
use crate::GameInProgress;

/// Invariant: the active player index is below the player count.
pub struct ActivePlayerInvariant;

impl Invariant<GameInProgress> for ActivePlayerInvariant {
    fn holds(game: &GameInProgress) -> bool {
        game.to_move().index() < game.players().get()
    }

    fn description() -> &'static str {
        "Active player takes part in the game"
    }
}
