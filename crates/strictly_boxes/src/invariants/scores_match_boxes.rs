//! Each player's score equals the number of boxes showing their letter.

use super::Invariant;
use crate::GameInProgress;

/// Invariant: scores agree with box ownership on the grid.
pub struct ScoresMatchBoxesInvariant;

impl Invariant<GameInProgress> for ScoresMatchBoxesInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let mut owned = vec![0usize; game.players().get()];
        for owner in game.grid().owners().flatten() {
            match owned.get_mut(owner.index()) {
                Some(count) => *count += 1,
                None => return false,
            }
        }
        owned == game.scores()
    }

    fn description() -> &'static str {
        "Scores match the boxes each player owns"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dimensions, GameSetup, PlayerCount, PlayerId};

    fn new_game() -> GameInProgress {
        GameSetup::new(Dimensions::new(2, 2).unwrap(), PlayerCount::new(2).unwrap())
            .unwrap()
            .start()
    }

    #[test]
    fn test_restored_claims_hold() {
        let mut game = new_game();
        assert!(game.restore_claim(1, 1, PlayerId::new(1).unwrap()));
        assert!(ScoresMatchBoxesInvariant::holds(&game));
    }

    #[test]
    fn test_unbacked_score_violates() {
        let mut game = new_game();
        game.scores[1] = 1;
        game.empty -= 1;
        assert!(!ScoresMatchBoxesInvariant::holds(&game));
    }
}
