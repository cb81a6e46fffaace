//! Pure rule functions for dots and boxes.

use crate::types::{PlayerCount, PlayerId};
use tracing::instrument;

/// Who moves after `current` drew an edge that claimed `claimed` boxes.
///
/// Claiming at least one box earns another turn.
pub fn next_to_move(current: PlayerId, players: PlayerCount, claimed: usize) -> PlayerId {
    if claimed == 0 {
        current.next(players)
    } else {
        current
    }
}

/// Every player holding the highest score, in turn order.
///
/// Returns an empty list only when `scores` is empty.
#[instrument]
pub fn winners(scores: &[usize]) -> Vec<PlayerId> {
    let Some(&best) = scores.iter().max() else {
        return Vec::new();
    };
    scores
        .iter()
        .enumerate()
        .filter(|&(_, &score)| score == best)
        .filter_map(|(index, _)| PlayerId::new(index))
        .collect()
}
