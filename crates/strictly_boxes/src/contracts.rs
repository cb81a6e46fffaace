//! Contract-based validation for placements.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P(state, action)} action {Q(before, after)}`.

use crate::action::{MoveError, Placement};
use crate::grid::{EdgeRef, Footprint};
use crate::invariants::{BoxesInvariants, InvariantSet, InvariantViolation, PlacementInvariants};
use crate::typestate::GameInProgress;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Placement Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: it must be the placing player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Checks the placement was read for the player to move.
    #[instrument(skip(game))]
    pub fn check(placement: &Placement, game: &GameInProgress) -> Result<(), MoveError> {
        if placement.player != game.to_move() {
            Err(MoveError::WrongPlayer(placement.player))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the coordinates must name an edge of the chosen view.
pub struct EdgeInBounds;

impl EdgeInBounds {
    /// Checks the placement against the view's rows and columns.
    #[instrument(skip(game))]
    pub fn check(placement: &Placement, game: &GameInProgress) -> Result<(), MoveError> {
        let view = game.grid().view(placement.orientation);
        if view.contains(placement.row, placement.col) {
            Ok(())
        } else {
            Err(MoveError::OutOfBounds(*placement))
        }
    }
}

/// Precondition: the edge must not be drawn yet.
pub struct EdgeIsUndrawn;

impl EdgeIsUndrawn {
    /// Checks the target edge is still empty.
    #[instrument(skip(game))]
    pub fn check(placement: &Placement, game: &GameInProgress) -> Result<(), MoveError> {
        let grid = game.grid();
        match grid.edge(placement.orientation, placement.row, placement.col) {
            Some(edge) if !grid.is_drawn(edge) => Ok(()),
            Some(_) => Err(MoveError::AlreadyDrawn(*placement)),
            None => Err(MoveError::OutOfBounds(*placement)),
        }
    }
}

/// Composite precondition: right player, edge in bounds and undrawn.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates all preconditions for a placement.
    #[instrument(skip(game))]
    pub fn check(placement: &Placement, game: &GameInProgress) -> Result<(), MoveError> {
        PlayersTurn::check(placement, game)?;
        EdgeInBounds::check(placement, game)?;
        EdgeIsUndrawn::check(placement, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for placements.
///
/// Preconditions:
/// - Placement is for the player to move
/// - Edge lies inside its view
/// - Edge is undrawn
///
/// Postconditions:
/// - Every game invariant holds
/// - No edge was erased and no box changed owner
///
/// [`Contract::post`] compares whole games. [`PlacementContract::post_placement`]
/// checks the same properties against a [`PlacementSnapshot`], touching only
/// the cells the placement could change.
pub struct PlacementContract;

impl Contract<GameInProgress, Placement> for PlacementContract {
    fn pre(game: &GameInProgress, placement: &Placement) -> Result<(), MoveError> {
        LegalPlacement::check(placement, game).inspect_err(|e| warn!(%e, "Placement rejected"))
    }

    fn post(before: &GameInProgress, after: &GameInProgress) -> Result<(), MoveError> {
        BoxesInvariants::check_all(after).map_err(postcondition_failed)?;

        if !after.grid().extends(before.grid()) {
            return Err(violated("drawn edges and claimed boxes are permanent"));
        }
        Ok(())
    }
}

impl PlacementContract {
    /// Checks a placement that claimed `claimed` boxes against the
    /// snapshot taken before it was applied.
    ///
    /// Costs one pass over the scores, not over the grid.
    pub fn post_placement(
        before: &PlacementSnapshot,
        after: &GameInProgress,
        placement: &Placement,
        claimed: usize,
    ) -> Result<(), MoveError> {
        PlacementInvariants::check_all(after).map_err(postcondition_failed)?;

        let grid = after.grid();
        if !grid.is_drawn(before.footprint.edge()) {
            return Err(violated("the placed edge is drawn"));
        }
        if !grid.extends_footprint(&before.footprint) {
            return Err(violated("drawn edges and claimed boxes are permanent"));
        }
        if grid.claimed_since(&before.footprint, placement.player) != claimed {
            return Err(violated("claimed boxes belong to the placing player"));
        }

        let scores_follow = after.scores().len() == before.scores.len()
            && after
                .scores()
                .iter()
                .zip(&before.scores)
                .enumerate()
                .all(|(index, (now, then))| {
                    let gained = if index == placement.player.index() { claimed } else { 0 };
                    *now == then + gained
                });
        if !scores_follow || before.empty.checked_sub(claimed) != Some(after.empty()) {
            return Err(violated("only the placing player scores, once per claimed box"));
        }
        Ok(())
    }
}

/// The parts of a game one placement can change, taken before it is applied.
#[derive(Debug, Clone)]
pub struct PlacementSnapshot {
    footprint: Footprint,
    scores: Vec<usize>,
    empty: usize,
}

impl PlacementSnapshot {
    /// Records the cells around `edge` and the scores of `game`.
    pub fn capture(game: &GameInProgress, edge: EdgeRef) -> Self {
        Self {
            footprint: game.grid().footprint(edge),
            scores: game.scores().to_vec(),
            empty: game.empty(),
        }
    }
}

fn postcondition_failed(violations: Vec<InvariantViolation>) -> MoveError {
    let descriptions = violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    violated(&descriptions)
}

fn violated(description: &str) -> MoveError {
    MoveError::InvariantViolation(format!("Postcondition failed: {description}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Orientation;
    use crate::{Dimensions, GameSetup, PlayerCount, PlayerId};

    fn new_game() -> GameInProgress {
        GameSetup::new(Dimensions::new(2, 2).unwrap(), PlayerCount::new(2).unwrap())
            .unwrap()
            .start()
    }

    #[test]
    fn test_precondition_empty_edge() {
        let game = new_game();
        let placement = Placement::new(PlayerId::FIRST, 0, 0, Orientation::Horizontal);
        assert!(PlacementContract::pre(&game, &placement).is_ok());
    }

    #[test]
    fn test_precondition_drawn_edge() {
        let mut game = new_game();
        let placement = Placement::new(PlayerId::FIRST, 0, 0, Orientation::Horizontal);
        game.place(placement).unwrap();

        let again = Placement::new(game.to_move(), 0, 0, Orientation::Horizontal);
        assert!(matches!(
            PlacementContract::pre(&game, &again),
            Err(MoveError::AlreadyDrawn(_))
        ));
    }

    #[test]
    fn test_precondition_out_of_bounds() {
        let game = new_game();
        for (row, col, orientation) in [
            (3, 0, Orientation::Horizontal),
            (0, 2, Orientation::Horizontal),
            (2, 0, Orientation::Vertical),
            (0, 3, Orientation::Vertical),
        ] {
            let placement = Placement::new(PlayerId::FIRST, row, col, orientation);
            assert!(matches!(
                PlacementContract::pre(&game, &placement),
                Err(MoveError::OutOfBounds(_))
            ));
        }
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let game = new_game();
        let placement = Placement::new(PlayerId::new(1).unwrap(), 0, 0, Orientation::Vertical);
        assert!(matches!(
            PlacementContract::pre(&game, &placement),
            Err(MoveError::WrongPlayer(_))
        ));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = new_game();
        let mut after = before.clone();
        after
            .place(Placement::new(PlayerId::FIRST, 1, 1, Orientation::Horizontal))
            .unwrap();
        assert!(PlacementContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_erased_edge() {
        let mut before = new_game();
        before
            .place(Placement::new(PlayerId::FIRST, 1, 1, Orientation::Horizontal))
            .unwrap();
        let after = new_game();
        assert!(matches!(
            PlacementContract::post(&before, &after),
            Err(MoveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_postcondition_detects_corrupt_scores() {
        let before = new_game();
        let mut after = before.clone();
        after.scores[1] = 2;
        assert!(PlacementContract::post(&before, &after).is_err());
    }

    /// Three sides of box (0, 0) drawn, B to move, and the fourth side.
    fn box_ready() -> (GameInProgress, Placement, EdgeRef) {
        let mut game = new_game();
        for (orientation, row, col) in [
            (Orientation::Horizontal, 0, 0),
            (Orientation::Horizontal, 1, 0),
            (Orientation::Vertical, 0, 0),
        ] {
            game.place(Placement::new(game.to_move(), row, col, orientation)).unwrap();
        }
        let placement = Placement::new(game.to_move(), 0, 1, Orientation::Vertical);
        let edge = game.grid().edge(Orientation::Vertical, 0, 1).unwrap();
        (game, placement, edge)
    }

    #[test]
    fn test_snapshot_postcondition_holds_after_claim() {
        let (mut game, placement, edge) = box_ready();
        let before = PlacementSnapshot::capture(&game, edge);
        assert_eq!(game.place(placement), Ok(1));
        assert_eq!(
            PlacementContract::post_placement(&before, &game, &placement, 1),
            Ok(())
        );
    }

    #[test]
    fn test_snapshot_postcondition_detects_undrawn_edge() {
        let (game, placement, edge) = box_ready();
        let before = PlacementSnapshot::capture(&game, edge);
        assert!(matches!(
            PlacementContract::post_placement(&before, &game, &placement, 0),
            Err(MoveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_snapshot_postcondition_detects_box_for_wrong_player() {
        let (game, placement, edge) = box_ready();
        let before = PlacementSnapshot::capture(&game, edge);
        let mut after = game.clone();
        assert!(after.grid.draw(edge));
        assert_eq!(after.grid.claim_beside(edge, PlayerId::FIRST), 1);
        after.scores[placement.player.index()] += 1;
        after.empty -= 1;
        assert!(matches!(
            PlacementContract::post_placement(&before, &after, &placement, 1),
            Err(MoveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_snapshot_postcondition_detects_score_drift() {
        let game = new_game();
        let placement = Placement::new(PlayerId::FIRST, 1, 1, Orientation::Horizontal);
        let edge = game.grid().edge(Orientation::Horizontal, 1, 1).unwrap();
        let before = PlacementSnapshot::capture(&game, edge);
        let mut after = game.clone();
        assert!(after.grid.draw(edge));
        after.to_move = PlayerId::new(1).unwrap();
        after.scores[0] = 1;
        after.empty -= 1;
        assert!(matches!(
            PlacementContract::post_placement(&before, &after, &placement, 0),
            Err(MoveError::InvariantViolation(_))
        ));
    }
}
