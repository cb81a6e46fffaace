//! Tests for placement contracts.

use strictly_boxes::{
    Contract, Dimensions, EdgeInBounds, EdgeIsUndrawn, GameInProgress, GameSetup, LegalPlacement,
    MAX_DIMENSION, MoveError, Orientation, Placement, PlacementContract, PlacementSnapshot,
    PlayerCount, PlayerId, PlayersTurn,
};

fn new_game() -> GameInProgress {
    GameSetup::new(Dimensions::new(3, 3).unwrap(), PlayerCount::new(4).unwrap())
        .unwrap()
        .start()
}

#[test]
fn test_each_precondition_in_isolation() {
    let game = new_game();
    let legal = Placement::new(PlayerId::FIRST, 3, 2, Orientation::Horizontal);
    assert!(PlayersTurn::check(&legal, &game).is_ok());
    assert!(EdgeInBounds::check(&legal, &game).is_ok());
    assert!(EdgeIsUndrawn::check(&legal, &game).is_ok());
    assert!(LegalPlacement::check(&legal, &game).is_ok());

    let far = Placement::new(PlayerId::FIRST, 3, 0, Orientation::Vertical);
    assert!(PlayersTurn::check(&far, &game).is_ok());
    assert!(matches!(
        EdgeInBounds::check(&far, &game),
        Err(MoveError::OutOfBounds(_))
    ));
}

#[test]
fn test_wrong_player_checked_first() {
    let mut game = new_game();
    game.place(Placement::new(PlayerId::FIRST, 0, 0, Orientation::Vertical))
        .unwrap();

    let stale = Placement::new(PlayerId::FIRST, 0, 0, Orientation::Vertical);
    assert!(matches!(
        LegalPlacement::check(&stale, &game),
        Err(MoveError::WrongPlayer(_))
    ));

    let current = Placement::new(game.to_move(), 0, 0, Orientation::Vertical);
    assert!(matches!(
        PlacementContract::pre(&game, &current),
        Err(MoveError::AlreadyDrawn(_))
    ));
}

#[test]
fn test_postcondition_across_a_claim() {
    let mut game = new_game();
    for (row, col, orientation) in [
        (0, 0, Orientation::Horizontal),
        (1, 0, Orientation::Horizontal),
        (0, 0, Orientation::Vertical),
    ] {
        game.place(Placement::new(game.to_move(), row, col, orientation))
            .unwrap();
    }

    let before = game.clone();
    let claimed = game
        .place(Placement::new(game.to_move(), 0, 1, Orientation::Vertical))
        .unwrap();
    assert_eq!(claimed, 1);
    assert!(PlacementContract::post(&before, &game).is_ok());
    assert_eq!(game.scores(), &[0, 0, 0, 1]);
}

#[test]
fn test_snapshot_postcondition_on_largest_grid() {
    let setup = GameSetup::new(
        Dimensions::new(MAX_DIMENSION, MAX_DIMENSION).unwrap(),
        PlayerCount::new(2).unwrap(),
    )
    .unwrap();
    let mut game = setup.start();
    let last = MAX_DIMENSION - 1;
    for (row, col, orientation) in [
        (last, last, Orientation::Horizontal),
        (MAX_DIMENSION, last, Orientation::Horizontal),
        (last, last, Orientation::Vertical),
    ] {
        game.place(Placement::new(game.to_move(), row, col, orientation))
            .unwrap();
    }

    let placement = Placement::new(game.to_move(), last, MAX_DIMENSION, Orientation::Vertical);
    let edge = game
        .grid()
        .edge(Orientation::Vertical, last, MAX_DIMENSION)
        .unwrap();
    let before = PlacementSnapshot::capture(&game, edge);
    assert_eq!(game.place(placement), Ok(1));
    assert!(PlacementContract::post_placement(&before, &game, &placement, 1).is_ok());
    assert_eq!(game.grid().box_owner(last, last), Some(placement.player));
}
