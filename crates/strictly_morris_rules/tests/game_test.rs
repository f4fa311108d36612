//! Tests for the ring morris state machine.

use strictly_morris_rules::{
    Action, ActionError, Color, Game, MoveError, Outcome, Phase, PlacementError, RemovalError,
    RulesConfig, SavedState, Square, Stage, Transition,
};

fn squares(blue: &[usize], red: &[usize], len: usize) -> Vec<Square> {
    (0..len)
        .map(|p| {
            if blue.contains(&p) {
                Square::Occupied(Color::Blue)
            } else if red.contains(&p) {
                Square::Occupied(Color::Red)
            } else {
                Square::Empty
            }
        })
        .collect()
}

fn moving_game(config: RulesConfig, blue: &[usize], red: &[usize]) -> Game {
    let len = *config.rings() * 8;
    Game::restore(
        config,
        SavedState {
            phase: Phase::Moving,
            turn: Color::Blue,
            removal_owed: false,
            squares: squares(blue, red, len),
        },
    )
    .unwrap()
}

#[test]
fn test_placing_alternates_until_supplies_run_out() {
    let mut game = Game::new(RulesConfig::default());
    let placements = [
        (0, Color::Blue),
        (1, Color::Red),
        (2, Color::Blue),
        (3, Color::Red),
        (4, Color::Blue),
        (5, Color::Red),
        (6, Color::Blue),
        (7, Color::Red),
        (9, Color::Blue),
        (8, Color::Red),
        (13, Color::Blue),
        (12, Color::Red),
    ];
    for (i, (position, color)) in placements.iter().enumerate() {
        assert_eq!(game.phase(), Phase::Placing, "placement {i}");
        assert_eq!(game.turn(), *color, "placement {i}");
        assert_eq!(game.place(*position, *color), Ok(Transition::Continued));
    }
    assert_eq!(game.phase(), Phase::Moving);
    assert_eq!(game.turn(), Color::Blue);
    assert_eq!(game.player(Color::Blue).remaining_to_place(), 0);
    assert_eq!(game.player(Color::Red).remaining_to_place(), 0);
}

#[test]
fn test_mill_owes_removal_without_turn_flip() {
    let mut game = Game::new(RulesConfig::default());
    game.place(0, Color::Blue).unwrap();
    game.place(8, Color::Red).unwrap();
    game.place(1, Color::Blue).unwrap();
    game.place(9, Color::Red).unwrap();

    let transition = game.place(7, Color::Blue).unwrap();
    assert!(matches!(transition, Transition::MillFormed(_)));
    assert_eq!(game.phase(), Phase::Removing { resume: Stage::Placing });
    assert_eq!(game.turn(), Color::Blue);

    let mut mill = game.board().mill_at(0).unwrap().positions();
    mill.sort_unstable();
    assert_eq!(mill, [0, 1, 7]);

    assert_eq!(game.remove(8), Ok(Transition::Continued));
    assert_eq!(game.phase(), Phase::Placing);
    assert_eq!(game.turn(), Color::Red);
    assert_eq!(game.board().get(8), Some(Square::Empty));
}

#[test]
fn test_rejected_actions_leave_state_untouched() {
    let mut game = Game::new(RulesConfig::default());
    game.place(4, Color::Blue).unwrap();
    let before = game.clone();

    assert_eq!(
        game.place(4, Color::Red),
        Err(ActionError::InvalidPlacement(PlacementError::Occupied(4)))
    );
    assert_eq!(
        game.place(99, Color::Red),
        Err(ActionError::InvalidPlacement(PlacementError::OutOfBounds(99)))
    );
    assert_eq!(
        game.move_piece(4, 5),
        Err(ActionError::InvalidMove(MoveError::WrongPhase))
    );
    assert_eq!(
        game.remove(4),
        Err(ActionError::InvalidRemoval(RemovalError::WrongPhase))
    );
    assert_eq!(game, before);
}

#[test]
fn test_moving_requires_adjacent_empty_target() {
    let config = RulesConfig::new(2, 3, 12).unwrap();
    let mut game = moving_game(config, &[0, 3, 12], &[1, 10, 14]);

    assert_eq!(
        game.move_piece(1, 2),
        Err(ActionError::InvalidMove(MoveError::NotOwnPiece(1)))
    );
    assert_eq!(
        game.move_piece(0, 1),
        Err(ActionError::InvalidMove(MoveError::TargetOccupied(1)))
    );
    assert_eq!(
        game.move_piece(3, 5),
        Err(ActionError::InvalidMove(MoveError::NotAdjacent { source: 3, target: 5 }))
    );
    assert_eq!(game.move_piece(0, 8), Ok(Transition::Continued));
    assert_eq!(game.turn(), Color::Red);
}

#[test]
fn test_moving_onto_itself_cancels() {
    let config = RulesConfig::new(2, 3, 12).unwrap();
    let mut game = moving_game(config, &[0, 3, 12], &[1, 10, 14]);
    let before = game.clone();
    assert_eq!(game.move_piece(3, 3), Ok(Transition::Cancelled));
    assert_eq!(game, before);
}

#[test]
fn test_reducing_opponent_to_two_pieces_wins() {
    let config = RulesConfig::new(2, 3, 12).unwrap();
    let mut game = moving_game(config, &[0, 1, 6], &[9, 12, 14]);

    assert!(matches!(game.move_piece(6, 7), Ok(Transition::MillFormed(_))));
    assert_eq!(game.phase(), Phase::Removing { resume: Stage::Moving });

    let outcome = Outcome::Winner(Color::Blue);
    assert_eq!(game.remove(12), Ok(Transition::Finished(outcome)));
    assert_eq!(game.phase(), Phase::Terminal(outcome));
    assert_eq!(game.board().winner(), Some(Color::Blue));
    assert_eq!(game.place(12, Color::Red), Err(ActionError::GameOver));
    assert!(!game.has_legal_action());
}

#[test]
fn test_pieces_in_mills_are_protected() {
    let config = RulesConfig::new(2, 4, 12).unwrap();
    let mut game = moving_game(config, &[0, 1, 6], &[8, 9, 15, 12]);
    game.move_piece(6, 7).unwrap();

    assert_eq!(
        game.remove(9),
        Err(ActionError::InvalidRemoval(RemovalError::ProtectedByMill(9)))
    );
    assert_eq!(
        game.remove(0),
        Err(ActionError::InvalidRemoval(RemovalError::OwnPiece(0)))
    );
    assert_eq!(
        game.remove(2),
        Err(ActionError::InvalidRemoval(RemovalError::Empty(2)))
    );
    assert_eq!(game.remove(12), Ok(Transition::Continued));
}

#[test]
fn test_mill_pieces_removable_when_only_mills_remain() {
    let config = RulesConfig::new(2, 4, 12).unwrap();
    let mut game = moving_game(config, &[0, 1, 6], &[8, 9, 15]);
    game.move_piece(6, 7).unwrap();
    assert_eq!(
        game.remove(9),
        Ok(Transition::Finished(Outcome::Winner(Color::Blue)))
    );
}

#[test]
fn test_blocked_player_loses() {
    let config = RulesConfig::new(1, 4, 12).unwrap();
    let game = moving_game(config, &[1, 3, 5, 7], &[0, 2, 4, 6]);
    assert_eq!(game.outcome(), Some(Outcome::Winner(Color::Red)));
}

#[test]
fn test_repeated_shuffling_draws() {
    let config = RulesConfig::new(2, 3, 1).unwrap();
    let mut game = moving_game(config, &[1, 3, 5], &[9, 11, 13]);
    let cycle = [(1, 0), (9, 8), (0, 1), (8, 9)];

    let mut last = Transition::Continued;
    for half_move in 0..16 {
        assert!(!game.is_terminal(), "ended early at half-move {half_move}");
        let (source, target) = cycle[half_move % cycle.len()];
        last = game.move_piece(source, target).unwrap();
    }
    assert_eq!(last, Transition::Finished(Outcome::Draw));
    assert_eq!(game.board().repetition_count(), 2);
}

#[test]
fn test_apply_dispatches_for_player_to_move() {
    let mut game = Game::new(RulesConfig::default());
    game.apply(Action::Place(3)).unwrap();
    assert_eq!(game.board().get(3), Some(Square::Occupied(Color::Blue)));
    game.apply(Action::Place(5)).unwrap();
    assert_eq!(game.board().get(5), Some(Square::Occupied(Color::Red)));
}

#[test]
fn test_save_and_restore_round_trip() {
    let mut game = Game::new(RulesConfig::default());
    for (position, color) in [(0, Color::Blue), (8, Color::Red), (2, Color::Blue)] {
        game.place(position, color).unwrap();
    }
    let restored = Game::restore(RulesConfig::default(), game.saved_state()).unwrap();
    assert_eq!(restored.phase(), game.phase());
    assert_eq!(restored.turn(), game.turn());
    assert_eq!(restored.snapshot(), game.snapshot());
    assert_eq!(restored.player(Color::Blue).remaining_to_place(), 4);
    assert_eq!(restored.player(Color::Red).remaining_to_place(), 5);
}
