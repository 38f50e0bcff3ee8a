// SPDX-License-Identifier: MIT OR Apache-2.0

use joseki_core::{
    BoardState, Color, GameConfig, GameError, GameView, KoRule, Point, Ruleset, StateOverrides,
};

mod common;
use common::{game_after, new_game, play_all};

/// Position where Black has just taken a ko at (4, 4) by playing (4, 5)
fn ko_game() -> joseki_core::Game {
    game_after(
        9,
        &[
            Some((3, 4)),
            Some((3, 5)),
            Some((4, 3)),
            Some((5, 5)),
            Some((5, 4)),
            Some((4, 6)),
            Some((8, 8)),
            Some((4, 4)),
            Some((4, 5)),
        ],
    )
}

#[test]
fn out_of_bounds() {
    let mut game = new_game(9);
    assert_eq!(game.play_at(9, 0), Err(GameError::OutOfBounds { y: 9, x: 0 }));
    assert_eq!(game.play_at(0, 200), Err(GameError::OutOfBounds { y: 0, x: 200 }));
    assert!(game.is_illegal_at(9, 9));
    assert!(game.moves().is_empty());
}

#[test]
fn occupied_position() {
    let mut game = game_after(9, &[Some((4, 4))]);
    assert_eq!(game.play_at(4, 4), Err(GameError::OccupiedPosition));
    assert_eq!(game.moves().len(), 1);
    assert_eq!(game.current_player(), Color::White);
}

#[test]
fn self_capture() {
    let mut game = game_after(9, &[Some((8, 8)), Some((0, 1)), Some((8, 7)), Some((1, 0))]);

    assert!(game.is_illegal_at(0, 0));
    assert_eq!(game.play_at(0, 0), Err(GameError::SelfCapture));
    assert_eq!(game.moves().len(), 4);
}

#[test]
fn capturing_into_a_surrounded_point_is_legal() {
    let mut game = game_after(
        9,
        &[
            Some((0, 2)),
            Some((0, 1)),
            Some((1, 1)),
            Some((1, 0)),
            Some((2, 0)),
            Some((8, 8)),
        ],
    );

    assert!(!game.is_illegal_at(0, 0));
    let state = game.play_at(0, 0).unwrap();
    assert_eq!(state.white_stones_captured, 2);
    assert!(state.intersection_at(0, 1).is_empty());
    assert!(state.intersection_at(1, 0).is_empty());
}

#[test]
fn immediate_ko_retake_is_rejected() {
    let mut game = ko_game();
    assert_eq!(game.current_state().ko_point, Some(Point::new(4, 4)));
    assert_eq!(game.current_player(), Color::White);

    assert!(game.is_illegal_at(4, 4));
    assert_eq!(game.play_at(4, 4), Err(GameError::KoViolation));
    assert_eq!(game.moves().len(), 9);
}

#[test]
fn ko_can_be_retaken_after_a_threat() {
    let mut game = ko_game();
    play_all(&mut game, &[Some((0, 0)), Some((8, 0))]);

    assert_eq!(game.current_state().ko_point, None);
    let state = game.play_at(4, 4).unwrap();
    assert_eq!(state.black_stones_captured, 1);
    assert!(state.intersection_at(4, 5).is_empty());
    // the retake is itself a ko capture
    assert_eq!(state.ko_point, Some(Point::new(4, 5)));
}

#[test]
fn ko_review_keeps_a_repeating_ko_point() {
    let game = ko_game();
    let ruleset = Ruleset::new(KoRule::Simple);
    let candidate = game.current_state();
    let history = &game.history()[..game.history().len() - 1];

    assert!(ruleset.is_ko_violation(4, 4, candidate, history));
    // missing preceding position: the ko shape alone decides
    assert!(ruleset.is_ko_violation(4, 4, candidate, &[]));
    // no ko point at all
    assert!(!ruleset.is_ko_violation(2, 2, candidate, history));
}

#[test]
fn ko_review_clears_a_ko_point_that_does_not_repeat() {
    let game = ko_game();
    let ruleset = Ruleset::new(KoRule::Simple);
    let candidate = game.current_state();

    let unrelated = BoardState::empty(9).unwrap().copy_with_attributes(StateOverrides {
        move_number: Some(candidate.move_number - 1),
        ..StateOverrides::default()
    });

    assert!(!ruleset.is_ko_violation(4, 4, candidate, &[unrelated]));
}

#[test]
fn moves_after_the_game_ended_are_rejected() {
    let mut game = game_after(9, &[Some((4, 4)), None, None]);
    assert!(game.is_over());
    assert_eq!(game.play_at(2, 2), Err(GameError::GameOver));
    assert_eq!(game.pass(), Err(GameError::GameOver));

    assert!(game.undo().is_some());
    assert!(!game.is_over());
    assert!(game.pass().is_ok());
}

#[test]
fn undo_keeps_the_initial_state() {
    let mut game = game_after(9, &[Some((4, 4))]);
    assert!(game.undo().is_some());
    assert!(game.undo().is_none());
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.current_player(), Color::Black);
}

#[test]
fn white_moves_first_after_fixed_handicap() {
    let mut config = GameConfig::with_size(19);
    config.handicap_stones = 2;
    let mut game = joseki_core::Game::new(config).unwrap();

    assert_eq!(game.current_player(), Color::White);
    assert_eq!(game.play_at(3, 15), Err(GameError::OccupiedPosition));
    game.play_at(3, 3).unwrap();
    assert_eq!(game.current_player(), Color::Black);
}

#[test]
fn black_places_free_handicap_stones() {
    let mut config = GameConfig::with_size(9);
    config.handicap_stones = 3;
    config.free_handicap_placement = true;
    let mut game = joseki_core::Game::new(config).unwrap();

    assert_eq!(game.current_state().stones_of(Color::Black), 0);
    for (y, x) in [(0, 0), (0, 8), (8, 0)] {
        assert_eq!(game.current_player(), Color::Black);
        game.play_at(y, x).unwrap();
    }
    assert_eq!(game.current_player(), Color::White);
    assert_eq!(game.current_state().stones_of(Color::Black), 3);

    let path = game.path();
    assert_eq!(path.len(), 3);
    assert!(path.iter().all(|m| m.color == Color::Black));
}
