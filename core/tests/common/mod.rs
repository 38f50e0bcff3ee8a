// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common helpers for joseki-core integration tests

#![allow(dead_code)]

use joseki_core::{Game, GameConfig};

/// A step of a scripted game; `None` passes
pub type Step = Option<(u8, u8)>;

/// Game on an empty board of the given size
pub fn new_game(board_size: u8) -> Game {
    Game::new(GameConfig::with_size(board_size)).expect("valid board size")
}

/// Play the steps in order, alternating colors, panicking on illegal moves
pub fn play_all(game: &mut Game, steps: &[Step]) {
    for (i, step) in steps.iter().enumerate() {
        let result = match step {
            Some((y, x)) => game.play_at(*y, *x).map(|_| ()),
            None => game.pass().map(|_| ()),
        };
        if let Err(e) = result {
            panic!("step {} ({:?}) rejected: {}", i, step, e);
        }
    }
}

/// Game on a board of the given size after the scripted steps
pub fn game_after(board_size: u8, steps: &[Step]) -> Game {
    let mut game = new_game(board_size);
    play_all(&mut game, steps);
    game
}

/// 5x5 game: Black walls off column A, White walls off column E, with a
/// neutral column between them; both players have passed
pub fn walled_5x5(komi: f32, scoring: &str) -> Game {
    let config = GameConfig::from_json(&format!(
        r#"{{"boardSize": 5, "komi": {}, "scoring": "{}"}}"#,
        komi, scoring
    ))
    .expect("valid config");
    let mut game = Game::new(config).expect("valid config");
    play_all(
        &mut game,
        &[
            Some((0, 1)),
            Some((0, 3)),
            Some((1, 1)),
            Some((1, 3)),
            Some((2, 1)),
            Some((2, 3)),
            Some((3, 1)),
            Some((3, 3)),
            Some((4, 1)),
            Some((4, 3)),
            None,
            None,
        ],
    );
    game
}
