// SPDX-License-Identifier: MIT OR Apache-2.0

//! Territory and area scoring

use crate::game::GameView;
use crate::{Color, Point, ScoringMethod};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Empty (or dead-stone) points owned by each color
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub black: BTreeSet<Point>,
    pub white: BTreeSet<Point>,
}

/// Final score of both players, komi included
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub black: f32,
    pub white: f32,
}

impl Score {
    /// Black's score minus White's
    pub fn margin(&self) -> f32 {
        self.black - self.white
    }

    /// `None` on a tie
    pub fn winner(&self) -> Option<Color> {
        if self.black > self.white {
            Some(Color::Black)
        } else if self.white > self.black {
            Some(Color::White)
        } else {
            None
        }
    }
}

/// Counts the score of a finished game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    method: ScoringMethod,
    komi: f32,
}

impl Scorer {
    pub fn new(method: ScoringMethod, komi: f32) -> Self {
        Self { method, komi }
    }

    pub fn method(&self) -> ScoringMethod {
        self.method
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    /// Territory of both colors; empty while the game is still going.
    ///
    /// Dead stones count as empty points and never change the board itself.
    pub fn territory<V>(&self, game: &V) -> Territory
    where
        V: GameView + ?Sized,
    {
        let mut territory = Territory::default();
        if !game.is_over() {
            return territory;
        }

        let state = game.current_state();
        let empty_or_dead = |point: Point, stone: Option<Color>| stone.is_none() || game.is_dead_at(point);
        let mut checked = HashSet::new();

        for seed in state.intersections() {
            if !empty_or_dead(seed.point, seed.stone) || checked.contains(&seed.point) {
                continue;
            }

            let (region, frontier) =
                state.partition_traverse(*seed, |i| empty_or_dead(i.point, i.stone));
            checked.extend(region.iter().map(|i| i.point));

            let mut border = frontier.iter().filter_map(|i| i.stone);
            let Some(owner) = border.next() else {
                continue;
            };
            if border.any(|stone| stone != owner) {
                continue;
            }

            let points = region.iter().map(|i| i.point);
            match owner {
                Color::Black => territory.black.extend(points),
                Color::White => territory.white.extend(points),
            }
        }

        territory
    }

    pub fn score<V>(&self, game: &V) -> Score
    where
        V: GameView + ?Sized,
    {
        let territory = self.territory(game);
        let state = game.current_state();

        let count_stones = |color: Color, dead: bool| {
            state
                .intersections()
                .iter()
                .filter(|i| i.is_occupied_with(color) && game.is_dead_at(i.point) == dead)
                .count() as f32
        };

        let (black, white) = match self.method {
            ScoringMethod::Territory => (
                territory.black.len() as f32
                    + state.white_stones_captured as f32
                    + count_stones(Color::White, true),
                territory.white.len() as f32
                    + state.black_stones_captured as f32
                    + count_stones(Color::Black, true),
            ),
            ScoringMethod::Area => (
                territory.black.len() as f32 + count_stones(Color::Black, false),
                territory.white.len() as f32 + count_stones(Color::White, false),
            ),
        };

        Score {
            black,
            white: white + self.komi,
        }
    }
}
