// SPDX-License-Identifier: MIT OR Apache-2.0

//! A game in progress: the history of board states plus the rules,
//! scorer and dead-stone marks that apply to it

use crate::board::{BoardState, Intersection, StateOverrides};
use crate::rules::Ruleset;
use crate::scoring::{Score, Scorer, Territory};
use crate::{Color, ConfigError, GameConfig, GameError, Move, PlayedMove, Point};
use std::collections::BTreeSet;
use tracing::debug;

/// Read access to a game, as needed by the ruleset and the scorer
pub trait GameView {
    /// Latest board state
    fn current_state(&self) -> &BoardState;

    /// Color to move next
    fn current_player(&self) -> Color;

    /// Every state of the game, initial state first, indexed by move number
    fn history(&self) -> &[BoardState];

    /// Whether two consecutive passes ended the game
    fn is_over(&self) -> bool;

    /// Whether the stone at `point` has been marked dead
    fn is_dead_at(&self, point: Point) -> bool;
}

/// One game of Go
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    ruleset: Ruleset,
    scorer: Scorer,
    /// `states[0]` is the initial state
    states: Vec<BoardState>,
    dead_stones: BTreeSet<Point>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let fixed_handicap = if config.free_handicap_placement {
            0
        } else {
            config.handicap_stones
        };
        let initial = BoardState::initial(config.board_size, fixed_handicap)?;

        Ok(Self {
            ruleset: Ruleset::new(config.ko_rule),
            scorer: Scorer::new(config.scoring, config.komi),
            config,
            states: vec![initial],
            dead_stones: BTreeSet::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board_size(&self) -> u8 {
        self.config.board_size
    }

    /// States produced by moves, without the initial state
    pub fn moves(&self) -> &[BoardState] {
        &self.states[1..]
    }

    fn still_placing_handicap_stones(&self) -> bool {
        self.config.free_handicap_placement
            && self.config.handicap_stones > 0
            && self.moves().len() < self.config.handicap_stones as usize
    }

    pub fn intersection_at(&self, y: u8, x: u8) -> Intersection {
        self.current_state().intersection_at(y, x)
    }

    pub fn is_illegal_at(&self, y: u8, x: u8) -> bool {
        self.ruleset.is_illegal(y, x, self)
    }

    /// Play a stone for the player to move.
    ///
    /// Rejected moves leave the game unchanged.
    pub fn play_at(&mut self, y: u8, x: u8) -> Result<&BoardState, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        if let Err(e) = self.ruleset.check(y, x, self) {
            debug!(y, x, error = %e, "rejected move");
            return Err(e);
        }

        let mut next = self.current_state().play_at(y, x, self.current_player());

        if let Some(ko) = next.ko_point {
            if !self.ruleset.is_ko_violation(ko.y, ko.x, &next, &self.states) {
                debug!(?ko, "ko shape does not repeat a position, clearing ko point");
                next = next.copy_with_attributes(StateOverrides {
                    ko_point: Some(None),
                    ..StateOverrides::default()
                });
            }
        }

        self.states.push(next);
        Ok(self.current_state())
    }

    /// Pass for the player to move
    pub fn pass(&mut self) -> Result<&BoardState, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let next = self.current_state().play_pass(self.current_player());
        self.states.push(next);
        Ok(self.current_state())
    }

    /// Take back the last move; returns the removed state
    pub fn undo(&mut self) -> Option<BoardState> {
        if self.states.len() <= 1 {
            return None;
        }

        let removed = self.states.pop();
        if !self.is_over() {
            self.dead_stones.clear();
        }
        removed
    }

    /// Moves played so far, in order
    pub fn path(&self) -> Vec<PlayedMove> {
        self.moves()
            .iter()
            .filter_map(|state| {
                let color = state.color?;
                let mv = match state.played_point {
                    Some(point) if !state.pass => Move::Place(point),
                    _ => Move::Pass,
                };
                Some(PlayedMove { color, mv })
            })
            .collect()
    }

    pub fn score(&self) -> Score {
        self.scorer.score(self)
    }

    pub fn territory(&self) -> Territory {
        self.scorer.territory(self)
    }

    /// Points of the group at (y, x); empty for an empty or off-board point
    pub fn group_at(&self, y: u8, x: u8) -> Vec<Point> {
        if !Point::new(y, x).is_valid(self.board_size()) {
            return Vec::new();
        }
        self.current_state()
            .group_at(y, x)
            .into_iter()
            .map(|i| i.point)
            .collect()
    }

    pub fn dead_stones(&self) -> &BTreeSet<Point> {
        &self.dead_stones
    }

    /// Replace the dead-stone marks, e.g. with marks agreed with the opponent
    pub fn set_dead_stones(&mut self, points: impl IntoIterator<Item = Point>) {
        self.dead_stones = points.into_iter().collect();
    }

    pub fn mark_dead_at(&mut self, y: u8, x: u8) -> Result<(), GameError> {
        if self.is_dead_at(Point::new(y, x)) {
            return Ok(());
        }
        self.set_dead_status(y, x, true)
    }

    pub fn unmark_dead_at(&mut self, y: u8, x: u8) -> Result<(), GameError> {
        if !self.is_dead_at(Point::new(y, x)) {
            return Ok(());
        }
        self.set_dead_status(y, x, false)
    }

    pub fn toggle_dead_at(&mut self, y: u8, x: u8) -> Result<(), GameError> {
        let dead = self.is_dead_at(Point::new(y, x));
        self.set_dead_status(y, x, !dead)
    }

    /// Mark or unmark every stone of the selected color reachable from
    /// (y, x) through that color and empty points
    fn set_dead_status(&mut self, y: u8, x: u8, dead: bool) -> Result<(), GameError> {
        if !self.is_over() {
            return Err(GameError::GameNotOver);
        }
        if !Point::new(y, x).is_valid(self.board_size()) {
            return Err(GameError::OutOfBounds { y, x });
        }

        let selected = self.intersection_at(y, x);
        if selected.is_empty() {
            return Err(GameError::EmptyIntersection { y, x });
        }

        let (region, _) = self
            .current_state()
            .partition_traverse(selected, |i| i.is_empty() || i.same_color_as(&selected));

        let stones = region.into_iter().filter(|i| !i.is_empty()).map(|i| i.point);
        if dead {
            self.dead_stones.extend(stones);
        } else {
            for point in stones {
                self.dead_stones.remove(&point);
            }
        }

        debug!(y, x, dead, marked = self.dead_stones.len(), "updated dead stones");
        Ok(())
    }

    /// Human-readable coordinates such as `D4`
    pub fn coordinates_for(&self, y: u8, x: u8) -> String {
        self.current_state().coordinates_for(y, x)
    }
}

impl GameView for Game {
    fn current_state(&self) -> &BoardState {
        // the initial state is never removed
        &self.states[self.states.len() - 1]
    }

    fn current_player(&self) -> Color {
        if self.still_placing_handicap_stones() {
            return Color::Black;
        }
        self.current_state().next_color()
    }

    fn history(&self) -> &[BoardState] {
        &self.states
    }

    fn is_over(&self) -> bool {
        match self.states.as_slice() {
            [.., previous, last] => previous.pass && last.pass,
            _ => false,
        }
    }

    fn is_dead_at(&self, point: Point) -> bool {
        self.dead_stones.contains(&point)
    }
}
