// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game rules and move validation

use crate::board::BoardState;
use crate::game::GameView;
use crate::{Color, GameError, KoRule, Point};

/// Decides whether a move may be played. Holds no game state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ruleset {
    ko_rule: KoRule,
}

impl Ruleset {
    pub fn new(ko_rule: KoRule) -> Self {
        Self { ko_rule }
    }

    pub fn ko_rule(&self) -> KoRule {
        self.ko_rule
    }

    /// Check whether the player to move may play at (y, x)
    pub fn check<V>(&self, y: u8, x: u8, game: &V) -> Result<(), GameError>
    where
        V: GameView + ?Sized,
    {
        let state = game.current_state();

        if !state.contains(Point::new(y, x)) {
            return Err(GameError::OutOfBounds { y, x });
        }

        if !state.intersection_at(y, x).is_empty() {
            return Err(GameError::OccupiedPosition);
        }

        if Self::would_be_suicide(y, x, game.current_player(), state) {
            return Err(GameError::SelfCapture);
        }

        if state.ko_point == Some(Point::new(y, x)) {
            tracing::debug!(y, x, "Ko violation detected");
            return Err(GameError::KoViolation);
        }

        Ok(())
    }

    pub fn is_illegal<V>(&self, y: u8, x: u8, game: &V) -> bool
    where
        V: GameView + ?Sized,
    {
        self.check(y, x, game).is_err()
    }

    /// Whether the placed stone's group would have no liberties once
    /// captures are resolved
    fn would_be_suicide(y: u8, x: u8, color: Color, state: &BoardState) -> bool {
        let surrounded = state
            .neighbors_of(Point::new(y, x))
            .iter()
            .all(|neighbor| !neighbor.is_empty());
        if !surrounded {
            return false;
        }

        state.play_at(y, x, color).liberties_at(y, x) == 0
    }

    /// Whether retaking at (y, x) right after `candidate` would really repeat
    /// the position that preceded it in `history`.
    ///
    /// `candidate` is a freshly played state carrying a ko point; when this
    /// returns false the ko point should be cleared.
    pub fn is_ko_violation(&self, y: u8, x: u8, candidate: &BoardState, history: &[BoardState]) -> bool {
        match self.ko_rule {
            KoRule::Simple => {
                if candidate.ko_point != Some(Point::new(y, x)) {
                    return false;
                }
                let Some(color) = candidate.color else {
                    return false;
                };

                let previous = history
                    .iter()
                    .rev()
                    .find(|state| state.move_number + 1 == candidate.move_number);

                match previous {
                    Some(previous) => candidate
                        .play_at(y, x, color.opposite())
                        .same_position_as(previous),
                    // without the preceding position the ko shape alone decides
                    None => true,
                }
            }
        }
    }
}
