// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives a game against a joseki tree, optionally answering with book moves

use crate::game::{Game, GameView};
use crate::joseki::{Advance, Divergence, MatchSession, MatchStatus};
use crate::sgf::JosekiTree;
use crate::{Color, GameError, Move, PlayedMove};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;
use tracing::trace;

/// Outcome of one move played through the trainer
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerReport {
    /// How the session took the player's move
    pub advance: Advance,
    /// Book move played in reply by autoplay, if any
    pub reply: Option<PlayedMove>,
    /// Set once the game has left the book
    pub divergence: Option<Divergence>,
}

/// One game plus the session matching it against a reference tree
#[derive(Debug)]
pub struct JosekiTrainer<R: Rng> {
    game: Game,
    session: MatchSession,
    autoplay: Option<Color>,
    rng: R,
}

impl<R: Rng> JosekiTrainer<R> {
    pub fn new(game: Game, tree: Arc<JosekiTree>, rng: R) -> Self {
        let session = MatchSession::replay(tree, game.path().iter());
        Self {
            game,
            session,
            autoplay: None,
            rng,
        }
    }

    /// Let the trainer answer for `color` with book moves
    pub fn with_autoplay(mut self, color: Option<Color>) -> Self {
        self.autoplay = color;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Mutable access for dead-stone marking; moves should go through the trainer
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn session(&self) -> &MatchSession {
        &self.session
    }

    pub fn autoplay(&self) -> Option<Color> {
        self.autoplay
    }

    pub fn status(&self) -> MatchStatus {
        self.session.status()
    }

    /// Book moves for the player to move
    pub fn next_move_options(&self) -> Option<Vec<Move>> {
        self.session.next_move_options(self.game.current_player())
    }

    pub fn play_at(&mut self, y: u8, x: u8) -> Result<TrainerReport, GameError> {
        let color = self.game.current_player();
        self.game.play_at(y, x)?;
        let advance = self.session.advance(PlayedMove::place(color, y, x));
        self.respond(advance)
    }

    pub fn pass(&mut self) -> Result<TrainerReport, GameError> {
        let color = self.game.current_player();
        self.game.pass()?;
        let advance = self.session.advance(PlayedMove::pass(color));
        self.respond(advance)
    }

    /// Take back the last move, and the autoplay reply before it if the
    /// human would otherwise be left facing the reply
    pub fn undo(&mut self) -> bool {
        if self.game.undo().is_none() {
            return false;
        }
        if self.autoplay.is_some() && self.autoplay == Some(self.game.current_player()) {
            self.game.undo();
        }

        // sessions only narrow, so rebuild from the remaining moves
        self.session = MatchSession::replay(Arc::clone(self.session.tree()), self.game.path().iter());
        true
    }

    fn respond(&mut self, advance: Advance) -> Result<TrainerReport, GameError> {
        let reply = self.autoplay_turn()?;

        Ok(TrainerReport {
            advance,
            reply,
            divergence: self.session.divergence().cloned(),
        })
    }

    /// Play a random book move if autoplay is enabled for the player to move.
    ///
    /// Also used to open the game when autoplay holds the first move.
    pub fn autoplay_turn(&mut self) -> Result<Option<PlayedMove>, GameError> {
        let color = self.game.current_player();
        if self.autoplay != Some(color) || self.game.is_over() {
            return Ok(None);
        }

        let Some(options) = self.session.next_move_options(color) else {
            return Ok(None);
        };

        let board_size = self.game.board_size();
        let playable: Vec<Move> = options
            .iter()
            .copied()
            .filter(|mv| match mv {
                Move::Place(point) => {
                    point.is_valid(board_size) && !self.game.is_illegal_at(point.y, point.x)
                }
                Move::Pass => true,
            })
            .collect();

        let Some(&choice) = playable.choose(&mut self.rng) else {
            return Ok(None);
        };
        trace!(?choice, candidates = playable.len(), "autoplay picked book move");

        match choice {
            Move::Place(point) => {
                self.game.play_at(point.y, point.x)?;
            }
            Move::Pass => {
                self.game.pass()?;
            }
        }

        let played = PlayedMove { color, mv: choice };
        self.session.advance(played);
        Ok(Some(played))
    }
}
