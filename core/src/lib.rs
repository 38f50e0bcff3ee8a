// SPDX-License-Identifier: MIT OR Apache-2.0

//! Joseki Core - Go rules engine and joseki training logic
//!
//! This crate provides:
//! - An immutable board state that applies moves and resolves captures
//! - Move legality (occupied points, suicide, simple ko)
//! - Territory and area scoring with dead-stone marking
//! - SGF reference trees and a symmetry-aware sequence matcher
//! - A trainer that drives a game against a reference tree with autoplay

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod config;
pub mod game;
pub mod joseki;
pub mod rules;
pub mod scoring;
pub mod sgf;
pub mod symmetry;
pub mod trainer;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use board::{BoardState, Intersection, StateOverrides};
pub use config::{GameConfig, KoRule, ScoringMethod};
pub use game::{Game, GameView};
pub use joseki::{Advance, Divergence, MatchSession, MatchStatus};
pub use rules::Ruleset;
pub use scoring::{Score, Scorer, Territory};
pub use sgf::{JosekiTree, Sequence, TreeNode};
pub use symmetry::{Transform, TransformSet};
pub use trainer::{JosekiTrainer, TrainerReport};

/// Player color in a Go game (Black or White)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Black player (moves first in even games)
    Black,
    /// White player
    White,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}

/// Zero-based board point addressed as (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    /// Row, 0 is the top edge
    pub y: u8,
    /// Column, 0 is the left edge
    pub x: u8,
}

impl Point {
    /// Create a new point from a row and a column
    pub fn new(y: u8, x: u8) -> Self {
        Self { y, x }
    }

    /// Check if the point lies on a board of the given size
    pub fn is_valid(&self, board_size: u8) -> bool {
        self.y < board_size && self.x < board_size
    }
}

/// A move on the board, without the color that played it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Place a stone at the specified point
    Place(Point),
    /// Pass the turn
    Pass,
}

impl Move {
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    /// The point played, if this is not a pass
    pub fn point(&self) -> Option<Point> {
        match self {
            Move::Place(point) => Some(*point),
            Move::Pass => None,
        }
    }
}

/// A move together with the color that made it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayedMove {
    pub color: Color,
    pub mv: Move,
}

impl PlayedMove {
    pub fn place(color: Color, y: u8, x: u8) -> Self {
        Self {
            color,
            mv: Move::Place(Point::new(y, x)),
        }
    }

    pub fn pass(color: Color) -> Self {
        Self {
            color,
            mv: Move::Pass,
        }
    }
}

/// Errors that reject a single move or marking request.
///
/// These are recoverable: the game history is left unchanged and the caller
/// is expected to prompt again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The point is outside the board
    #[error("Point ({y}, {x}) is outside the board")]
    OutOfBounds { y: u8, x: u8 },

    /// The point is already occupied
    #[error("Position already occupied")]
    OccupiedPosition,

    /// The move would leave the placed group without liberties
    #[error("Move would result in self-capture")]
    SelfCapture,

    /// The move retakes a ko immediately
    #[error("Move violates ko rule")]
    KoViolation,

    /// Two consecutive passes already ended the game
    #[error("Game is already over")]
    GameOver,

    /// Dead stones can only be marked once the game is over
    #[error("Game is not over yet")]
    GameNotOver,

    /// There is no stone at the point to mark
    #[error("No stone at ({y}, {x})")]
    EmptyIntersection { y: u8, x: u8 },
}

/// Errors raised while setting up a game or loading a reference tree.
/// They are fatal at setup and never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Board size must be between 1 and 19, got {0}")]
    InvalidBoardSize(u8),

    #[error("Unsupported handicap: {0}")]
    UnsupportedHandicap(String),

    #[error("Unknown scoring method: {0}")]
    UnknownScoring(String),

    #[error("Unsupported ko rule: {0}")]
    UnsupportedKoRule(String),

    #[error("Invalid game configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Malformed reference tree at byte {offset}: {reason}")]
    MalformedTree { offset: usize, reason: String },
}
