// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable board states and the flood fill they are built on

use crate::{Color, ConfigError, Point};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Column letters used for display, skipping `I`
const COLUMN_LABELS: &[u8; 25] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// A single board point and the stone on it, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intersection {
    pub point: Point,
    pub stone: Option<Color>,
}

impl Intersection {
    pub fn is_empty(&self) -> bool {
        self.stone.is_none()
    }

    pub fn is_occupied_with(&self, color: Color) -> bool {
        self.stone == Some(color)
    }

    /// Same stone color, treating two empty points as alike
    pub fn same_color_as(&self, other: &Intersection) -> bool {
        self.stone == other.stone
    }
}

/// Fields of a [`BoardState`] that [`BoardState::copy_with_attributes`] can override.
/// `None` keeps the original value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateOverrides {
    pub move_number: Option<usize>,
    pub color: Option<Option<Color>>,
    pub played_point: Option<Option<Point>>,
    pub pass: Option<bool>,
    pub ko_point: Option<Option<Point>>,
}

/// Snapshot of the whole board after some number of moves.
///
/// States never change once built; every transition returns a new state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    board_size: u8,
    intersections: Vec<Intersection>,
    /// Index of this state in the game history, 0 for the initial state
    pub move_number: usize,
    /// Color that made the transition into this state
    pub color: Option<Color>,
    pub played_point: Option<Point>,
    pub pass: bool,
    /// Point the opponent may not retake on the next move
    pub ko_point: Option<Point>,
    /// Black stones removed from the board so far
    pub black_stones_captured: u32,
    /// White stones removed from the board so far
    pub white_stones_captured: u32,
}

impl BoardState {
    /// Empty board of the given size
    pub fn empty(board_size: u8) -> Result<Self, ConfigError> {
        if board_size == 0 || board_size > 19 {
            return Err(ConfigError::InvalidBoardSize(board_size));
        }

        let intersections = (0..board_size)
            .flat_map(|y| (0..board_size).map(move |x| Point::new(y, x)))
            .map(|point| Intersection { point, stone: None })
            .collect();

        Ok(Self {
            board_size,
            intersections,
            move_number: 0,
            color: None,
            played_point: None,
            pass: false,
            ko_point: None,
            black_stones_captured: 0,
            white_stones_captured: 0,
        })
    }

    /// Initial state with fixed handicap stones placed on the star points.
    ///
    /// With two or more handicap stones the initial state is attributed to
    /// Black, so White makes the first move.
    pub fn initial(board_size: u8, handicap: u8) -> Result<Self, ConfigError> {
        let mut state = Self::empty(board_size)?;

        if handicap == 0 {
            return Ok(state);
        }

        if handicap == 1 || handicap > 9 {
            return Err(ConfigError::UnsupportedHandicap(format!(
                "only 2 to 9 handicap stones are supported, got {}",
                handicap
            )));
        }

        if ![9, 13, 19].contains(&board_size) {
            return Err(ConfigError::UnsupportedHandicap(format!(
                "handicap stones are not supported on {}x{}",
                board_size, board_size
            )));
        }

        for point in handicap_points(board_size, handicap) {
            let idx = state.index_of(point);
            state.intersections[idx].stone = Some(Color::Black);
        }
        state.color = Some(Color::Black);

        Ok(state)
    }

    pub fn board_size(&self) -> u8 {
        self.board_size
    }

    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    /// Intersection at (y, x); the point must be on the board
    pub fn intersection_at(&self, y: u8, x: u8) -> Intersection {
        self.intersections[self.index_of(Point::new(y, x))]
    }

    pub fn contains(&self, point: Point) -> bool {
        point.is_valid(self.board_size)
    }

    fn index_of(&self, point: Point) -> usize {
        (point.y as usize) * (self.board_size as usize) + (point.x as usize)
    }

    fn at(&self, point: Point) -> Intersection {
        self.intersections[self.index_of(point)]
    }

    /// Orthogonal neighbors of a point that lie on the board
    pub fn neighbors_of(&self, point: Point) -> Vec<Intersection> {
        let mut result = Vec::with_capacity(4);
        let Point { y, x } = point;

        if y > 0 {
            result.push(self.at(Point::new(y - 1, x)));
        }
        if y + 1 < self.board_size {
            result.push(self.at(Point::new(y + 1, x)));
        }
        if x > 0 {
            result.push(self.at(Point::new(y, x - 1)));
        }
        if x + 1 < self.board_size {
            result.push(self.at(Point::new(y, x + 1)));
        }

        result
    }

    /// Color expected to move after this state
    pub fn next_color(&self) -> Color {
        match self.color {
            Some(Color::Black) => Color::White,
            _ => Color::Black,
        }
    }

    /// Flood fill from `start` through every intersection satisfying `include`.
    ///
    /// Returns the connected matched set (which always contains `start`) and
    /// the intersections bordering it that did not satisfy the predicate.
    pub fn partition_traverse<F>(
        &self,
        start: Intersection,
        include: F,
    ) -> (Vec<Intersection>, Vec<Intersection>)
    where
        F: Fn(&Intersection) -> bool,
    {
        let mut checked = HashSet::new();
        let mut matched = Vec::new();
        let mut frontier = Vec::new();
        let mut frontier_seen = HashSet::new();
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if !checked.insert(current.point) {
                continue;
            }
            matched.push(current);

            for neighbor in self.neighbors_of(current.point) {
                if checked.contains(&neighbor.point) {
                    continue;
                }
                if include(&neighbor) {
                    stack.push(neighbor);
                } else if frontier_seen.insert(neighbor.point) {
                    frontier.push(neighbor);
                }
            }
        }

        (matched, frontier)
    }

    /// All stones connected to the stone at (y, x); empty for an empty point
    pub fn group_at(&self, y: u8, x: u8) -> Vec<Intersection> {
        let start = self.intersection_at(y, x);
        if start.is_empty() {
            return Vec::new();
        }

        let (group, _) = self.partition_traverse(start, |i| i.same_color_as(&start));
        group
    }

    /// Empty points adjacent to the group at (y, x)
    pub fn liberties_of_group_at(&self, y: u8, x: u8) -> Vec<Intersection> {
        let start = self.intersection_at(y, x);
        if start.is_empty() {
            return Vec::new();
        }

        let (_, frontier) = self.partition_traverse(start, |i| i.same_color_as(&start));
        frontier.into_iter().filter(Intersection::is_empty).collect()
    }

    pub fn liberties_at(&self, y: u8, x: u8) -> usize {
        self.liberties_of_group_at(y, x).len()
    }

    pub fn in_atari(&self, y: u8, x: u8) -> bool {
        self.liberties_at(y, x) == 1
    }

    /// Opposing stones that placing `color` at (y, x) would capture
    fn captures_from(&self, y: u8, x: u8, color: Color) -> Vec<Point> {
        let mut captured: Vec<Point> = Vec::new();

        for neighbor in self.neighbors_of(Point::new(y, x)) {
            if neighbor.is_empty() || neighbor.is_occupied_with(color) {
                continue;
            }
            if captured.contains(&neighbor.point) {
                continue;
            }
            if self.in_atari(neighbor.point.y, neighbor.point.x) {
                captured.extend(
                    self.group_at(neighbor.point.y, neighbor.point.x)
                        .into_iter()
                        .map(|i| i.point),
                );
            }
        }

        captured
    }

    /// Place a stone and resolve captures.
    ///
    /// The point must be on the board and empty. Suicide is not checked here;
    /// the ruleset rejects it before a move is applied.
    pub fn play_at(&self, y: u8, x: u8, color: Color) -> BoardState {
        let played = Point::new(y, x);
        let captured = self.captures_from(y, x, color);

        let mut next = BoardState {
            board_size: self.board_size,
            intersections: self.intersections.clone(),
            move_number: self.move_number + 1,
            color: Some(color),
            played_point: Some(played),
            pass: false,
            ko_point: None,
            black_stones_captured: self.black_stones_captured,
            white_stones_captured: self.white_stones_captured,
        };

        let played_idx = next.index_of(played);
        next.intersections[played_idx].stone = Some(color);

        for point in &captured {
            let idx = next.index_of(*point);
            next.intersections[idx].stone = None;
        }

        let count = captured.len() as u32;
        match color {
            Color::Black => next.white_stones_captured += count,
            Color::White => next.black_stones_captured += count,
        }

        if captured.len() == 1 && next.group_at(y, x).len() == 1 && next.in_atari(y, x) {
            next.ko_point = Some(captured[0]);
        }

        next
    }

    /// State after `color` passes; the board is unchanged
    pub fn play_pass(&self, color: Color) -> BoardState {
        BoardState {
            board_size: self.board_size,
            intersections: self.intersections.clone(),
            move_number: self.move_number + 1,
            color: Some(color),
            played_point: None,
            pass: true,
            ko_point: None,
            black_stones_captured: self.black_stones_captured,
            white_stones_captured: self.white_stones_captured,
        }
    }

    /// Structural copy with the given fields replaced
    pub fn copy_with_attributes(&self, overrides: StateOverrides) -> BoardState {
        let mut copy = self.clone();

        if let Some(move_number) = overrides.move_number {
            copy.move_number = move_number;
        }
        if let Some(color) = overrides.color {
            copy.color = color;
        }
        if let Some(played_point) = overrides.played_point {
            copy.played_point = played_point;
        }
        if let Some(pass) = overrides.pass {
            copy.pass = pass;
        }
        if let Some(ko_point) = overrides.ko_point {
            copy.ko_point = ko_point;
        }

        copy
    }

    /// Whether both states have the same stones on the same points
    pub fn same_position_as(&self, other: &BoardState) -> bool {
        self.board_size == other.board_size
            && self
                .intersections
                .iter()
                .zip(&other.intersections)
                .all(|(a, b)| a.stone == b.stone)
    }

    /// Number of stones of `color` on the board
    pub fn stones_of(&self, color: Color) -> usize {
        self.intersections
            .iter()
            .filter(|i| i.is_occupied_with(color))
            .count()
    }

    /// Column label such as `D`, skipping `I`
    pub fn x_coordinate_for(&self, x: u8) -> char {
        COLUMN_LABELS[x as usize] as char
    }

    /// Row label counted from the bottom edge, starting at 1
    pub fn y_coordinate_for(&self, y: u8) -> u8 {
        self.board_size - y
    }

    /// Human-readable coordinates such as `D4`
    pub fn coordinates_for(&self, y: u8, x: u8) -> String {
        coordinates_label(self.board_size, Point::new(y, x))
    }

    /// Parse human-readable coordinates such as `D4` or `q16`
    pub fn parse_coordinates(&self, text: &str) -> Option<Point> {
        let text = text.trim();
        let mut chars = text.chars();
        let column = chars.next()?.to_ascii_uppercase();
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let row: u8 = digits.parse().ok()?;

        let x = COLUMN_LABELS.iter().position(|&c| c as char == column)? as u8;
        if x >= self.board_size || row == 0 || row > self.board_size {
            return None;
        }

        Some(Point::new(self.board_size - row, x))
    }
}

/// Human-readable label of a point on a board of the given size, such as `D4`.
///
/// Points off that board fall back to their SGF coordinate.
pub fn coordinates_label(board_size: u8, point: Point) -> String {
    if !point.is_valid(board_size) {
        return crate::sgf::point_to_sgf_coord(point);
    }
    format!(
        "{}{}",
        COLUMN_LABELS[point.x as usize] as char,
        board_size - point.y
    )
}

/// Star points used for fixed handicap placement, in placement order
pub fn handicap_points(board_size: u8, handicap: u8) -> Vec<Point> {
    let offset = if board_size > 11 { 3 } else { 2 };
    if board_size < 2 * offset + 1 {
        return Vec::new();
    }
    let far = board_size - offset - 1;
    let mid = (board_size + 1) / 2 - 1;

    let top_right = Point::new(offset, far);
    let bottom_left = Point::new(far, offset);
    let bottom_right = Point::new(far, far);
    let top_left = Point::new(offset, offset);
    let middle = Point::new(mid, mid);
    let left_middle = Point::new(mid, offset);
    let right_middle = Point::new(mid, far);
    let top_middle = Point::new(offset, mid);
    let bottom_middle = Point::new(far, mid);

    let corners = [top_right, bottom_left, bottom_right, top_left];
    let mut points = Vec::with_capacity(handicap as usize);

    match handicap {
        2 => points.extend_from_slice(&corners[..2]),
        3 => points.extend_from_slice(&corners[..3]),
        4 => points.extend_from_slice(&corners),
        5 => {
            points.extend_from_slice(&corners);
            points.push(middle);
        }
        6 | 7 => {
            points.extend_from_slice(&corners);
            points.extend([left_middle, right_middle]);
            if handicap == 7 {
                points.push(middle);
            }
        }
        8 | 9 => {
            points.extend_from_slice(&corners);
            points.extend([left_middle, right_middle, top_middle, bottom_middle]);
            if handicap == 9 {
                points.push(middle);
            }
        }
        _ => {}
    }

    points
}
