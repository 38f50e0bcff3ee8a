// SPDX-License-Identifier: MIT OR Apache-2.0

//! The eight symmetries of the square board.
//!
//! Transforms act on the canonical 19x19 coordinate space that reference
//! trees are written in, whatever the size of the board being played.

use crate::{Move, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest coordinate on the canonical 19x19 board
const EDGE: u8 = 18;

/// One element of the dihedral group of the square.
///
/// `diagonal` mirrors along the bottom-left to top-right diagonal,
/// `horizontal` swaps left and right, `vertical` swaps top and bottom.
/// They are applied in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transform {
    pub diagonal: bool,
    pub horizontal: bool,
    pub vertical: bool,
}

impl Transform {
    pub const IDENTITY: Transform = Transform::new(false, false, false);

    /// All eight transforms; the order is part of the contract (R16 is the
    /// image of R16 under each: R16, R4, C16, C4, Q17, Q3, D17, D3)
    pub const ALL: [Transform; 8] = [
        Transform::new(false, false, false),
        Transform::new(false, false, true),
        Transform::new(false, true, false),
        Transform::new(false, true, true),
        Transform::new(true, false, false),
        Transform::new(true, false, true),
        Transform::new(true, true, false),
        Transform::new(true, true, true),
    ];

    pub const fn new(diagonal: bool, horizontal: bool, vertical: bool) -> Self {
        Self {
            diagonal,
            horizontal,
            vertical,
        }
    }

    /// Position of this transform in [`Transform::ALL`]
    pub fn index(&self) -> usize {
        (self.diagonal as usize) << 2 | (self.horizontal as usize) << 1 | self.vertical as usize
    }

    /// Image of a point; the point must lie on the 19x19 board
    pub fn apply(&self, point: Point) -> Point {
        debug_assert!(point.is_valid(EDGE + 1), "{:?} is off the board", point);
        let mut target = point;
        if self.diagonal {
            target = Point::new(EDGE - point.x, EDGE - point.y);
        }
        if self.horizontal {
            target.x = EDGE - target.x;
        }
        if self.vertical {
            target.y = EDGE - target.y;
        }
        target
    }
}

/// Image of a point under a transform; the point must lie on the 19x19 board
pub fn transform_point(point: Point, transform: Transform) -> Point {
    transform.apply(point)
}

/// Image of a move under a transform; passes are left untouched
pub fn transform_move(mv: Move, transform: Transform) -> Move {
    match mv {
        Move::Place(point) => Move::Place(transform.apply(point)),
        Move::Pass => Move::Pass,
    }
}

/// The members of `candidates` that map `source` onto `target`.
///
/// A pass maps onto a pass under every transform and onto no stone.
pub fn possible_transforms(source: Move, target: Move, candidates: TransformSet) -> TransformSet {
    match (source, target) {
        (Move::Pass, Move::Pass) => candidates,
        (Move::Place(source), Move::Place(target)) => candidates.filter(|t| t.apply(source) == target),
        _ => TransformSet::empty(),
    }
}

/// A subset of [`Transform::ALL`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransformSet(u8);

impl TransformSet {
    pub const fn all() -> Self {
        TransformSet(0xff)
    }

    pub const fn empty() -> Self {
        TransformSet(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn contains(&self, transform: Transform) -> bool {
        self.0 & (1 << transform.index()) != 0
    }

    pub fn insert(&mut self, transform: Transform) {
        self.0 |= 1 << transform.index();
    }

    pub fn intersection(&self, other: TransformSet) -> TransformSet {
        TransformSet(self.0 & other.0)
    }

    /// Members for which `keep` holds
    pub fn filter<F>(&self, keep: F) -> TransformSet
    where
        F: Fn(&Transform) -> bool,
    {
        self.iter()
            .filter(|t| keep(t))
            .fold(TransformSet::empty(), |mut set, t| {
                set.insert(t);
                set
            })
    }

    /// Members in the order of [`Transform::ALL`]
    pub fn iter(&self) -> impl Iterator<Item = Transform> + '_ {
        Transform::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl Default for TransformSet {
    fn default() -> Self {
        TransformSet::all()
    }
}

impl FromIterator<Transform> for TransformSet {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        let mut set = TransformSet::empty();
        for transform in iter {
            set.insert(transform);
        }
        set
    }
}

impl fmt::Debug for TransformSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|t| t.index())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_order() {
        for (i, transform) in Transform::ALL.iter().enumerate() {
            assert_eq!(transform.index(), i);
        }
    }

    #[test]
    fn test_set_operations() {
        let mut set = TransformSet::empty();
        assert!(set.is_empty());
        set.insert(Transform::ALL[4]);
        set.insert(Transform::IDENTITY);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Transform::ALL[4]));
        assert!(!set.contains(Transform::ALL[5]));

        let narrowed = TransformSet::all().intersection(set);
        assert_eq!(narrowed, set);
        assert_eq!(
            narrowed.iter().collect::<Vec<_>>(),
            vec![Transform::IDENTITY, Transform::ALL[4]]
        );
    }

    #[test]
    fn test_edges_map_to_edges() {
        for transform in Transform::ALL {
            for point in [Point::new(0, 0), Point::new(18, 18), Point::new(0, 18)] {
                assert!(transform.apply(point).is_valid(19));
            }
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "off the board")]
    fn test_point_off_the_board_is_rejected() {
        Transform::IDENTITY.apply(Point::new(19, 0));
    }
}
