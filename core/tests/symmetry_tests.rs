// SPDX-License-Identifier: MIT OR Apache-2.0

use joseki_core::symmetry::{possible_transforms, transform_move, transform_point};
use joseki_core::{Move, Point, Transform, TransformSet};
use proptest::prelude::*;

const R16: Point = Point { y: 3, x: 16 };
const Q16: Point = Point { y: 3, x: 15 };
const R17: Point = Point { y: 2, x: 16 };
const TENGEN: Point = Point { y: 9, x: 9 };

#[test]
fn images_of_r16() {
    let expected = [
        Point::new(3, 16),  // R16
        Point::new(15, 16), // R4
        Point::new(3, 2),   // C16
        Point::new(15, 2),  // C4
        Point::new(2, 15),  // Q17
        Point::new(16, 15), // Q3
        Point::new(2, 3),   // D17
        Point::new(16, 3),  // D3
    ];

    for (transform, image) in Transform::ALL.iter().zip(expected) {
        assert_eq!(transform_point(R16, *transform), image, "{:?}", transform);
    }
}

#[test]
fn passes_are_invariant() {
    for transform in Transform::ALL {
        assert_eq!(transform_move(Move::Pass, transform), Move::Pass);
    }
}

#[test]
fn possible_transforms_between_moves() {
    let all = TransformSet::all();

    // the star point lies on the diagonal
    let star = possible_transforms(Move::Place(Q16), Move::Place(Q16), all);
    assert_eq!(star.len(), 2);
    assert!(star.contains(Transform::IDENTITY));
    assert!(star.contains(Transform::new(true, false, false)));

    assert_eq!(possible_transforms(Move::Place(TENGEN), Move::Place(TENGEN), all).len(), 8);

    let single = possible_transforms(Move::Place(R16), Move::Place(Point::new(16, 3)), all);
    assert_eq!(single.iter().collect::<Vec<_>>(), vec![Transform::new(true, true, true)]);

    assert!(possible_transforms(Move::Place(R16), Move::Place(R17), all).is_empty());
    assert!(possible_transforms(Move::Pass, Move::Place(R16), all).is_empty());
    assert!(possible_transforms(Move::Place(R16), Move::Pass, all).is_empty());
    assert_eq!(possible_transforms(Move::Pass, Move::Pass, all), all);
}

#[test]
fn candidates_bound_the_result() {
    let mut candidates = TransformSet::empty();
    candidates.insert(Transform::new(false, true, false));

    let result = possible_transforms(Move::Place(TENGEN), Move::Place(TENGEN), candidates);
    assert_eq!(result, candidates);

    let none = possible_transforms(Move::Place(R16), Move::Place(R16), candidates);
    assert!(none.is_empty());
}

fn any_point() -> impl Strategy<Value = Point> {
    (0u8..19, 0u8..19).prop_map(|(y, x)| Point::new(y, x))
}

proptest! {
    #[test]
    fn transforms_stay_on_the_board(point in any_point()) {
        for transform in Transform::ALL {
            prop_assert!(transform_point(point, transform).is_valid(19));
        }
    }

    #[test]
    fn images_are_a_closed_orbit(point in any_point()) {
        let orbit: Vec<Point> = Transform::ALL.iter().map(|t| transform_point(point, *t)).collect();

        for image in &orbit {
            for transform in Transform::ALL {
                prop_assert!(orbit.contains(&transform_point(*image, transform)));
            }
        }
    }

    #[test]
    fn identity_is_always_possible(point in any_point()) {
        let possible = possible_transforms(Move::Place(point), Move::Place(point), TransformSet::all());
        prop_assert!(possible.contains(Transform::IDENTITY));
    }
}
