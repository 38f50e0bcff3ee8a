// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use joseki_core::board::handicap_points;
use joseki_core::{BoardState, Color, Point, Territory};
use std::collections::BTreeSet;

/// Render the board as ASCII art, rows numbered from the bottom edge.
///
/// Dead stones are shown as `x`; empty territory points as `b` and `w`.
pub fn render_board(state: &BoardState, dead: &BTreeSet<Point>, territory: &Territory) -> String {
    let size = state.board_size();
    let star_points = star_points(size);
    let mut output = String::new();

    push_column_labels(&mut output, state);

    for y in 0..size {
        let row_label = state.y_coordinate_for(y);
        output.push_str(&format!("{:2} ", row_label));

        for x in 0..size {
            let point = Point::new(y, x);
            let intersection = state.intersection_at(y, x);

            let symbol = match intersection.stone {
                Some(_) if dead.contains(&point) => "x",
                Some(Color::Black) => "●",
                Some(Color::White) => "○",
                None if territory.black.contains(&point) => "b",
                None if territory.white.contains(&point) => "w",
                None if star_points.contains(&point) => "*",
                None => "+",
            };

            output.push_str(&format!(" {}", symbol));
        }

        output.push_str(&format!(" {}", row_label));
        output.push('\n');
    }

    push_column_labels(&mut output, state);
    output
}

fn push_column_labels(output: &mut String, state: &BoardState) {
    output.push_str("   ");
    for x in 0..state.board_size() {
        output.push_str(&format!(" {}", state.x_coordinate_for(x)));
    }
    output.push('\n');
}

/// Star points drawn on an empty board; the same points fixed handicap uses
fn star_points(board_size: u8) -> Vec<Point> {
    match board_size {
        19 => handicap_points(board_size, 9),
        9 | 13 => handicap_points(board_size, 5),
        _ => Vec::new(),
    }
}
