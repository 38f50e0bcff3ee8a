// SPDX-License-Identifier: MIT OR Apache-2.0

//! Matching a played game against a joseki reference tree.
//!
//! A [`MatchSession`] walks the tree one played move at a time. Reference
//! moves may be matched in any of the eight board orientations; the set of
//! orientations still consistent with the game only ever shrinks.

use crate::board::coordinates_label;
use crate::sgf::{JosekiTree, Sequence, TreeNode};
use crate::symmetry::{possible_transforms, transform_move, TransformSet};
use crate::{Color, Move, PlayedMove};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Where a session stands relative to the reference tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Every move so far follows the tree and continuations remain
    InBook,
    /// Every move follows the tree and the line has ended
    BookComplete,
    /// A move left the tree; terminal
    OutOfBook,
}

/// Result of feeding one move to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advance {
    pub in_book: bool,
    /// Book continuations for the opponent; `None` once out of book
    pub next_options: Option<Vec<Move>>,
}

/// The move that left the book and what the book offered instead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Divergence {
    pub played: PlayedMove,
    /// Book moves for the same color at the abandoned position, in every
    /// orientation still admissible at that point
    pub alternatives: Vec<Move>,
}

impl Divergence {
    /// Human-readable summary for a board of the given size
    pub fn describe(&self, board_size: u8) -> String {
        let alternatives = self
            .alternatives
            .iter()
            .map(|mv| move_label(board_size, *mv))
            .collect::<Vec<_>>()
            .join(" or ");

        format!(
            "instead of {} it was better to play one of [{}]",
            move_label(board_size, self.played.mv),
            alternatives
        )
    }
}

fn move_label(board_size: u8, mv: Move) -> String {
    match mv {
        Move::Place(point) => coordinates_label(board_size, point),
        Move::Pass => "pass".to_string(),
    }
}

/// A reference move that could come next, and how to reach it
#[derive(Debug, Clone, Copy)]
struct Child<'t> {
    /// `None` continues the current line, `Some(i)` enters branch `i`
    branch: Option<usize>,
    node: &'t TreeNode,
}

/// One game matched against one reference tree.
///
/// Sessions are not shared between games; each game owns its own.
#[derive(Debug, Clone)]
pub struct MatchSession {
    tree: Arc<JosekiTree>,
    /// Branch indices from the root to the current sequence
    path: Vec<usize>,
    /// Index of the next node to match in the current sequence
    next_node: usize,
    transforms: TransformSet,
    moves_matched: usize,
    divergence: Option<Divergence>,
}

impl MatchSession {
    pub fn new(tree: Arc<JosekiTree>) -> Self {
        Self {
            tree,
            path: Vec::new(),
            next_node: 0,
            transforms: TransformSet::all(),
            moves_matched: 0,
            divergence: None,
        }
    }

    /// Session that has already seen `moves`
    pub fn replay<'m>(tree: Arc<JosekiTree>, moves: impl IntoIterator<Item = &'m PlayedMove>) -> Self {
        let mut session = Self::new(tree);
        for played in moves {
            session.advance(*played);
        }
        session
    }

    pub fn tree(&self) -> &Arc<JosekiTree> {
        &self.tree
    }

    /// Orientations still consistent with the moves played
    pub fn transforms(&self) -> TransformSet {
        self.transforms
    }

    pub fn moves_matched(&self) -> usize {
        self.moves_matched
    }

    pub fn divergence(&self) -> Option<&Divergence> {
        self.divergence.as_ref()
    }

    pub fn is_in_book(&self) -> bool {
        self.divergence.is_none()
    }

    pub fn status(&self) -> MatchStatus {
        if self.divergence.is_some() {
            MatchStatus::OutOfBook
        } else if self.children().is_empty() {
            MatchStatus::BookComplete
        } else {
            MatchStatus::InBook
        }
    }

    /// Commentary on the last matched reference move, or on the tree itself
    /// before any move was matched
    pub fn comment(&self) -> Option<&str> {
        if self.divergence.is_some() {
            return None;
        }
        if self.next_node == 0 {
            return self.tree.info.comment.as_deref();
        }
        self.sequence().nodes[self.next_node - 1].comment.as_deref()
    }

    fn sequence(&self) -> &Sequence {
        // paths are only ever built from existing branches
        self.tree.sequence_at(&self.path).unwrap_or(&self.tree.root)
    }

    fn children(&self) -> Vec<Child<'_>> {
        let sequence = self.sequence();

        if let Some(node) = sequence.nodes.get(self.next_node) {
            return vec![Child { branch: None, node }];
        }

        sequence
            .branches
            .iter()
            .enumerate()
            .filter_map(|(i, branch)| {
                branch.nodes.first().map(|node| Child {
                    branch: Some(i),
                    node,
                })
            })
            .collect()
    }

    /// Book moves for `color` at the current position, expanded by every
    /// admissible orientation and de-duplicated.
    ///
    /// Returns `None` once out of book and an empty list when the book has no
    /// continuation for `color`.
    pub fn next_move_options(&self, color: Color) -> Option<Vec<Move>> {
        if self.divergence.is_some() {
            return None;
        }
        Some(self.options_for(color))
    }

    fn options_for(&self, color: Color) -> Vec<Move> {
        let mut options = Vec::new();

        for child in self.children() {
            if child.node.color != color {
                continue;
            }
            for transform in self.transforms.iter() {
                let mv = transform_move(child.node.mv, transform);
                if !options.contains(&mv) {
                    options.push(mv);
                }
            }
        }

        options
    }

    /// Match one played move against the tree.
    ///
    /// Branches are tried in stored order and the first one admitting the
    /// move under some remaining orientation wins.
    pub fn advance(&mut self, played: PlayedMove) -> Advance {
        if self.divergence.is_some() {
            return Advance {
                in_book: false,
                next_options: None,
            };
        }

        let matched = self.children().into_iter().find_map(|child| {
            if child.node.color != played.color {
                return None;
            }
            let possible = possible_transforms(child.node.mv, played.mv, self.transforms);
            (!possible.is_empty()).then_some((child.branch, possible))
        });

        let Some((branch, possible)) = matched else {
            let alternatives = self.options_for(played.color);
            info!(
                move_number = self.moves_matched + 1,
                ?played,
                alternatives = alternatives.len(),
                "game left the reference tree"
            );
            self.divergence = Some(Divergence {
                played,
                alternatives,
            });
            return Advance {
                in_book: false,
                next_options: None,
            };
        };

        let narrowed = self.transforms.intersection(possible);
        if narrowed != self.transforms {
            debug!(before = ?self.transforms, after = ?narrowed, "narrowed board orientations");
        }
        self.transforms = narrowed;

        match branch {
            None => self.next_node += 1,
            Some(i) => {
                self.path.push(i);
                self.next_node = 1;
            }
        }
        self.moves_matched += 1;

        if self.children().is_empty() {
            info!(moves = self.moves_matched, "reference line completed");
        }

        Advance {
            in_book: true,
            next_options: self.next_move_options(played.color.opposite()),
        }
    }
}
