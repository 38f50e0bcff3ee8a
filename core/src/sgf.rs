// SPDX-License-Identifier: MIT OR Apache-2.0

//! SGF (Smart Game Format) parsing into joseki reference trees

use crate::{Color, ConfigError, Move, Point};
use serde::{Deserialize, Serialize};
use std::iter::Peekable;
use std::str::CharIndices;

const SGF_LETTERS: &[u8; 19] = b"abcdefghijklmnopqrs";

/// Decode an SGF coordinate such as `pd` into a point.
///
/// The empty value and `tt` mean a pass and decode to `Some(Move::Pass)`.
pub fn sgf_coord_to_move(value: &str) -> Option<Move> {
    if value.is_empty() || value == "tt" {
        return Some(Move::Pass);
    }

    let bytes = value.as_bytes();
    if bytes.len() != 2 {
        return None;
    }

    let x = SGF_LETTERS.iter().position(|&c| c == bytes[0])? as u8;
    let y = SGF_LETTERS.iter().position(|&c| c == bytes[1])? as u8;
    Some(Move::Place(Point::new(y, x)))
}

/// Decode an SGF coordinate into a point; `None` for passes and bad values
pub fn sgf_coord_to_point(value: &str) -> Option<Point> {
    sgf_coord_to_move(value).and_then(|mv| mv.point())
}

/// Encode a point as an SGF coordinate; empty if it is off the 19x19 board
pub fn point_to_sgf_coord(point: Point) -> String {
    if !point.is_valid(19) {
        return String::new();
    }
    let mut coord = String::with_capacity(2);
    coord.push(SGF_LETTERS[point.x as usize] as char);
    coord.push(SGF_LETTERS[point.y as usize] as char);
    coord
}

/// One move of a reference line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub color: Color,
    pub mv: Move,
    /// Commentary attached to the move
    pub comment: Option<String>,
}

/// A linear run of moves followed by the alternative continuations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub nodes: Vec<TreeNode>,
    pub branches: Vec<Sequence>,
}

/// Properties of the game-info node at the head of a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootInfo {
    pub board_size: Option<u8>,
    pub name: Option<String>,
    pub comment: Option<String>,
}

/// A parsed reference tree; read-only once loaded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JosekiTree {
    pub info: RootInfo,
    pub root: Sequence,
}

impl JosekiTree {
    /// Tree made of a single line of moves without branches
    pub fn from_line(moves: Vec<TreeNode>) -> Self {
        Self {
            info: RootInfo::default(),
            root: Sequence {
                nodes: moves,
                branches: Vec::new(),
            },
        }
    }

    /// Sequence reached by following branch indices from the root
    pub fn sequence_at(&self, path: &[usize]) -> Option<&Sequence> {
        path.iter()
            .try_fold(&self.root, |sequence, &branch| sequence.branches.get(branch))
    }

    /// Number of nodes in the whole tree
    pub fn node_count(&self) -> usize {
        fn count(sequence: &Sequence) -> usize {
            sequence.nodes.len() + sequence.branches.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }
}

/// Parse the first game tree of an SGF record into a joseki tree
pub fn parse_tree(text: &str) -> Result<JosekiTree, ConfigError> {
    let mut parser = SgfParser::new(text);
    parser.skip_whitespace();
    let raw = parser.parse_game_tree()?;
    convert_tree(raw)
}

#[derive(Debug, Clone)]
struct SgfProperty {
    id: String,
    values: Vec<String>,
}

#[derive(Debug, Clone)]
struct SgfNode {
    offset: usize,
    properties: Vec<SgfProperty>,
}

impl SgfNode {
    fn value(&self, id: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.values.first().map(String::as_str).unwrap_or(""))
    }
}

#[derive(Debug, Clone)]
struct SgfTree {
    nodes: Vec<SgfNode>,
    variations: Vec<SgfTree>,
}

/// Recursive-descent reader over the raw record text
struct SgfParser<'a> {
    chars: Peekable<CharIndices<'a>>,
    len: usize,
}

impl<'a> SgfParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices().peekable(),
            len: text.len(),
        }
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map(|&(i, _)| i).unwrap_or(self.len)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn error(&mut self, reason: impl Into<String>) -> ConfigError {
        ConfigError::MalformedTree {
            offset: self.offset(),
            reason: reason.into(),
        }
    }

    fn expect(&mut self, expected: char, context: &str) -> Result<(), ConfigError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.chars.next();
                Ok(())
            }
            _ => Err(self.error(format!("expected '{}' {}", expected, context))),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn parse_game_tree(&mut self) -> Result<SgfTree, ConfigError> {
        self.expect('(', "at start of game tree")?;
        self.skip_whitespace();

        let mut nodes = Vec::new();
        while self.peek() == Some(';') {
            nodes.push(self.parse_node()?);
            self.skip_whitespace();
        }

        if nodes.is_empty() {
            return Err(self.error("game tree without nodes"));
        }

        let mut variations = Vec::new();
        while self.peek() == Some('(') {
            variations.push(self.parse_game_tree()?);
            self.skip_whitespace();
        }

        self.expect(')', "at end of game tree")?;
        Ok(SgfTree { nodes, variations })
    }

    fn parse_node(&mut self) -> Result<SgfNode, ConfigError> {
        let offset = self.offset();
        self.expect(';', "at start of node")?;
        self.skip_whitespace();

        let mut properties = Vec::new();
        while matches!(self.peek(), Some(c) if c.is_ascii_uppercase()) {
            properties.push(self.parse_property()?);
            self.skip_whitespace();
        }

        Ok(SgfNode { offset, properties })
    }

    fn parse_property(&mut self) -> Result<SgfProperty, ConfigError> {
        let mut id = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_uppercase() {
                break;
            }
            id.push(c);
            self.chars.next();
        }
        self.skip_whitespace();

        let mut values = Vec::new();
        while self.peek() == Some('[') {
            values.push(self.parse_property_value()?);
            self.skip_whitespace();
        }

        if values.is_empty() {
            return Err(self.error(format!("property {} has no value", id)));
        }

        Ok(SgfProperty { id, values })
    }

    fn parse_property_value(&mut self) -> Result<String, ConfigError> {
        self.expect('[', "at start of property value")?;

        let mut value = String::new();
        let mut escaped = false;
        loop {
            let Some((_, c)) = self.chars.next() else {
                return Err(self.error("unterminated property value"));
            };

            if escaped {
                // an escaped line break is a soft break and disappears
                if c != '\n' {
                    value.push(c);
                }
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == ']' {
                break;
            } else {
                value.push(c);
            }
        }

        Ok(value)
    }
}

fn convert_tree(raw: SgfTree) -> Result<JosekiTree, ConfigError> {
    let mut nodes = raw.nodes.into_iter().peekable();
    let mut info = RootInfo::default();

    if let Some(head) = nodes.next_if(|n| n.value("B").is_none() && n.value("W").is_none()) {
        info.name = head.value("GN").map(str::to_string);
        info.comment = head.value("C").map(str::to_string);
        if let Some(size) = head.value("SZ") {
            let size: u8 = size.trim().parse().map_err(|_| ConfigError::MalformedTree {
                offset: head.offset,
                reason: format!("invalid board size {:?}", size),
            })?;
            info.board_size = Some(size);
        }
    }

    let root = Sequence {
        nodes: nodes.map(convert_node).collect::<Result<_, _>>()?,
        branches: raw
            .variations
            .into_iter()
            .map(convert_sequence)
            .collect::<Result<_, _>>()?,
    };

    Ok(JosekiTree { info, root })
}

fn convert_sequence(raw: SgfTree) -> Result<Sequence, ConfigError> {
    Ok(Sequence {
        nodes: raw
            .nodes
            .into_iter()
            .map(convert_node)
            .collect::<Result<_, _>>()?,
        branches: raw
            .variations
            .into_iter()
            .map(convert_sequence)
            .collect::<Result<_, _>>()?,
    })
}

fn convert_node(raw: SgfNode) -> Result<TreeNode, ConfigError> {
    let malformed = |reason: String| ConfigError::MalformedTree {
        offset: raw.offset,
        reason,
    };

    let (color, value) = match (raw.value("B"), raw.value("W")) {
        (Some(value), None) => (Color::Black, value),
        (None, Some(value)) => (Color::White, value),
        (Some(_), Some(_)) => return Err(malformed("node has both a black and a white move".into())),
        (None, None) => return Err(malformed("node has no move".into())),
    };

    let mv = sgf_coord_to_move(value)
        .ok_or_else(|| malformed(format!("invalid move coordinate {:?}", value)))?;

    Ok(TreeNode {
        color,
        mv,
        comment: raw.value("C").map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_codec() {
        assert_eq!(sgf_coord_to_point("pd"), Some(Point::new(3, 15)));
        assert_eq!(sgf_coord_to_point("aa"), Some(Point::new(0, 0)));
        assert_eq!(sgf_coord_to_move(""), Some(Move::Pass));
        assert_eq!(sgf_coord_to_move("tt"), Some(Move::Pass));
        assert_eq!(sgf_coord_to_move("zz"), None);
        assert_eq!(point_to_sgf_coord(Point::new(3, 15)), "pd");
        assert_eq!(point_to_sgf_coord(Point::new(19, 0)), "");
    }

    #[test]
    fn test_escaped_values() {
        let tree = parse_tree("(;C[a \\] b];B[pd]C[line\\\none])").unwrap();
        assert_eq!(tree.info.comment.as_deref(), Some("a ] b"));
        assert_eq!(tree.root.nodes[0].comment.as_deref(), Some("lineone"));
    }
}
