// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of the commands typed at the prompt

use anyhow::{anyhow, Result};
use joseki_core::{BoardState, Point};

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play a stone, e.g. `D4`
    Play(Point),
    Pass,
    Undo,
    /// Show the book continuations
    Options,
    /// Toggle the dead status of the stones around a point
    Dead(Point),
    Score,
    Help,
    Quit,
}

/// Parse a command against the current board, which decides which
/// coordinates exist
pub fn parse_command(input: &str, state: &BoardState) -> Result<Command> {
    let input = input.trim();
    let mut words = input.split_whitespace();
    let Some(first) = words.next() else {
        return Err(anyhow!("Empty command. Type 'help' for a list of commands."));
    };

    let command = match first.to_lowercase().as_str() {
        "pass" => Command::Pass,
        "undo" => Command::Undo,
        "options" | "hint" => Command::Options,
        "score" => Command::Score,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "dead" => {
            let coord = words
                .next()
                .ok_or_else(|| anyhow!("Usage: dead <coordinate>, e.g. 'dead C3'"))?;
            Command::Dead(parse_point(coord, state)?)
        }
        _ => Command::Play(parse_point(first, state)?),
    };

    if words.next().is_some() {
        return Err(anyhow!("Unexpected text after '{}'", first));
    }
    Ok(command)
}

fn parse_point(coord: &str, state: &BoardState) -> Result<Point> {
    state.parse_coordinates(coord).ok_or_else(|| {
        anyhow!(
            "Invalid coordinate '{}'. Use a column A-{} (skipping I) and a row 1-{}.",
            coord,
            state.x_coordinate_for(state.board_size() - 1),
            state.board_size()
        )
    })
}

/// Text printed for `help`
pub const HELP: &str = "\
Commands:
  <coordinate>   play a stone, e.g. D4
  pass           pass
  undo           take back the last move
  options        show the book continuations
  dead <coord>   toggle dead stones once the game is over
  score          show territory and score
  quit           leave";

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> BoardState {
        BoardState::empty(19).unwrap()
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_command("D4", &board()).unwrap(), Command::Play(Point::new(15, 3)));
        assert_eq!(parse_command("q16", &board()).unwrap(), Command::Play(Point::new(3, 15)));
        assert_eq!(parse_command(" pass ", &board()).unwrap(), Command::Pass);
        assert_eq!(parse_command("PASS", &board()).unwrap(), Command::Pass);
        assert!(parse_command("Z9", &board()).is_err());
        assert!(parse_command("I5", &board()).is_err());
        assert!(parse_command("A20", &board()).is_err());
    }

    #[test]
    fn test_parse_dead() {
        assert_eq!(
            parse_command("dead C3", &board()).unwrap(),
            Command::Dead(Point::new(16, 2))
        );
        assert!(parse_command("dead", &board()).is_err());
        assert!(parse_command("dead C3 D4", &board()).is_err());
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_command("undo", &board()).unwrap(), Command::Undo);
        assert_eq!(parse_command("options", &board()).unwrap(), Command::Options);
        assert_eq!(parse_command("score", &board()).unwrap(), Command::Score);
        assert_eq!(parse_command("quit", &board()).unwrap(), Command::Quit);
        assert!(parse_command("", &board()).is_err());
    }

    #[test]
    fn test_coordinates_respect_board_size() {
        let small = BoardState::empty(9).unwrap();
        assert_eq!(parse_command("J9", &small).unwrap(), Command::Play(Point::new(0, 8)));
        assert!(parse_command("K9", &small).is_err());
        assert!(parse_command("A10", &small).is_err());
    }
}
