// SPDX-License-Identifier: MIT OR Apache-2.0

// End-to-end test: load a reference tree from disk, drive a trainer with
// parsed commands and render the final position
use joseki_cli::command::{parse_command, Command};
use joseki_cli::load_tree;
use joseki_cli::render::render_board;
use joseki_core::{Color, Game, GameConfig, GameView, JosekiTrainer, MatchStatus};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::sync::Arc;

#[test]
fn load_and_play_a_line() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "(;GM[1]SZ[19]GN[3-3 invasion]")?;
    writeln!(file, ";B[pd];W[qc];B[qd];W[pc])")?;

    let tree = load_tree(file.path())?;
    assert_eq!(tree.info.name.as_deref(), Some("3-3 invasion"));

    let game = Game::new(GameConfig::with_size(19))?;
    let mut trainer =
        JosekiTrainer::new(game, Arc::new(tree), StdRng::seed_from_u64(0)).with_autoplay(Some(Color::White));

    for input in ["D16", "D17"] {
        let command = parse_command(input, trainer.game().current_state())?;
        let Command::Play(point) = command else {
            panic!("{} should be a move", input);
        };
        let report = trainer.play_at(point.y, point.x)?;
        assert!(report.advance.in_book);
        assert!(report.reply.is_some());
    }

    assert_eq!(trainer.status(), MatchStatus::BookComplete);

    let game = trainer.game();
    let board = render_board(game.current_state(), game.dead_stones(), &game.territory());
    assert_eq!(board.matches('●').count(), 2);
    assert_eq!(board.matches('○').count(), 2);
    Ok(())
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_tree(&dir.path().join("missing.sgf")).unwrap_err();
    assert!(err.to_string().contains("Failed to read reference tree"));
}

#[test]
fn malformed_file_is_an_error() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "(;B[pd];W[zz])")?;

    let err = load_tree(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse reference tree"));
    Ok(())
}
