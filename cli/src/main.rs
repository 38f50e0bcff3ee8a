// SPDX-License-Identifier: MIT OR Apache-2.0

//! Joseki CLI - play a game of Go against a joseki reference tree
//!
//! This binary reads commands from stdin, reports whether each move is
//! still in the book, and can answer with book moves for one color.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use joseki_cli::command::{parse_command, Command, HELP};
use joseki_cli::{load_tree, render};
use joseki_core::{
    Color, Game, GameConfig, GameView, JosekiTrainer, JosekiTree, MatchStatus, Move, ScoringMethod,
    TrainerReport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(
    name = "joseki-cli",
    about = "Practice Go openings against a joseki reference tree",
    version
)]
struct Args {
    /// Board size (1 to 19)
    #[clap(short, long)]
    size: Option<u8>,

    /// Komi added to White's score
    #[clap(short, long)]
    komi: Option<f32>,

    /// Number of handicap stones (2 to 9, on 9x9, 13x13 and 19x19)
    #[clap(long)]
    handicap: Option<u8>,

    /// Let Black place the handicap stones freely
    #[clap(long)]
    free_handicap: bool,

    /// Scoring method
    #[clap(long, value_enum)]
    scoring: Option<Scoring>,

    /// Game configuration as a JSON file; flags override its values
    #[clap(long)]
    config: Option<PathBuf>,

    /// Joseki reference tree in SGF format
    #[clap(long)]
    sgf: Option<PathBuf>,

    /// Answer with book moves for this color
    #[clap(long, value_enum)]
    autoplay: Option<Side>,

    /// Seed for the autoplay move choice
    #[clap(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Scoring {
    Territory,
    Area,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Side {
    Black,
    White,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Color::Black,
            Side::White => Color::White,
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            GameConfig::from_json(&text)?
        }
        None => GameConfig::default(),
    };

    if let Some(size) = args.size {
        config.board_size = size;
    }
    if let Some(komi) = args.komi {
        config.komi = komi;
    }
    if let Some(handicap) = args.handicap {
        config.handicap_stones = handicap;
    }
    if args.free_handicap {
        config.free_handicap_placement = true;
    }
    if let Some(scoring) = args.scoring {
        config.scoring = match scoring {
            Scoring::Territory => ScoringMethod::Territory,
            Scoring::Area => ScoringMethod::Area,
        };
    }

    config.validate()?;
    Ok(config)
}

/// Main entry point
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = build_config(&args)?;
    let tree = match &args.sgf {
        Some(path) => load_tree(path)?,
        None => {
            tracing::warn!("no reference tree given, every move will be out of book");
            JosekiTree::default()
        }
    };

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let game = Game::new(config)?;
    let mut trainer =
        JosekiTrainer::new(game, Arc::new(tree), rng).with_autoplay(args.autoplay.map(Color::from));

    if let Some(comment) = trainer.session().comment() {
        println!("{}", comment);
    }
    print_game_state(&trainer);

    // autoplay may hold the first move, e.g. White after a fixed handicap
    if let Some(opening) = trainer.autoplay_turn()? {
        println!("{} opens with {}", opening.color, move_label(&trainer, opening.mv));
        print_game_state(&trainer);
    }

    run_loop(&mut trainer)
}

fn run_loop(trainer: &mut JosekiTrainer<StdRng>) -> Result<()> {
    let stdin = std::io::stdin();

    loop {
        println!(
            "\n{} to move. Enter a move (e.g., 'D4'), 'pass', or 'help':",
            trainer.game().current_player()
        );

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            break; // EOF
        }

        let command = match parse_command(&line, trainer.game().current_state()) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let was_in_book = trainer.session().is_in_book();
        match command {
            Command::Play(point) => match trainer.play_at(point.y, point.x) {
                Ok(report) => {
                    print_report(trainer, &report, was_in_book);
                    print_game_state(trainer);
                }
                Err(e) => eprintln!("Invalid move: {}", e),
            },
            Command::Pass => match trainer.pass() {
                Ok(report) => {
                    print_report(trainer, &report, was_in_book);
                    print_game_state(trainer);
                    if trainer.game().is_over() {
                        println!("Game over! Mark dead stones with 'dead <coord>', then 'score'.");
                    }
                }
                Err(e) => eprintln!("Invalid move: {}", e),
            },
            Command::Undo => {
                if trainer.undo() {
                    print_game_state(trainer);
                } else {
                    eprintln!("Nothing to undo.");
                }
            }
            Command::Options => print_options(trainer),
            Command::Dead(point) => match trainer.game_mut().toggle_dead_at(point.y, point.x) {
                Ok(()) => print_game_state(trainer),
                Err(e) => eprintln!("Cannot mark dead stones: {}", e),
            },
            Command::Score => print_score(trainer),
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn move_label(trainer: &JosekiTrainer<StdRng>, mv: Move) -> String {
    match mv {
        Move::Place(point) => trainer.game().coordinates_for(point.y, point.x),
        Move::Pass => "pass".to_string(),
    }
}

fn print_report(trainer: &JosekiTrainer<StdRng>, report: &TrainerReport, was_in_book: bool) {
    if let Some(reply) = report.reply {
        println!("{} answers {}", reply.color, move_label(trainer, reply.mv));
    }

    if report.advance.in_book {
        if let Some(comment) = trainer.session().comment() {
            println!("Book: {}", comment);
        }
        if trainer.status() == MatchStatus::BookComplete {
            println!("End of the book line.");
        }
    } else if was_in_book {
        if let Some(divergence) = &report.divergence {
            println!("Out of book: {}", divergence.describe(trainer.game().board_size()));
        }
    }
}

fn print_options(trainer: &JosekiTrainer<StdRng>) {
    match trainer.next_move_options() {
        None => println!("Out of book."),
        Some(options) if options.is_empty() => println!("The book has no continuation here."),
        Some(options) => {
            let labels: Vec<String> = options.iter().map(|mv| move_label(trainer, *mv)).collect();
            println!("Book moves: {}", labels.join(", "));
        }
    }
}

fn print_score(trainer: &JosekiTrainer<StdRng>) {
    let game = trainer.game();
    if !game.is_over() {
        eprintln!("The game is not over yet.");
        return;
    }

    let score = game.score();
    println!(
        "\n{}",
        render::render_board(game.current_state(), game.dead_stones(), &game.territory())
    );
    println!(
        "Score ({}): Black {} - White {} (komi {})",
        game.config().scoring,
        score.black,
        score.white,
        game.config().komi
    );
    match score.winner() {
        Some(color) => println!("{} wins by {}", color, score.margin().abs()),
        None => println!("Jigo"),
    }
}

/// Print the current game state
fn print_game_state(trainer: &JosekiTrainer<StdRng>) {
    let game = trainer.game();
    let state = game.current_state();

    println!("\nBoard size: {}x{}", state.board_size(), state.board_size());
    println!("Moves: {}", game.moves().len());
    println!(
        "Captures: Black {} - White {}",
        state.white_stones_captured, state.black_stones_captured
    );

    let territory = game.territory();
    println!("\n{}", render::render_board(state, game.dead_stones(), &territory));
}
