//! Engine Match Runner - Pit the minimax engine against a random mover
//!
//! Usage: cargo run --release --bin engine_match -- \
//!          --games 100 --seed 42 --engine-side black --max-plies 200
//!
//! `--print-search` prints every engine search and the board after it.

use std::time::Instant;

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use checkers_bot::board::Board;
use checkers_bot::movegen::legal_moves;
use checkers_bot::search::{find_best_move, SearchOutcome};
use checkers_bot::types::Side;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineSide {
    Black,
    White,
}

impl From<EngineSide> for Side {
    fn from(side: EngineSide) -> Side {
        match side {
            EngineSide::Black => Side::Black,
            EngineSide::White => Side::White,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "engine_match")]
#[command(about = "Run matches between the checkers engine and a random mover")]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 100)]
    games: usize,

    /// Seed for the random mover; game `i` uses `seed + i`
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Side the engine plays
    #[arg(long, value_enum, default_value_t = EngineSide::Black)]
    engine_side: EngineSide,

    /// Hard limit on game length
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    /// Print each engine search result and the resulting board
    #[arg(long)]
    print_search: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameResult {
    EngineWin,
    RandomWin,
    Unfinished,
}

#[derive(Debug, Default)]
struct MatchStats {
    engine_wins: usize,
    random_wins: usize,
    unfinished: usize,
    plies: u64,
}

impl MatchStats {
    fn record(&mut self, result: GameResult, plies: u32) {
        match result {
            GameResult::EngineWin => self.engine_wins += 1,
            GameResult::RandomWin => self.random_wins += 1,
            GameResult::Unfinished => self.unfinished += 1,
        }
        self.plies += plies as u64;
    }

    fn games(&self) -> usize {
        self.engine_wins + self.random_wins + self.unfinished
    }
}

fn play_game(
    engine_side: Side,
    rng: &mut StdRng,
    max_plies: u32,
    print_search: bool,
) -> (GameResult, u32) {
    let mut board = Board::new();
    for ply in 1..=max_plies {
        let side = Side::from_ply(ply);
        let chosen = if side == engine_side {
            match find_best_move(&board, ply) {
                SearchOutcome::BestMove(result) => {
                    if print_search {
                        result.print();
                    }
                    Some(result.best_move)
                }
                SearchOutcome::GameOver { .. } => None,
            }
        } else {
            legal_moves(&board, ply).choose(rng).copied()
        };

        let Some(m) = chosen else {
            let result = if side == engine_side {
                GameResult::RandomWin
            } else {
                GameResult::EngineWin
            };
            return (result, ply - 1);
        };
        debug!(ply, mv = %m, "played");
        board.apply_move(&m);
        if print_search && side == engine_side {
            board.draw_to_terminal();
        }
    }
    (GameResult::Unfinished, max_plies)
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let engine_side = Side::from(args.engine_side);

    println!("Engine Match Runner");
    println!("  Engine plays: {}", engine_side.to_human());
    println!("  Games: {}", args.games);
    println!("  Seed: {}", args.seed);
    println!("  Max plies: {}", args.max_plies);
    println!();

    let start = Instant::now();
    let mut stats = MatchStats::default();
    for i in 0..args.games {
        let mut rng = StdRng::seed_from_u64(args.seed.wrapping_add(i as u64));
        let (result, plies) = play_game(engine_side, &mut rng, args.max_plies, args.print_search);
        stats.record(result, plies);
        println!("game {:>4}: {:?} after {} plies", i + 1, result, plies);
    }

    let total = stats.games();
    println!();
    println!("FINAL RESULTS");
    println!(
        "  Engine wins: {:>4} ({:>5.1}%)",
        stats.engine_wins,
        percent(stats.engine_wins, total)
    );
    println!(
        "  Random wins: {:>4} ({:>5.1}%)",
        stats.random_wins,
        percent(stats.random_wins, total)
    );
    println!(
        "  Unfinished:  {:>4} ({:>5.1}%)",
        stats.unfinished,
        percent(stats.unfinished, total)
    );
    if total > 0 {
        println!(
            "  Average length: {:.1} plies",
            stats.plies as f64 / total as f64
        );
    }
    println!("  Total time: {:.1}s", start.elapsed().as_secs_f64());

    Ok(())
}
