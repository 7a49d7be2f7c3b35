//! Checkers bot driver
//!
//! Reads moves such as `A6-B5` one per line, then an instruction: `A` lets
//! the engine play one action, `P` lets it play a batch of them.
//!
//! Usage:
//!   cargo run --release -- --input game.txt
//!   printf 'A6-B5\nA\n' | cargo run --release

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use checkers_bot::game::{run_session, Game, SessionEnd, DEFAULT_ACTIONS};
use clap::Parser;
use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "checkers_bot")]
#[command(about = "Play checkers against a fixed-depth minimax engine")]
struct Args {
    /// File with the moves and instruction (stdin when absent)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the move log to this file
    #[arg(short, long)]
    transcript: Option<PathBuf>,

    /// Engine actions played for the `P` instruction
    #[arg(short, long, default_value_t = DEFAULT_ACTIONS)]
    actions: usize,
}

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut game = Game::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let end = run_session(&mut game, input, &mut out, args.actions)
        .wrap_err("failed to run the game session")?;

    if let Some(path) = &args.transcript {
        fs::write(path, game.to_transcript())
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    }

    Ok(match end {
        SessionEnd::Rejected => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
