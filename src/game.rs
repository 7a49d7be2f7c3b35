use std::io::{self, BufRead, Write};

use chrono::prelude::*;
use tracing::info;

use crate::board::Board;
use crate::error::Result;
use crate::evaluate::evaluate;
use crate::movegen::has_legal_move;
use crate::rules::parse_and_validate;
use crate::search::{find_best_move, SearchOutcome};
use crate::types::{Move, Side, BOARD_SIZE};

/// Engine actions played for the `P` instruction
pub const DEFAULT_ACTIONS: usize = 10;

const MOVE_SEPARATOR: &str = "=====================================";
const PROGRAM_MOVE: &str = "*** ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `A`: play one engine action
    PlayOne,
    /// `P`: play a batch of engine actions
    PlayMany,
}

impl Instruction {
    pub fn from_line(line: &str) -> Option<Instruction> {
        match line.trim() {
            "A" => Some(Instruction::PlayOne),
            "P" => Some(Instruction::PlayMany),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggedMove {
    pub mv: Move,
    /// Chosen by the engine rather than read from input
    pub computed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    Played(Move),
    GameOver { winner: Side },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Input ran out before any instruction
    InputExhausted,
    ActionsPlayed,
    GameOver { winner: Side },
    /// An input move was rejected
    Rejected,
}

pub struct Game {
    board: Board,
    moves: Vec<LoggedMove>,
    next_ply: u32,
    game_start_time: DateTime<Local>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game::from_board(Board::new(), 1)
    }

    /// A game continuing from `board` with move number `next_ply` to play
    pub fn from_board(board: Board, next_ply: u32) -> Self {
        Self {
            board,
            moves: Vec::new(),
            next_ply,
            game_start_time: Local::now(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_ply(&self) -> u32 {
        self.next_ply
    }

    pub fn side_to_move(&self) -> Side {
        Side::from_ply(self.next_ply)
    }

    pub fn moves(&self) -> &[LoggedMove] {
        &self.moves
    }

    /// Validates and plays a move read from input. A rejected move leaves
    /// the game untouched.
    pub fn play_input_move(&mut self, notation: &str) -> Result<Move> {
        let mv = parse_and_validate(&self.board, notation, self.next_ply)?;
        self.record(mv, false);
        Ok(mv)
    }

    /// Lets the engine play the side to move
    pub fn play_round(&mut self) -> RoundResult {
        match find_best_move(&self.board, self.next_ply) {
            SearchOutcome::GameOver { winner } => {
                info!(winner = winner.to_human(), ply = self.next_ply, "game over");
                RoundResult::GameOver { winner }
            }
            SearchOutcome::BestMove(result) => {
                self.record(result.best_move, true);
                RoundResult::Played(result.best_move)
            }
        }
    }

    fn record(&mut self, mv: Move, computed: bool) {
        self.board.apply_move(&mv);
        self.moves.push(LoggedMove { mv, computed });
        self.next_ply += 1;
        info!(ply = mv.ply, mv = %mv, computed, "move applied");
    }

    /// The winner if the side to move has nothing left to play
    pub fn winner(&self) -> Option<Side> {
        if has_legal_move(&self.board, self.next_ply) {
            None
        } else {
            Some(self.side_to_move().other())
        }
    }

    pub fn render_start(&self) -> String {
        format!(
            "BOARD SIZE: {size}x{size}\n#BLACK PIECES: {}\n#WHITE PIECES: {}\n{}",
            self.board.count_side(Side::Black),
            self.board.count_side(Side::White),
            self.board.draw_board(),
            size = BOARD_SIZE,
        )
    }

    /// Report for a move that has just been applied to the board
    pub fn render_move(&self, mv: &Move, computed: bool) -> String {
        format!(
            "{}\n{}{} ACTION #{}: {}\nBOARD COST: {}\n{}",
            MOVE_SEPARATOR,
            if computed { PROGRAM_MOVE } else { "" },
            mv.side().to_upper(),
            mv.ply,
            mv.to_notation(),
            evaluate(&self.board),
            self.board.draw_board(),
        )
    }

    /// Move log, one move per line; engine moves are marked with `*`
    pub fn to_transcript(&self) -> String {
        let mut log = String::new();
        log.push_str("[Event \"checkers_bot game\"]\n");
        log.push_str(&format!(
            "[Date \"{}\"]\n",
            self.game_start_time.format("%Y.%m.%d")
        ));
        log.push('\n');
        for logged in &self.moves {
            log.push_str(&format!(
                "{}. {}{}\n",
                logged.mv.ply,
                if logged.computed { "*" } else { "" },
                logged.mv.to_notation()
            ));
        }
        log
    }
}

/// Replays the moves read from `input`, then carries out the first
/// instruction found, writing the report to `out`.
pub fn run_session<R: BufRead, W: Write>(
    game: &mut Game,
    input: R,
    out: &mut W,
    actions: usize,
) -> io::Result<SessionEnd> {
    write!(out, "{}", game.render_start())?;

    let mut instruction = None;
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(i) = Instruction::from_line(line) {
            instruction = Some(i);
            break;
        }
        match game.play_input_move(line) {
            Ok(mv) => write!(out, "{}", game.render_move(&mv, false))?,
            Err(e) => {
                writeln!(out, "ERROR: {e}")?;
                return Ok(SessionEnd::Rejected);
            }
        }
    }

    let rounds = match instruction {
        None => return Ok(SessionEnd::InputExhausted),
        Some(Instruction::PlayOne) => 1,
        Some(Instruction::PlayMany) => actions,
    };

    for _ in 0..rounds {
        match game.play_round() {
            RoundResult::GameOver { winner } => {
                writeln!(out, "{} WIN!", winner.to_upper())?;
                return Ok(SessionEnd::GameOver { winner });
            }
            RoundResult::Played(mv) => write!(out, "{}", game.render_move(&mv, true))?,
        }
    }

    // the last action may have left the opponent without a move
    if let Some(winner) = game.winner() {
        writeln!(out, "{} WIN!", winner.to_upper())?;
        return Ok(SessionEnd::GameOver { winner });
    }
    Ok(SessionEnd::ActionsPlayed)
}
