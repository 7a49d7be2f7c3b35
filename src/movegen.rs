//! Legal move generation
//!
//! Every ply is a single step or a single capture. A piece looks at each of
//! its directions in turn: if the neighbouring cell is free it may step
//! there, otherwise it may jump the neighbour when that is an opposing piece
//! and the cell beyond is free.

use crate::board::Board;
use crate::types::{Coord, Direction, Move, Side};

/// All legal moves for the side making move number `ply`.
///
/// Pieces are visited row-major and each piece's directions in
/// [`Direction::CLOCKWISE`] order, so the result is deterministic.
pub fn legal_moves(board: &Board, ply: u32) -> Vec<Move> {
    let side = Side::from_ply(ply);
    let mut moves = Vec::new();
    for (from, cell) in board.iter() {
        if cell.belongs_to(side) {
            piece_moves(board, from, ply, &mut moves);
        }
    }
    moves
}

/// Moves for the piece at `from`, appended to `moves`
pub fn piece_moves(board: &Board, from: Coord, ply: u32, moves: &mut Vec<Move>) {
    let piece = board.get(from);
    let Some(side) = piece.side() else {
        return;
    };
    for direction in Direction::for_cell(piece) {
        if let Some(m) = move_in_direction(board, from, direction, side, ply) {
            moves.push(m);
        }
    }
}

fn move_in_direction(
    board: &Board,
    from: Coord,
    direction: Direction,
    side: Side,
    ply: u32,
) -> Option<Move> {
    let step = from.offset(direction, 1)?;
    if board.get(step).is_empty() {
        return Some(Move::new(from, step, ply));
    }
    let landing = from.offset(direction, 2)?;
    if board.get(landing).is_empty() && board.get(step).is_opponent_of(side) {
        return Some(Move::new(from, landing, ply));
    }
    None
}

pub fn has_legal_move(board: &Board, ply: u32) -> bool {
    let side = Side::from_ply(ply);
    board.iter().any(|(from, cell)| {
        cell.belongs_to(side)
            && Direction::for_cell(cell)
                .any(|d| move_in_direction(board, from, d, side, ply).is_some())
    })
}
