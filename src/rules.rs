//! Validation of a single proposed move against the rules the move generator
//! enumerates.

use crate::board::Board;
use crate::error::{IllegalMove, Result};
use crate::types::{Direction, Move, MoveKind};

/// Checks a move read from the player. Off-board cells have already been
/// rejected when the notation was parsed, so only cell contents and geometry
/// are checked here, in the order the player is told about them.
pub fn validate_move(board: &Board, mv: &Move) -> std::result::Result<MoveKind, IllegalMove> {
    let source = board.get(mv.from);
    let target = board.get(mv.to);
    let side = mv.side();

    if source.is_empty() {
        return Err(IllegalMove::SourceEmpty);
    }
    if !target.is_empty() {
        return Err(IllegalMove::TargetOccupied);
    }
    if !source.belongs_to(side) {
        return Err(IllegalMove::OpponentPiece);
    }

    let drow = mv.to.row as i32 - mv.from.row as i32;
    let dcol = mv.to.col as i32 - mv.from.col as i32;
    let direction = Direction::from_delta(drow, dcol).ok_or(IllegalMove::IllegalAction)?;
    if !direction.allowed_for(source) || drow.abs() != dcol.abs() {
        return Err(IllegalMove::IllegalAction);
    }

    match (drow.abs(), mv.kind) {
        (1, MoveKind::Step) => Ok(MoveKind::Step),
        (2, MoveKind::Capture) => {
            let jumped = mv.midpoint().map(|c| board.get(c));
            match jumped {
                Some(cell) if cell.is_opponent_of(side) => Ok(MoveKind::Capture),
                _ => Err(IllegalMove::IllegalAction),
            }
        }
        _ => Err(IllegalMove::IllegalAction),
    }
}

/// Parses `notation` as move number `ply` and validates it.
pub fn parse_and_validate(board: &Board, notation: &str, ply: u32) -> Result<Move> {
    let mv = Move::from_notation(notation, ply)?;
    validate_move(board, &mv)?;
    Ok(mv)
}
