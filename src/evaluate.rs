use std::cmp::Ordering;
use std::fmt;

use crate::board::Board;
use crate::types::{CellState, Side};

pub const PIECE_VALUE: i32 = 1;
pub const CROWN_VALUE: i32 = 3;

/// Material balance of the board. Black's material counts positive, White's
/// negative.
pub fn evaluate(board: &Board) -> i32 {
    board.iter().map(|(_, cell)| cell_value(cell)).sum()
}

/// Material balance from `side`'s point of view
pub fn evaluate_for(board: &Board, side: Side) -> i32 {
    evaluate(board) * side.sign()
}

pub fn cell_value(cell: CellState) -> i32 {
    match cell {
        CellState::Empty => 0,
        CellState::BlackPiece => PIECE_VALUE,
        CellState::BlackCrown => CROWN_VALUE,
        CellState::WhitePiece => -PIECE_VALUE,
        CellState::WhiteCrown => -CROWN_VALUE,
    }
}

/// Score of a position, ordered from Black's (the maximizer's) point of
/// view.
///
/// A win for Black beats every material score and a win for White loses to
/// every material score. `Loss(side)` is the same outcome as
/// `Win(side.other())` and compares equal to it.
#[derive(Debug, Clone, Copy, Eq)]
pub enum Evaluation {
    Material(i32),
    Win(Side),
    Loss(Side),
}

impl Evaluation {
    /// The side that has won, if the position is decided
    pub fn winner(&self) -> Option<Side> {
        match self {
            Evaluation::Material(_) => None,
            Evaluation::Win(side) => Some(*side),
            Evaluation::Loss(side) => Some(side.other()),
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner().is_some()
    }

    fn rank(&self) -> (i8, i32) {
        match (self, self.winner()) {
            (Evaluation::Material(value), _) => (0, *value),
            (_, Some(Side::Black)) => (1, 0),
            _ => (-1, 0),
        }
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(side) => write!(f, "{} WIN", side.to_upper()),
            None => write!(f, "{}", self.rank().1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    #[test]
    fn evaluate_start() {
        assert_eq!(evaluate(&Board::new()), 0);
    }

    #[test]
    fn evaluate_weights_crowns() {
        // 2 black pieces and a black crown against a white crown
        let b = Board::from_diagram(
            "
            ...B....
            ........
            ........
            ........
            ....W...
            ........
            b.b.....
            ........
            ",
        )
        .unwrap();
        assert_eq!(evaluate(&b), 2 * PIECE_VALUE + CROWN_VALUE - CROWN_VALUE);

        let mut more = b;
        more.set(Coord { row: 1, col: 0 }, CellState::WhitePiece);
        assert_eq!(evaluate(&more), 1);
    }

    #[test]
    fn evaluate_is_pure_and_antisymmetric() {
        let mut b = Board::new();
        b.set(Coord { row: 0, col: 1 }, CellState::Empty);
        b.set(Coord { row: 6, col: 1 }, CellState::BlackCrown);
        let copy = b;
        assert_eq!(evaluate(&b), evaluate(&copy));
        assert_eq!(evaluate(&b), 3);
        assert_eq!(evaluate_for(&b, Side::Black), 3);
        assert_eq!(evaluate_for(&b, Side::White), -3);
        assert_eq!(evaluate_for(&b, Side::Black), -evaluate_for(&b, Side::White));
    }

    #[test]
    fn wins_dominate_material() {
        let max_material = Evaluation::Material(CROWN_VALUE * 64);
        let min_material = Evaluation::Material(-CROWN_VALUE * 64);
        assert!(Evaluation::Win(Side::Black) > max_material);
        assert!(Evaluation::Loss(Side::White) > max_material);
        assert!(Evaluation::Win(Side::White) < min_material);
        assert!(Evaluation::Loss(Side::Black) < min_material);
        assert!(Evaluation::Material(2) > Evaluation::Material(-1));
    }

    #[test]
    fn loss_is_win_for_other_side() {
        assert_eq!(Evaluation::Loss(Side::White), Evaluation::Win(Side::Black));
        assert_eq!(Evaluation::Loss(Side::Black), Evaluation::Win(Side::White));
        assert_eq!(Evaluation::Loss(Side::Black).winner(), Some(Side::White));
        assert_ne!(Evaluation::Win(Side::Black), Evaluation::Win(Side::White));
        assert_eq!(Evaluation::Material(4).winner(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Evaluation::Material(-2).to_string(), "-2");
        assert_eq!(Evaluation::Win(Side::Black).to_string(), "BLACK WIN");
        assert_eq!(Evaluation::Loss(Side::Black).to_string(), "WHITE WIN");
    }
}
