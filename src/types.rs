use std::fmt;

use crate::error::{Error, IllegalMove, Result};

pub const BOARD_SIZE: usize = 8;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Side {
    Black,
    White,
}

impl Side {
    /// Black makes the odd-numbered moves, starting with move #1.
    pub fn from_ply(ply: u32) -> Side {
        if ply % 2 == 1 {
            Side::Black
        } else {
            Side::White
        }
    }

    pub fn other(&self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// +1 for the maximizing side, -1 for the minimizing side
    pub fn sign(&self) -> i32 {
        match self {
            Side::Black => 1,
            Side::White => -1,
        }
    }

    /// Row delta of a plain piece moving forward. Black heads for row 0.
    pub fn forward(&self) -> i8 {
        match self {
            Side::Black => -1,
            Side::White => 1,
        }
    }

    /// The row where a plain piece of this side gets crowned
    pub fn promotion_row(&self) -> u8 {
        match self {
            Side::Black => 0,
            Side::White => (BOARD_SIZE - 1) as u8,
        }
    }

    pub fn piece(&self) -> CellState {
        match self {
            Side::Black => CellState::BlackPiece,
            Side::White => CellState::WhitePiece,
        }
    }

    pub fn crown(&self) -> CellState {
        match self {
            Side::Black => CellState::BlackCrown,
            Side::White => CellState::WhiteCrown,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Side::Black => "black",
            Side::White => "white",
        }
    }

    pub fn to_upper(&self) -> &str {
        match self {
            Side::Black => "BLACK",
            Side::White => "WHITE",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    BlackPiece,
    WhitePiece,
    BlackCrown,
    WhiteCrown,
}

impl CellState {
    pub fn from_char(c: char) -> Option<CellState> {
        match c {
            '.' => Some(CellState::Empty),
            'b' => Some(CellState::BlackPiece),
            'w' => Some(CellState::WhitePiece),
            'B' => Some(CellState::BlackCrown),
            'W' => Some(CellState::WhiteCrown),
            _ => None,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::BlackPiece => 'b',
            CellState::WhitePiece => 'w',
            CellState::BlackCrown => 'B',
            CellState::WhiteCrown => 'W',
        }
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            CellState::Empty => None,
            CellState::BlackPiece | CellState::BlackCrown => Some(Side::Black),
            CellState::WhitePiece | CellState::WhiteCrown => Some(Side::White),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == CellState::Empty
    }

    pub fn is_crown(&self) -> bool {
        matches!(self, CellState::BlackCrown | CellState::WhiteCrown)
    }

    pub fn belongs_to(&self, side: Side) -> bool {
        self.side() == Some(side)
    }

    pub fn is_opponent_of(&self, side: Side) -> bool {
        self.side() == Some(side.other())
    }

    /// The crowned version of this cell. Crowns and empty cells are unchanged.
    pub fn crowned(&self) -> CellState {
        match self {
            CellState::BlackPiece => CellState::BlackCrown,
            CellState::WhitePiece => CellState::WhiteCrown,
            other => *other,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// Enumeration order for every piece kind, clockwise from north east.
    /// Plain pieces use the forward subset of it in the same order.
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// (row delta, col delta). North is toward row 0.
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::NorthEast => (-1, 1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub fn from_delta(drow: i32, dcol: i32) -> Option<Direction> {
        match (drow.signum(), dcol.signum()) {
            (-1, 1) => Some(Direction::NorthEast),
            (1, 1) => Some(Direction::SouthEast),
            (1, -1) => Some(Direction::SouthWest),
            (-1, -1) => Some(Direction::NorthWest),
            _ => None,
        }
    }

    /// Whether a piece in this cell may travel in this direction
    pub fn allowed_for(&self, cell: CellState) -> bool {
        match cell.side() {
            None => false,
            Some(_) if cell.is_crown() => true,
            Some(side) => self.delta().0 == side.forward(),
        }
    }

    /// The directions a piece in `cell` may travel in, in enumeration order
    pub fn for_cell(cell: CellState) -> impl Iterator<Item = Direction> {
        Direction::CLOCKWISE
            .into_iter()
            .filter(move |d| d.allowed_for(cell))
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: u8, // 0 is printed as row 1
    pub col: u8, // 0 is column A
}

impl Coord {
    pub fn new(row: i32, col: i32) -> Result<Coord> {
        if Coord::on_board(row, col) {
            Ok(Coord {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(Error::OutOfBounds { row, col })
        }
    }

    pub fn on_board(row: i32, col: i32) -> bool {
        (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
    }

    /// The cell `steps` cells away in `direction`, if it is on the board
    pub fn offset(&self, direction: Direction, steps: i8) -> Option<Coord> {
        let (drow, dcol) = direction.delta();
        Coord::new(
            self.row as i32 + (drow * steps) as i32,
            self.col as i32 + (dcol * steps) as i32,
        )
        .ok()
    }

    /// Parses two characters such as `A6`. Characters outside `A`-`H` /
    /// `1`-`8`, lowercase columns included, give `OutOfBounds`.
    pub fn from_notation(s: &str) -> Result<Coord> {
        let mut chars = s.chars();
        let (Some(col_char), Some(row_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(Error::InvalidNotation(s.to_string()));
        };
        let col = col_char as i32 - 'A' as i32;
        let row = row_char as i32 - '1' as i32;
        Coord::new(row, col)
    }

    pub fn to_notation(&self) -> String {
        format!(
            "{}{}",
            (self.col + b'A') as char,
            (self.row + b'1') as char
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Step,
    Capture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    /// Move number; its parity names the side making the move
    pub ply: u32,
    pub kind: MoveKind,
}

impl Move {
    /// The kind is read off the distance: a two-cell diagonal jump is a
    /// capture, anything else is treated as a step.
    pub fn new(from: Coord, to: Coord, ply: u32) -> Self {
        let drow = (from.row as i32 - to.row as i32).abs();
        let dcol = (from.col as i32 - to.col as i32).abs();
        let kind = if drow == 2 && dcol == 2 {
            MoveKind::Capture
        } else {
            MoveKind::Step
        };
        Self {
            from,
            to,
            ply,
            kind,
        }
    }

    pub fn side(&self) -> Side {
        Side::from_ply(self.ply)
    }

    pub fn is_capture(&self) -> bool {
        self.kind == MoveKind::Capture
    }

    /// The jumped cell of a capture
    pub fn midpoint(&self) -> Option<Coord> {
        match self.kind {
            MoveKind::Step => None,
            MoveKind::Capture => Some(Coord {
                row: (self.from.row + self.to.row) / 2,
                col: (self.from.col + self.to.col) / 2,
            }),
        }
    }

    /// Parses `A6-B5`. Off-board cells are reported as illegal moves so the
    /// player sees which end of the move was wrong.
    pub fn from_notation(s: &str, ply: u32) -> Result<Self> {
        let s = s.trim();
        let Some((from_str, to_str)) = s.split_once('-') else {
            return Err(Error::InvalidNotation(s.to_string()));
        };
        if from_str.chars().count() != 2 || to_str.chars().count() != 2 {
            return Err(Error::InvalidNotation(s.to_string()));
        }
        let from =
            Coord::from_notation(from_str).map_err(|_| IllegalMove::SourceOutOfBounds)?;
        let to = Coord::from_notation(to_str).map_err(|_| IllegalMove::TargetOutOfBounds)?;
        Ok(Move::new(from, to, ply))
    }

    pub fn to_notation(&self) -> String {
        format!("{}-{}", self.from.to_notation(), self.to.to_notation())
    }

    pub fn to_human(&self) -> String {
        let verb = match self.kind {
            MoveKind::Step => "moves",
            MoveKind::Capture => "captures",
        };
        format!(
            "{} {} from {} to {}",
            self.side().to_human(),
            verb,
            self.from.to_notation(),
            self.to.to_notation()
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_ply() {
        assert_eq!(Side::from_ply(1), Side::Black);
        assert_eq!(Side::from_ply(2), Side::White);
        assert_eq!(Side::from_ply(11), Side::Black);
        assert_eq!(Side::Black.other(), Side::White);
        assert_eq!(Side::White.other(), Side::Black);
    }

    #[test]
    fn test_cell_chars() {
        for c in ['.', 'b', 'w', 'B', 'W'] {
            assert_eq!(CellState::from_char(c).unwrap().to_char(), c);
        }
        assert_eq!(CellState::from_char('x'), None);
        assert_eq!(CellState::BlackPiece.crowned(), CellState::BlackCrown);
        assert_eq!(CellState::WhiteCrown.crowned(), CellState::WhiteCrown);
        assert_eq!(CellState::Empty.crowned(), CellState::Empty);
    }

    #[test]
    fn test_directions_for_pieces() {
        let black: Vec<_> = Direction::for_cell(CellState::BlackPiece).collect();
        assert_eq!(black, vec![Direction::NorthEast, Direction::NorthWest]);

        let white: Vec<_> = Direction::for_cell(CellState::WhitePiece).collect();
        assert_eq!(white, vec![Direction::SouthEast, Direction::SouthWest]);

        let crown: Vec<_> = Direction::for_cell(CellState::WhiteCrown).collect();
        assert_eq!(crown, Direction::CLOCKWISE.to_vec());

        assert_eq!(Direction::for_cell(CellState::Empty).count(), 0);
    }

    #[test]
    fn test_coord_bounds() {
        assert!(Coord::new(0, 0).is_ok());
        assert!(Coord::new(7, 7).is_ok());
        assert_eq!(Coord::new(8, 0), Err(Error::OutOfBounds { row: 8, col: 0 }));
        assert_eq!(Coord::new(0, -1), Err(Error::OutOfBounds { row: 0, col: -1 }));

        let corner = Coord::new(0, 7).unwrap();
        assert_eq!(corner.offset(Direction::NorthEast, 1), None);
        assert_eq!(
            corner.offset(Direction::SouthWest, 2),
            Some(Coord { row: 2, col: 5 })
        );
    }

    #[test]
    fn test_coord_notation() {
        assert_eq!(Coord::from_notation("A1"), Ok(Coord { row: 0, col: 0 }));
        assert_eq!(Coord::from_notation("H8"), Ok(Coord { row: 7, col: 7 }));
        assert_eq!(Coord::from_notation("C6").unwrap().to_notation(), "C6");
        assert!(matches!(
            Coord::from_notation("I1"),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            Coord::from_notation("A9"),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            Coord::from_notation("a6"),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_move_from_notation() {
        let m = Move::from_notation("A6-B5", 1).unwrap();
        assert_eq!(m.from, Coord { row: 5, col: 0 });
        assert_eq!(m.to, Coord { row: 4, col: 1 });
        assert_eq!(m.kind, MoveKind::Step);
        assert_eq!(m.side(), Side::Black);
        assert_eq!(m.to_notation(), "A6-B5");

        let c = Move::from_notation("D5-F3", 3).unwrap();
        assert_eq!(c.kind, MoveKind::Capture);
        assert_eq!(c.midpoint(), Some(Coord { row: 3, col: 4 }));
    }

    #[test]
    fn test_move_from_bad_notation() {
        assert_eq!(
            Move::from_notation("Z6-B5", 1),
            Err(Error::IllegalMove(IllegalMove::SourceOutOfBounds))
        );
        assert_eq!(
            Move::from_notation("A6-B0", 1),
            Err(Error::IllegalMove(IllegalMove::TargetOutOfBounds))
        );
        assert_eq!(
            Move::from_notation("a6-B5", 1),
            Err(Error::IllegalMove(IllegalMove::SourceOutOfBounds))
        );
        assert_eq!(
            Move::from_notation("A6-b5", 1),
            Err(Error::IllegalMove(IllegalMove::TargetOutOfBounds))
        );
        assert!(matches!(
            Move::from_notation("A6B5", 1),
            Err(Error::InvalidNotation(_))
        ));
        assert!(matches!(
            Move::from_notation("A66-B5", 1),
            Err(Error::InvalidNotation(_))
        ));
    }
}
