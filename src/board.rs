use itertools::Itertools;
use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::types::*;

/// Rows of pieces each side starts with
pub const ROWS_WITH_PIECES: usize = 3;
pub const PIECES_PER_SIDE: usize = 12;

const COLUMNS: &str = "     A   B   C   D   E   F   G   H";
const ROW_SEPARATOR: &str = "   +---+---+---+---+---+---+---+---+";

static STARTING_BOARD: Lazy<Board> = Lazy::new(Board::build_starting_position);

/// 8x8 checkers board, indexed `[row][col]`. Row 0 is printed as row 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[CellState; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The starting position: White on rows 0-2, Black on rows 5-7, pieces
    /// on the cells where `row + col` is odd.
    pub fn new() -> Board {
        *STARTING_BOARD
    }

    pub fn empty() -> Board {
        Board {
            cells: [[CellState::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    fn build_starting_position() -> Board {
        let mut board = Board::empty();
        for row in 0..BOARD_SIZE {
            let side = if row < ROWS_WITH_PIECES {
                Side::White
            } else if row >= BOARD_SIZE - ROWS_WITH_PIECES {
                Side::Black
            } else {
                continue;
            };
            for col in 0..BOARD_SIZE {
                if (row + col) % 2 == 1 {
                    board.cells[row][col] = side.piece();
                }
            }
        }
        board
    }

    /// Parses eight rows of eight `.bwBW` characters, row 0 first.
    /// Whitespace is ignored, so rows can be spaced out for readability.
    pub fn from_diagram(diagram: &str) -> Result<Board> {
        let symbols: Vec<char> = diagram.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != BOARD_SIZE * BOARD_SIZE {
            return Err(Error::InvalidDiagram(format!(
                "expected {} cells, got {}",
                BOARD_SIZE * BOARD_SIZE,
                symbols.len()
            )));
        }

        let mut board = Board::empty();
        for (i, c) in symbols.into_iter().enumerate() {
            let cell = CellState::from_char(c).ok_or_else(|| {
                Error::InvalidDiagram(format!("unexpected character '{c}' at cell {i}"))
            })?;
            board.cells[i / BOARD_SIZE][i % BOARD_SIZE] = cell;
        }
        Ok(board)
    }

    /// Bounds-checked access by raw row and column
    pub fn cell_at(&self, row: i32, col: i32) -> Result<CellState> {
        let coord = Coord::new(row, col)?;
        Ok(self.get(coord))
    }

    pub fn get(&self, coord: Coord) -> CellState {
        self.cells[coord.row as usize][coord.col as usize]
    }

    pub fn set(&mut self, coord: Coord, cell: CellState) {
        self.cells[coord.row as usize][coord.col as usize] = cell;
    }

    /// Every cell with its coordinate, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        (0..BOARD_SIZE).cartesian_product(0..BOARD_SIZE).map(|(row, col)| {
            (
                Coord {
                    row: row as u8,
                    col: col as u8,
                },
                self.cells[row][col],
            )
        })
    }

    pub fn count(&self, cell: CellState) -> usize {
        self.iter().filter(|(_, c)| *c == cell).count()
    }

    /// Number of pieces and crowns owned by `side`
    pub fn count_side(&self, side: Side) -> usize {
        self.iter().filter(|(_, c)| c.belongs_to(side)).count()
    }

    /// Moves the piece, crowns it on the far row and removes a captured
    /// piece. The move is assumed to be legal.
    pub fn apply_move(&mut self, mv: &Move) {
        let piece = self.get(mv.from);
        let landed = match piece.side() {
            Some(side) if mv.to.row == side.promotion_row() => piece.crowned(),
            _ => piece,
        };
        self.set(mv.to, landed);
        self.set(mv.from, CellState::Empty);
        if let Some(captured) = mv.midpoint() {
            self.set(captured, CellState::Empty);
        }
    }

    /// Copy of the board with `mv` applied
    pub fn with_move(&self, mv: &Move) -> Board {
        let mut next = *self;
        next.apply_move(mv);
        next
    }

    pub fn draw_board(&self) -> String {
        let mut string = String::new();
        string.push_str(COLUMNS);
        string.push('\n');
        for row in 0..BOARD_SIZE {
            string.push_str(ROW_SEPARATOR);
            string.push('\n');
            let cells = self.cells[row].iter().map(|c| c.to_char()).join(" | ");
            string.push_str(&format!(" {} | {} |\n", row + 1, cells));
        }
        string.push_str(ROW_SEPARATOR);
        string.push('\n');
        string
    }

    pub fn draw_to_terminal(&self) {
        print!("{}", self.draw_board());
    }
}
