use crate::board::Board;
use crate::movegen::legal_moves;

/// Number of move sequences of length `depth` starting with move number
/// `ply`. Positions where the side to move is stuck end their sequence early
/// and are not counted at greater depths.
pub fn run_perft_test(board: &Board, ply: u32, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for m in legal_moves(board, ply) {
        let b = board.with_move(&m);
        nodes += run_perft_test(&b, ply + 1, depth - 1);
    }
    nodes
}
