use std::time::Instant;

use tracing::debug;

use crate::board::Board;
use crate::evaluate::{evaluate, Evaluation};
use crate::tree::{build_to_depth, build_tree, GameNode};
use crate::types::{Move, Side};

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub best_move: Move,
    pub best_score: Evaluation,
    pub nodes_searched: usize,
}

impl SearchResult {
    pub fn print(&self) {
        println!(
            "Search result: [{}, nodes: {}] {}: {}",
            self.best_score,
            self.nodes_searched,
            self.best_move.to_notation(),
            self.best_move.to_human()
        );
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    BestMove(SearchResult),
    /// The side to move has no legal move
    GameOver { winner: Side },
}

/// Picks the move for move number `ply` by plain minimax over a
/// [`SEARCH_DEPTH`](crate::tree::SEARCH_DEPTH) tree.
pub fn find_best_move(board: &Board, ply: u32) -> SearchOutcome {
    let now = Instant::now();
    let mut root = build_tree(board, ply);
    let outcome = search_tree(&mut root);
    debug!(
        ply,
        nodes = root.node_count(),
        elapsed_us = now.elapsed().as_micros() as u64,
        "search finished"
    );
    outcome
}

/// Same as [`find_best_move`] with an explicit depth bound
pub fn find_best_move_to_depth(board: &Board, ply: u32, max_depth: u8) -> SearchOutcome {
    let mut root = build_to_depth(board, ply, max_depth);
    search_tree(&mut root)
}

/// Scores an already built tree and reads the chosen move off the root.
/// A root that was cut off before its children were built is first
/// expanded by one ply.
pub fn search_tree(root: &mut GameNode) -> SearchOutcome {
    if root.is_terminal() {
        return SearchOutcome::GameOver {
            winner: root.side_to_move.other(),
        };
    }
    if root.is_leaf() {
        *root = build_to_depth(&root.board, root.ply, 1);
    }

    let score = propagate(root);
    let best_move = select_move(root)
        .expect("a scored root with children has a child matching its score");
    debug!(best_move = %best_move, score = %score, "selected move");

    SearchOutcome::BestMove(SearchResult {
        best_move,
        best_score: score,
        nodes_searched: root.node_count(),
    })
}

/// Fills in `score` for every node of the subtree, children before parents,
/// and returns the score of `node`.
pub fn propagate(node: &mut GameNode) -> Evaluation {
    let score = if node.is_terminal() {
        Evaluation::Win(node.side_to_move.other())
    } else if node.is_leaf() {
        Evaluation::Material(evaluate(&node.board))
    } else {
        let mut best: Option<Evaluation> = None;
        for child in node.children.iter_mut() {
            let child_score = propagate(child);
            // strict comparison keeps the first of equal scores
            let better = match best {
                None => true,
                Some(current) => match node.side_to_move {
                    Side::Black => child_score > current,
                    Side::White => child_score < current,
                },
            };
            if better {
                best = Some(child_score);
            }
        }
        best.expect("an internal node has children")
    };
    node.score = Some(score);
    score
}

/// The move of the first child whose score equals the root's score
pub fn select_move(root: &GameNode) -> Option<Move> {
    let target = root.score?;
    root.children
        .iter()
        .find(|child| child.score == Some(target))
        .and_then(|child| child.mv)
}
