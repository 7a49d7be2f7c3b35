//! Fixed-depth game tree
//!
//! Every node owns its board and its children outright. The tree is built
//! depth first and dropped as a whole once the search has read the result.

use crate::board::Board;
use crate::evaluate::Evaluation;
use crate::movegen::legal_moves;
use crate::types::{Move, Side};

/// Plies looked ahead from the root
pub const SEARCH_DEPTH: u8 = 3;

#[derive(Debug, Clone)]
pub struct GameNode {
    pub board: Board,
    /// The move that produced this position. `None` for the root.
    pub mv: Option<Move>,
    /// Number of the move to be made from this position
    pub ply: u32,
    pub side_to_move: Side,
    pub depth: u8,
    /// Legal moves for `side_to_move`, whether or not they were expanded
    pub legal_moves: usize,
    pub children: Vec<GameNode>,
    pub score: Option<Evaluation>,
}

impl GameNode {
    fn new(board: Board, mv: Option<Move>, ply: u32, depth: u8) -> Self {
        Self {
            board,
            mv,
            ply,
            side_to_move: Side::from_ply(ply),
            depth,
            legal_moves: 0,
            children: Vec::new(),
            score: None,
        }
    }

    /// The side to move has nothing to play
    pub fn is_terminal(&self) -> bool {
        self.legal_moves == 0
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(GameNode::node_count).sum::<usize>()
    }

    /// Depth of the deepest node below this one
    pub fn max_depth(&self) -> u8 {
        self.children
            .iter()
            .map(GameNode::max_depth)
            .max()
            .unwrap_or(self.depth)
    }
}

/// Builds the search tree for the side making move number `ply`.
pub fn build_tree(board: &Board, ply: u32) -> GameNode {
    build_to_depth(board, ply, SEARCH_DEPTH)
}

/// Builds a tree whose leaves sit at most `max_depth` plies below the root.
/// Leaves still record how many legal moves they have so that terminal
/// positions can be told apart from cut-off ones.
pub fn build_to_depth(board: &Board, ply: u32, max_depth: u8) -> GameNode {
    let mut root = GameNode::new(*board, None, ply, 0);
    expand(&mut root, max_depth);
    root
}

fn expand(node: &mut GameNode, max_depth: u8) {
    let moves = legal_moves(&node.board, node.ply);
    node.legal_moves = moves.len();
    if node.depth >= max_depth {
        return;
    }

    node.children = moves
        .into_iter()
        .map(|m| {
            let mut child = GameNode::new(
                node.board.with_move(&m),
                Some(m),
                node.ply + 1,
                node.depth + 1,
            );
            expand(&mut child, max_depth);
            child
        })
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MoveKind;

    fn walk<'a>(node: &'a GameNode, out: &mut Vec<&'a GameNode>) {
        out.push(node);
        for child in &node.children {
            walk(child, out);
        }
    }

    #[test]
    fn depth_one_from_start() {
        let root = build_to_depth(&Board::new(), 1, 1);
        assert_eq!(root.legal_moves, 7);
        assert_eq!(root.children.len(), 7);
        assert_eq!(root.side_to_move, Side::Black);
        for child in &root.children {
            assert_eq!(child.ply, 2);
            assert_eq!(child.side_to_move, Side::White);
            assert_eq!(child.depth, 1);
            assert!(child.is_leaf());
            // white's reply count is known even though it was not expanded
            assert_eq!(child.legal_moves, 7);
        }
        assert_eq!(root.node_count(), 8);
    }

    #[test]
    fn children_follow_move_order() {
        let root = build_to_depth(&Board::new(), 1, 1);
        let moves: Vec<Move> = root.children.iter().map(|c| c.mv.unwrap()).collect();
        assert_eq!(moves, legal_moves(&Board::new(), 1));
        for child in &root.children {
            let m = child.mv.unwrap();
            assert_eq!(child.board, Board::new().with_move(&m));
        }
    }

    #[test]
    fn depth_bound_holds() {
        let root = build_tree(&Board::new(), 1);
        assert_eq!(root.max_depth(), SEARCH_DEPTH);

        let mut nodes = Vec::new();
        walk(&root, &mut nodes);
        assert_eq!(nodes.len(), root.node_count());
        for node in nodes {
            assert!(node.depth <= SEARCH_DEPTH);
            if node.depth == SEARCH_DEPTH {
                assert!(node.is_leaf());
            } else {
                assert_eq!(node.children.len(), node.legal_moves);
            }
            for child in &node.children {
                assert_eq!(child.ply, node.ply + 1);
                assert_eq!(child.side_to_move, node.side_to_move.other());
                assert_eq!(child.depth, node.depth + 1);
            }
        }
    }

    #[test]
    fn terminal_node_has_no_children() {
        // black's only piece is hemmed in on A8
        let b = Board::from_diagram(
            "
            ........
            ........
            ........
            ........
            ........
            ..w.....
            .w......
            b.......
            ",
        )
        .unwrap();
        let root = build_tree(&b, 1);
        assert!(root.is_terminal());
        assert!(root.is_leaf());
        assert_eq!(root.node_count(), 1);
    }

    #[test]
    fn capture_child_has_piece_removed() {
        let b = Board::from_diagram(
            "
            ........
            ........
            ........
            ....w...
            ...b....
            ........
            ........
            ........
            ",
        )
        .unwrap();
        let root = build_tree(&b, 1);
        assert_eq!(root.children.len(), 2);
        let capture = &root.children[0];
        assert_eq!(capture.mv.unwrap().kind, MoveKind::Capture);
        assert_eq!(capture.board.count_side(Side::White), 0);
        // white has nothing left, so the capture ends the game
        assert!(capture.is_terminal());
        assert!(capture.is_leaf());
    }
}
