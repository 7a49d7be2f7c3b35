pub mod types;
pub mod error;
pub mod board;
pub mod movegen;
pub mod evaluate;
pub mod tree;
pub mod search;
pub mod rules;
pub mod game;
pub mod perft;
