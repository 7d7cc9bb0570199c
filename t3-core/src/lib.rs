//! Core board types and rules for the T3 tic-tac-toe game
//!
//! This crate provides the pieces every other crate builds on:
//! - `Board`: the fixed 9-cell grid of tri-state cells
//! - `rules`: stateless functions answering occupancy, win and draw questions
//! - `RulesError`: the only failure the core knows about

pub mod board;
pub mod rules;

// Re-export main types for convenience
pub use board::{Board, Cell, RulesError, Side, BOARD_SIZE};
pub use rules::{available_moves, has_won, is_draw, is_occupied, is_terminal, winner, winner_token};
