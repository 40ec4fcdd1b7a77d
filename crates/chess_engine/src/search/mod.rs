//! Depth-limited minimax search
//!
//! This module implements the core AI search using:
//! - Minimax with alpha-beta pruning, scored from the engine's side
//! - Mate-in-one shortcut at the root
//! - Move ordering for better pruning (captures, checks, quiet moves)
//! - A repetition cache that penalizes returning to earlier positions
//!
//! ## Module Organization
//!
//! - `alphabeta` - Core alpha-beta search algorithm
//! - `engine` - Root move selection
//! - `ordering` - Move ordering heuristics
//! - `make_unmake` - Move making/unmaking utilities

mod alphabeta;
mod engine;
mod make_unmake;
mod ordering;

pub use alphabeta::SearchStats;
pub use engine::SearchEngine;
pub use ordering::order_moves;
