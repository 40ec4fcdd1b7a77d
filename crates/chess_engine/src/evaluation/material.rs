//! Material evaluation
//!
//! Evaluates the material balance of a position by counting piece values.

use crate::constants::piece_value;
use shakmaty::{Board, Color, Role};

/// Evaluate material balance from `perspective`'s side
pub fn evaluate_material(board: &Board, perspective: Color) -> f64 {
    Role::ALL
        .iter()
        .map(|&role| {
            let pieces = board.by_role(role);
            let own = (pieces & board.by_color(perspective)).count() as f64;
            let theirs = (pieces & board.by_color(!perspective)).count() as f64;
            piece_value(role) * (own - theirs)
        })
        .sum()
}
