//! Move ordering for alpha-beta pruning
//!
//! Orders moves to maximize alpha-beta pruning efficiency by trying
//! the most forcing moves first: captures by victim value, then checks,
//! then quiet moves in rules-engine order.

use crate::constants::{piece_value, CAPTURE_PRIORITY, CHECK_PRIORITY};
use shakmaty::{Chess, Move, Position};
use std::cmp::Reverse;

/// Ordering key of a single move
pub(crate) fn move_priority(pos: &Chess, mv: &Move) -> i32 {
    if let Some(victim) = mv.capture() {
        return CAPTURE_PRIORITY + piece_value(victim) as i32;
    }
    if gives_check(pos, mv) {
        return CHECK_PRIORITY;
    }
    0
}

fn gives_check(pos: &Chess, mv: &Move) -> bool {
    let mut after = pos.clone();
    after.play_unchecked(mv);
    after.is_check()
}

/// Order moves for better alpha-beta pruning.
///
/// The sort is stable, so moves with equal keys keep the order the rules
/// engine generated them in.
pub fn order_moves(pos: &Chess, moves: impl IntoIterator<Item = Move>) -> Vec<Move> {
    let mut keyed: Vec<(i32, Move)> = moves
        .into_iter()
        .map(|mv| (move_priority(pos, &mv), mv))
        .collect();
    keyed.sort_by_key(|(priority, _)| Reverse(*priority));
    keyed.into_iter().map(|(_, mv)| mv).collect()
}
