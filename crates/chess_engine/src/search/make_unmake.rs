//! Move making and unmaking utilities
//!
//! The rules engine plays moves in place but cannot take them back, so the
//! undo record holds the full position from before the move.

use shakmaty::{Chess, Move, Position};

/// Information needed to undo a move
pub(crate) struct UndoInfo {
    previous: Chess,
}

/// Make a move on the board (returns undo information)
pub(crate) fn make_move(pos: &mut Chess, mv: &Move) -> UndoInfo {
    let undo = UndoInfo {
        previous: pos.clone(),
    };
    pos.play_unchecked(mv);
    undo
}

/// Unmake a move on the board
pub(crate) fn unmake_move(pos: &mut Chess, undo: UndoInfo) {
    *pos = undo.previous;
}
