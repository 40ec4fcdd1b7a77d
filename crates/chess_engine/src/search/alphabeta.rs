//! Depth-limited minimax with alpha-beta pruning
//!
//! Scores are always from the engine's side (`perspective`), so the search
//! alternates explicitly between a maximizing and a minimizing player instead
//! of negating scores.

use super::make_unmake::{make_move, unmake_move};
use super::ordering::order_moves;
use crate::evaluation::evaluate_position;
use crate::hash::RepetitionCache;
use shakmaty::{Chess, Color, Position};

/// Node and cutoff counters for one search
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Read-only inputs shared by every node of one search
pub(crate) struct SearchContext<'a> {
    pub perspective: Color,
    pub seen: &'a RepetitionCache,
    pub stats: SearchStats,
}

/// Minimax with alpha-beta pruning.
///
/// Returns the bound as soon as `beta <= alpha`. The board is restored to
/// its entry state before returning.
pub(crate) fn alphabeta(
    pos: &mut Chess,
    ctx: &mut SearchContext<'_>,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
) -> f64 {
    ctx.stats.nodes += 1;

    if depth == 0 || pos.is_game_over() {
        return evaluate_position(pos, ctx.perspective, ctx.seen);
    }

    let moves = order_moves(pos, pos.legal_moves());

    if maximizing {
        for mv in &moves {
            let undo = make_move(pos, mv);
            alpha = alpha.max(alphabeta(pos, ctx, depth - 1, alpha, beta, false));
            unmake_move(pos, undo);

            if beta <= alpha {
                ctx.stats.cutoffs += 1;
                return beta;
            }
        }
        alpha
    } else {
        for mv in &moves {
            let undo = make_move(pos, mv);
            beta = beta.min(alphabeta(pos, ctx, depth - 1, alpha, beta, true));
            unmake_move(pos, undo);

            if beta <= alpha {
                ctx.stats.cutoffs += 1;
                return alpha;
            }
        }
        beta
    }
}
