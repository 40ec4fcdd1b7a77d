//! Opening book backed by the masters database
//!
//! Candidates need more than [`MIN_GAMES`] recorded games and an advantage
//! above [`MIN_ADVANTAGE`] for the side the bot plays, where
//! `advantage = (our wins - their wins) / total`. The best survivor wins;
//! on a tie the one listed first is kept.

use crate::api::{ApiResult, GameApi, OpeningMove, RetryPolicy};
use chess_engine::{parse_uci_move, position_fen};
use shakmaty::{Chess, Color, Move};
use std::sync::Arc;
use tracing::{debug, warn};

pub const MIN_GAMES: u64 = 10;
pub const MIN_ADVANTAGE: f64 = 0.05;

/// Win advantage of `candidate` for `color`, or `None` if it has no games
pub fn advantage(candidate: &OpeningMove, color: Color) -> Option<f64> {
    let total = candidate.total();
    if total == 0 {
        return None;
    }
    let ours = candidate.wins_for(color) as f64;
    let theirs = candidate.wins_for(color.other()) as f64;
    Some((ours - theirs) / total as f64)
}

/// Pick the book move for `color` from explorer statistics
pub fn select_candidate(stats: &[OpeningMove], color: Color) -> Option<&OpeningMove> {
    let mut best: Option<(&OpeningMove, f64)> = None;

    for candidate in stats {
        if candidate.total() <= MIN_GAMES {
            continue;
        }
        let Some(adv) = advantage(candidate, color) else {
            continue;
        };
        if adv <= MIN_ADVANTAGE {
            continue;
        }
        if best.is_none_or(|(_, best_adv)| adv > best_adv) {
            best = Some((candidate, adv));
        }
    }

    best.map(|(candidate, _)| candidate)
}

pub struct OpeningBookPolicy {
    api: Arc<dyn GameApi>,
    retry: RetryPolicy,
}

impl OpeningBookPolicy {
    pub fn new(api: Arc<dyn GameApi>, retry: RetryPolicy) -> Self {
        Self { api, retry }
    }

    /// Book move for `color` in `board`, or `None` when the book has nothing.
    ///
    /// A candidate the rules engine rejects counts as no candidate.
    pub fn lookup(&self, board: &Chess, color: Color) -> ApiResult<Option<Move>> {
        let fen = position_fen(board);
        let stats = self
            .retry
            .run("opening explorer", || self.api.opening_statistics(&fen))?;
        debug!("[AI] Opening explorer returned {} candidates", stats.len());

        let Some(candidate) = select_candidate(&stats, color) else {
            return Ok(None);
        };

        match parse_uci_move(board, &candidate.uci) {
            Ok(mv) => Ok(Some(mv)),
            Err(e) => {
                warn!("[AI] Ignoring book move: {}", e);
                Ok(None)
            }
        }
    }
}
