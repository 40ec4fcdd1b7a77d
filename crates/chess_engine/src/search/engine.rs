//! Root search: picks the move the bot plays

use super::alphabeta::{alphabeta, SearchContext, SearchStats};
use super::make_unmake::{make_move, unmake_move};
use super::ordering::order_moves;
use crate::api::{move_to_uci, position_fen};
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::hash::RepetitionCache;
use rand::seq::IndexedRandom;
use shakmaty::{Chess, Color, Move, Position};
use tracing::{debug, info};

/// Minimax move search with a per-game repetition cache.
///
/// One engine lives for one game. The cache only grows: each successful
/// search records the position it was asked about, and later searches
/// penalize lines that return to it.
#[derive(Debug, Default)]
pub struct SearchEngine {
    seen: RepetitionCache,
    last_stats: SearchStats,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best move for `side` in `board`, searching `depth` plies.
    ///
    /// The board is explored with make/unmake and is identical to its input
    /// state when this returns.
    ///
    /// # Errors
    ///
    /// `InvalidDepth` for `depth == 0`, `NoLegalMoves` when the rules engine
    /// has nothing to offer.
    pub fn best_move(
        &mut self,
        board: &mut Chess,
        side: Color,
        depth: u32,
    ) -> ChessEngineResult<Move> {
        if depth == 0 {
            return Err(ChessEngineError::InvalidDepth { depth });
        }

        let legal = board.legal_moves();
        if legal.is_empty() {
            return Err(ChessEngineError::NoLegalMoves {
                fen: position_fen(board),
            });
        }

        let maximizing = board.turn() == side;
        let mut best_score = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_move: Option<Move> = None;

        let mut ctx = SearchContext {
            perspective: side,
            seen: &self.seen,
            stats: SearchStats::default(),
        };

        for mv in order_moves(board, legal.iter().cloned()) {
            let undo = make_move(board, &mv);
            if board.is_checkmate() {
                unmake_move(board, undo);
                info!("[SEARCH] Mate in 1 found: {}", move_to_uci(&mv));
                self.last_stats = ctx.stats;
                return Ok(mv);
            }

            let score = alphabeta(
                board,
                &mut ctx,
                depth - 1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                !maximizing,
            );
            unmake_move(board, undo);

            debug!("[SEARCH] Evaluating: {}, Score: {:.2}", move_to_uci(&mv), score);

            if (maximizing && score > best_score) || (!maximizing && score < best_score) {
                best_score = score;
                best_move = Some(mv);
            }
        }

        self.last_stats = ctx.stats;

        match best_move {
            Some(mv) => {
                self.seen.insert(board);
                info!(
                    "[SEARCH] Best move: {}, Eval: {:.2} ({} nodes, {} cutoffs)",
                    move_to_uci(&mv),
                    best_score,
                    self.last_stats.nodes,
                    self.last_stats.cutoffs
                );
                Ok(mv)
            }
            None => {
                let fallback = legal
                    .as_slice()
                    .choose(&mut rand::rng())
                    .cloned()
                    .ok_or_else(|| ChessEngineError::NoLegalMoves {
                        fen: position_fen(board),
                    })?;
                info!("[SEARCH] No move scored, playing random {}", move_to_uci(&fallback));
                Ok(fallback)
            }
        }
    }

    /// Positions recorded so far
    pub fn repetitions(&self) -> &RepetitionCache {
        &self.seen
    }

    /// Counters from the most recent search
    pub fn last_stats(&self) -> SearchStats {
        self.last_stats
    }
}
