//! Move suppliers
//!
//! A [`MoveSupplier`] is chosen when the session is built and asked for a
//! move each time it is the bot's turn. [`BookThenSearch`] is the default:
//! opening book first, then minimax search for the rest of the game.

use super::opening_book::OpeningBookPolicy;
use crate::api::{GameApi, RetryPolicy};
use crate::core::BotResult;
use chess_engine::{move_to_uci, SearchEngine};
use shakmaty::{Chess, Color, Move};
use std::sync::Arc;
use tracing::{info, warn};

/// Source of the bot's moves
pub trait MoveSupplier: Send {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Move for `color` in `board`. `board` is a private copy.
    fn next_move(&mut self, board: &Chess, color: Color) -> BotResult<Move>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierPhase {
    UsingBook,
    UsingSearch,
}

/// Opening book until it runs dry, then search. The switch is one-way.
pub struct BookThenSearch {
    book: OpeningBookPolicy,
    engine: SearchEngine,
    depth: u32,
    phase: SupplierPhase,
}

impl BookThenSearch {
    pub fn new(api: Arc<dyn GameApi>, retry: RetryPolicy, depth: u32) -> Self {
        Self {
            book: OpeningBookPolicy::new(api, retry),
            engine: SearchEngine::new(),
            depth,
            phase: SupplierPhase::UsingBook,
        }
    }

    pub fn phase(&self) -> SupplierPhase {
        self.phase
    }

    fn search(&mut self, board: &Chess, color: Color) -> BotResult<Move> {
        let mut scratch = board.clone();
        Ok(self.engine.best_move(&mut scratch, color, self.depth)?)
    }
}

impl MoveSupplier for BookThenSearch {
    fn name(&self) -> &'static str {
        "book+search"
    }

    fn next_move(&mut self, board: &Chess, color: Color) -> BotResult<Move> {
        if self.phase == SupplierPhase::UsingBook {
            match self.book.lookup(board, color) {
                Ok(Some(mv)) => {
                    info!("[AI] Book move: {}", move_to_uci(&mv));
                    return Ok(mv);
                }
                Ok(None) => {
                    info!("[AI] Opening book exhausted, switching to search");
                    self.phase = SupplierPhase::UsingSearch;
                }
                // The book may still answer next turn
                Err(e) => warn!("[AI] Opening book unavailable ({}), searching this turn", e),
            }
        }

        self.search(board, color)
    }
}
