//! Uniformly random legal moves. Useful for smoke-testing a session.

use super::supplier::MoveSupplier;
use crate::core::BotResult;
use chess_engine::{position_fen, ChessEngineError};
use rand::seq::IndexedRandom;
use shakmaty::{Chess, Color, Move, Position};

#[derive(Debug, Default)]
pub struct RandomMoveSupplier;

impl RandomMoveSupplier {
    pub fn new() -> Self {
        Self
    }
}

impl MoveSupplier for RandomMoveSupplier {
    fn name(&self) -> &'static str {
        "random"
    }

    fn next_move(&mut self, board: &Chess, _color: Color) -> BotResult<Move> {
        let legal = board.legal_moves();
        legal.as_slice().choose(&mut rand::rng()).cloned().ok_or_else(|| {
            ChessEngineError::NoLegalMoves {
                fen: position_fen(board),
            }
            .into()
        })
    }
}
