//! Public API for the chess engine
//!
//! Position setup and UCI move conversion on top of the rules engine.
//! Every move that enters or leaves the bot goes through these helpers.

use crate::error::{ChessEngineError, ChessEngineResult};
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position};

/// FEN alias some services use for the standard starting position
const STARTPOS: &str = "startpos";

/// Create a new game with initial position
pub fn new_game() -> Chess {
    Chess::default()
}

/// Build a position from FEN (`startpos` is accepted)
pub fn position_from_fen(fen: &str) -> ChessEngineResult<Chess> {
    let fen = fen.trim();
    if fen.is_empty() || fen == STARTPOS {
        return Ok(new_game());
    }

    let parsed: Fen = fen.parse().map_err(|e| ChessEngineError::InvalidPosition {
        fen: fen.to_string(),
        reason: format!("{e}"),
    })?;

    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| ChessEngineError::InvalidPosition {
            fen: fen.to_string(),
            reason: format!("{e}"),
        })
}

/// FEN of a position
pub fn position_fen(pos: &Chess) -> String {
    Fen::from_position(pos.clone(), EnPassantMode::Legal).to_string()
}

/// Parse a UCI token into a move that is legal in `pos`
pub fn parse_uci_move(pos: &Chess, token: &str) -> ChessEngineResult<Move> {
    let uci: UciMove = token.parse().map_err(|e| ChessEngineError::InvalidMove {
        token: token.to_string(),
        reason: format!("{e}"),
    })?;

    uci.to_move(pos).map_err(|e| ChessEngineError::InvalidMove {
        token: token.to_string(),
        reason: format!("{e}"),
    })
}

/// UCI notation of a move (`e2e4`, `e7e8q`, castling as `e1g1`)
pub fn move_to_uci(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}

/// Apply a UCI token to the board
///
/// The board is left untouched when the token is malformed or illegal.
pub fn apply_uci(pos: &mut Chess, token: &str) -> ChessEngineResult<Move> {
    let mv = parse_uci_move(pos, token)?;
    pos.play_unchecked(&mv);
    Ok(mv)
}
