//! Error types for chess engine
//!
//! Provides custom error types for chess engine operations including
//! move token parsing, position setup and search preconditions.

use thiserror::Error;

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// Move token could not be parsed or is illegal in the position
    #[error("Invalid move '{token}': {reason}")]
    InvalidMove { token: String, reason: String },

    /// Position could not be built from FEN
    #[error("Invalid position '{fen}': {reason}")]
    InvalidPosition { fen: String, reason: String },

    /// Rules engine reports no legal moves outside a finished game
    #[error("No legal moves in position {fen}")]
    NoLegalMoves { fen: String },

    /// Search depth must cover at least one ply
    #[error("Invalid search depth {depth} (must be at least 1)")]
    InvalidDepth { depth: u32 },
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;
