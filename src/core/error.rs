//! Error types for the bot
//!
//! Wraps service and engine failures and adds the session-level conditions
//! the workers report.

use crate::api::ApiError;
use chess_engine::ChessEngineError;
use thiserror::Error;

/// Errors that can occur while running a bot session
#[derive(Error, Debug)]
pub enum BotError {
    /// Remote service call failed after its retry policy gave up
    #[error("Service error: {0}")]
    Api(#[from] ApiError),

    /// Search or move parsing failed
    #[error("Engine error: {0}")]
    Engine(#[from] ChessEngineError),

    /// Neither participant of the game is the bot's account
    #[error("Cannot determine color: account {bot_id} is neither white ({white:?}) nor black ({black:?})")]
    UnresolvableColor {
        bot_id: String,
        white: Option<String>,
        black: Option<String>,
    },

    /// Required configuration value is absent
    #[error("Missing configuration: {name}")]
    MissingConfig { name: &'static str },

    /// Configuration value present but unusable
    #[error("Invalid configuration {name}={value}: {reason}")]
    InvalidConfig {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A worker thread could not be started
    #[error("Failed to spawn {name} worker: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for bot operations
pub type BotResult<T> = Result<T, BotError>;
