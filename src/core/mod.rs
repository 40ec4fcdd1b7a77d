//! Core module - session state, configuration and errors
//!
//! - [`SessionState`] - thread-safe status, active flag and bot color
//! - [`BotConfig`] / [`SessionTimings`] - environment-driven settings
//! - [`BotError`] - errors surfaced by the session workers

pub mod config;
pub mod error;
pub mod state;

pub use config::{BotConfig, SessionTimings};
pub use error::{BotError, BotResult};
pub use state::{GameStatus, SessionSnapshot, SessionState};
