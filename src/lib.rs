//! XFChess bot
//!
//! Plays a game against the Lichess AI through the bot API. The move engine
//! lives in the `chess_engine` crate; this crate connects it to the service.
//!
//! - [`api`] - service client and event types
//! - [`core`] - configuration, errors and session state
//! - [`game`] - the session coordinator and its workers

pub mod api;
pub mod core;
pub mod game;

pub use api::{GameApi, LichessClient};
pub use core::{BotConfig, BotError, BotResult, GameStatus};
pub use game::Coordinator;
