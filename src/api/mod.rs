//! Remote game service
//!
//! [`GameApi`] is the only way the bot talks to the outside world. The
//! production implementation is [`LichessClient`]; tests substitute a
//! scripted fake.

mod error;
mod lichess;
mod retry;
mod types;

pub use error::{ApiError, ApiResult};
pub use lichess::LichessClient;
pub use retry::RetryPolicy;
pub use types::{
    parse_event_line, Challenge, ChallengeColor, ChallengeRequest, FullSnapshot, GameEvent,
    OpeningMove, PlayerRef, Side, StateUpdate, StreamStatus,
};

/// Lazy, blocking sequence of stream lines, one item per line.
///
/// `Ok(None)` stands for a keep-alive or an event the bot does not act on.
/// Readers get control back on every line, so they can notice shutdown while
/// the game is quiet.
pub type EventStream = Box<dyn Iterator<Item = ApiResult<Option<GameEvent>>> + Send>;

/// Operations the bot needs from the game service.
///
/// Implementations make a single attempt per call. Retrying is the caller's
/// business (see [`RetryPolicy`]).
pub trait GameApi: Send + Sync {
    /// Account id of the authenticated bot
    fn account_id(&self) -> ApiResult<String>;

    /// Challenge the service AI to a new game
    fn create_challenge(&self, request: &ChallengeRequest) -> ApiResult<Challenge>;

    /// Subscribe to the event stream of a game
    fn stream_game(&self, game_id: &str) -> ApiResult<EventStream>;

    /// Play a move in UCI notation
    fn submit_move(&self, game_id: &str, uci: &str) -> ApiResult<()>;

    fn resign(&self, game_id: &str) -> ApiResult<()>;

    /// Masters-database statistics for the position given as FEN
    fn opening_statistics(&self, fen: &str) -> ApiResult<Vec<OpeningMove>>;
}
