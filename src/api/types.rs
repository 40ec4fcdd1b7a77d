//! Wire and domain types for the game service
//!
//! The bot game stream is NDJSON: one JSON object per line, tagged by a
//! `type` field, with empty keep-alive lines in between. Only `gameFull` and
//! `gameState` matter to the bot; everything else is dropped while parsing.

use super::error::ApiResult;
use serde::{Deserialize, Serialize};
use shakmaty::Color;
use std::fmt;

/// Game status codes reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StreamStatus {
    Created,
    Started,
    Aborted,
    Mate,
    Resign,
    Stalemate,
    Timeout,
    Draw,
    #[serde(rename = "outoftime")]
    OutOfTime,
    Cheat,
    NoStart,
    UnknownFinish,
    VariantEnd,
    /// A code this client does not know yet
    #[serde(other)]
    Unknown,
}

impl StreamStatus {
    /// Whether the game can still receive moves
    pub fn is_in_progress(self) -> bool {
        matches!(self, StreamStatus::Created | StreamStatus::Started)
    }

    pub fn is_terminal(self) -> bool {
        !self.is_in_progress() && self != StreamStatus::Unknown
    }

    /// Terminal statuses that end without a winner regardless of the `winner` field
    pub fn is_drawn(self) -> bool {
        matches!(self, StreamStatus::Draw | StreamStatus::Stalemate)
    }
}

/// A side as the service spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

/// One participant in a full snapshot. AI opponents carry no account id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlayerRef {
    #[serde(default)]
    pub id: Option<String>,
}

impl PlayerRef {
    pub fn account(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
        }
    }

    pub fn is(&self, account_id: &str) -> bool {
        self.id
            .as_deref()
            .is_some_and(|id| id.eq_ignore_ascii_case(account_id))
    }
}

/// Incremental game state
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateUpdate {
    pub status: StreamStatus,
    /// Space-joined UCI history from the initial position
    #[serde(default)]
    pub moves: String,
    #[serde(default)]
    pub winner: Option<Side>,
}

impl StateUpdate {
    pub fn move_tokens(&self) -> impl Iterator<Item = &str> {
        self.moves.split_whitespace()
    }

    pub fn ply_count(&self) -> usize {
        self.move_tokens().count()
    }
}

/// The first event of a game stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullSnapshot {
    pub status: StreamStatus,
    pub white: PlayerRef,
    pub black: PlayerRef,
    /// FEN the game started from, or `startpos`
    pub initial_fen: String,
    /// Moves already played when the snapshot was taken
    pub initial_moves: String,
    /// Set when the snapshot describes a finished game
    pub winner: Option<Side>,
}

/// Events the bot reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    FullSnapshot(FullSnapshot),
    StateUpdate(StateUpdate),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireGameFull {
    #[serde(default)]
    white: PlayerRef,
    #[serde(default)]
    black: PlayerRef,
    #[serde(default = "startpos")]
    initial_fen: String,
    state: StateUpdate,
}

fn startpos() -> String {
    "startpos".to_string()
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum WireEvent {
    GameFull(WireGameFull),
    GameState(StateUpdate),
    /// chatLine, opponentGone and anything added later
    #[serde(other)]
    Ignored,
}

/// Parse one stream line. Keep-alives and uninteresting events yield `None`.
pub fn parse_event_line(line: &str) -> ApiResult<Option<GameEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let event = match serde_json::from_str::<WireEvent>(line)? {
        WireEvent::GameFull(full) => Some(GameEvent::FullSnapshot(FullSnapshot {
            status: full.state.status,
            white: full.white,
            black: full.black,
            initial_fen: full.initial_fen,
            initial_moves: full.state.moves,
            winner: full.state.winner,
        })),
        WireEvent::GameState(state) => Some(GameEvent::StateUpdate(state)),
        WireEvent::Ignored => None,
    };
    Ok(event)
}

/// Color requested when challenging the service AI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ChallengeColor {
    White,
    Black,
    #[default]
    Random,
}

impl ChallengeColor {
    pub fn as_str(self) -> &'static str {
        match self {
            ChallengeColor::White => "white",
            ChallengeColor::Black => "black",
            ChallengeColor::Random => "random",
        }
    }
}

impl fmt::Display for ChallengeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for a game against the service AI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeRequest {
    /// AI strength, 1-8
    pub level: u8,
    /// Initial clock in seconds
    pub clock_limit: u32,
    /// Increment per move in seconds
    pub clock_increment: u32,
    pub variant: String,
    pub color: ChallengeColor,
}

impl Default for ChallengeRequest {
    fn default() -> Self {
        Self {
            level: 1,
            clock_limit: 3600,
            clock_increment: 30,
            variant: "standard".to_string(),
            color: ChallengeColor::Random,
        }
    }
}

/// The game a challenge created
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    #[serde(default)]
    pub full_id: String,
    #[serde(default = "startpos")]
    pub fen: String,
}

/// Aggregated results for one candidate move in the opening explorer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OpeningMove {
    pub uci: String,
    pub white: u64,
    pub black: u64,
    pub draws: u64,
}

impl OpeningMove {
    pub fn total(&self) -> u64 {
        self.white + self.black + self.draws
    }

    pub fn wins_for(&self, color: Color) -> u64 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExplorerResponse {
    #[serde(default)]
    pub moves: Vec<OpeningMove>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_alive_skipped() {
        assert_eq!(parse_event_line("").unwrap(), None);
        assert_eq!(parse_event_line("   \r").unwrap(), None);
    }

    #[test]
    fn test_parse_game_full() {
        let line = r#"{"type":"gameFull","id":"abc","white":{"id":"xfbot","name":"XFBot"},"black":{"aiLevel":3},"initialFen":"startpos","state":{"type":"gameState","moves":"e2e4 e7e5","status":"started"}}"#;
        let event = parse_event_line(line).unwrap().unwrap();

        match event {
            GameEvent::FullSnapshot(full) => {
                assert_eq!(full.status, StreamStatus::Started);
                assert!(full.white.is("xfbot"));
                assert_eq!(full.black.id, None);
                assert_eq!(full.initial_fen, "startpos");
                assert_eq!(full.initial_moves, "e2e4 e7e5");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_game_state_with_winner() {
        let line = r#"{"type":"gameState","moves":"f2f3 e7e5 g2g4 d8h4","wtime":1000,"status":"mate","winner":"black"}"#;
        let event = parse_event_line(line).unwrap().unwrap();

        match event {
            GameEvent::StateUpdate(state) => {
                assert_eq!(state.status, StreamStatus::Mate);
                assert_eq!(state.winner, Some(Side::Black));
                assert_eq!(state.ply_count(), 4);
                assert!(state.status.is_terminal());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_and_status() {
        let chat = r#"{"type":"chatLine","room":"player","username":"x","text":"hi"}"#;
        assert_eq!(parse_event_line(chat).unwrap(), None);

        let line = r#"{"type":"gameState","moves":"","status":"somethingNew"}"#;
        match parse_event_line(line).unwrap() {
            Some(GameEvent::StateUpdate(state)) => {
                assert_eq!(state.status, StreamStatus::Unknown);
                assert!(!state.status.is_terminal());
                assert!(!state.status.is_in_progress());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_line_is_decode_error() {
        let err = parse_event_line("{\"type\":").unwrap_err();
        assert!(matches!(err, crate::api::ApiError::Decode(_)));
    }

    #[test]
    fn test_status_classes() {
        assert!(StreamStatus::OutOfTime.is_terminal());
        assert!(StreamStatus::Stalemate.is_drawn());
        assert!(!StreamStatus::Resign.is_drawn());
        assert!(StreamStatus::Created.is_in_progress());
    }

    #[test]
    fn test_opening_move_counts() {
        let mv = OpeningMove {
            uci: "e2e4".into(),
            white: 6,
            black: 3,
            draws: 2,
        };
        assert_eq!(mv.total(), 11);
        assert_eq!(mv.wins_for(Color::Black), 3);
    }
}
