//! Scripted in-memory game service for integration tests

#![allow(dead_code)]

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use xfchess_bot::api::{
    parse_event_line, ApiError, ApiResult, Challenge, ChallengeRequest, EventStream, GameApi,
    OpeningMove, RetryPolicy,
};
use xfchess_bot::core::SessionTimings;
use xfchess_bot::BotConfig;

pub const BOT_ID: &str = "xfbot";
pub const GAME_ID: &str = "g4m3";

/// How often an idle stream sends an empty keep-alive line
pub const KEEP_ALIVE: Duration = Duration::from_millis(25);

/// Fake service: stream lines are pushed by the test, submissions follow a
/// script and accepted moves are echoed back on the stream.
pub struct ScriptedApi {
    lines_tx: Sender<String>,
    lines_rx: Receiver<String>,
    submit_script: Mutex<VecDeque<ApiResult<()>>>,
    resign_script: Mutex<VecDeque<ApiResult<()>>>,
    moves: Mutex<Vec<String>>,
    submitted: Mutex<Vec<String>>,
    submit_attempts: AtomicUsize,
    resign_attempts: AtomicUsize,
    streams_opened: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        let (lines_tx, lines_rx) = unbounded();
        Self {
            lines_tx,
            lines_rx,
            submit_script: Mutex::new(VecDeque::new()),
            resign_script: Mutex::new(VecDeque::new()),
            moves: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            submit_attempts: AtomicUsize::new(0),
            resign_attempts: AtomicUsize::new(0),
            streams_opened: AtomicUsize::new(0),
        }
    }

    /// Results for the next submit calls; once used up, submits succeed
    pub fn script_submits(&self, results: Vec<ApiResult<()>>) {
        self.submit_script.lock().extend(results);
    }

    pub fn script_resigns(&self, results: Vec<ApiResult<()>>) {
        self.resign_script.lock().extend(results);
    }

    pub fn push_line(&self, line: String) {
        self.lines_tx.send(line).ok();
    }

    pub fn start_game(&self, white: Option<&str>, black: Option<&str>) {
        self.push_line(game_full(white, black, ""));
    }

    /// Opponent plays `uci`
    pub fn opponent_plays(&self, uci: &str) {
        let moves = {
            let mut moves = self.moves.lock();
            moves.push(uci.to_string());
            moves.join(" ")
        };
        self.push_line(game_state(&moves, "started", None));
    }

    pub fn end_game(&self, status: &str, winner: Option<&str>) {
        let moves = self.moves.lock().join(" ");
        self.push_line(game_state(&moves, status, winner));
    }

    pub fn history(&self) -> Vec<String> {
        self.moves.lock().clone()
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().clone()
    }

    pub fn submit_attempts(&self) -> usize {
        self.submit_attempts.load(Ordering::SeqCst)
    }

    pub fn resign_attempts(&self) -> usize {
        self.resign_attempts.load(Ordering::SeqCst)
    }

    pub fn streams_opened(&self) -> usize {
        self.streams_opened.load(Ordering::SeqCst)
    }
}

impl GameApi for ScriptedApi {
    fn account_id(&self) -> ApiResult<String> {
        Ok(BOT_ID.to_string())
    }

    fn create_challenge(&self, _request: &ChallengeRequest) -> ApiResult<Challenge> {
        Ok(challenge())
    }

    fn stream_game(&self, _game_id: &str) -> ApiResult<EventStream> {
        self.streams_opened.fetch_add(1, Ordering::SeqCst);
        let lines = self.lines_rx.clone();
        Ok(Box::new(std::iter::from_fn(move || {
            match lines.recv_timeout(KEEP_ALIVE) {
                Ok(line) => Some(parse_event_line(&line)),
                Err(RecvTimeoutError::Timeout) => Some(Ok(None)),
                Err(RecvTimeoutError::Disconnected) => None,
            }
        })))
    }

    fn submit_move(&self, _game_id: &str, uci: &str) -> ApiResult<()> {
        self.submit_attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(result) = self.submit_script.lock().pop_front() {
            result?;
        }

        self.submitted.lock().push(uci.to_string());
        let moves = {
            let mut moves = self.moves.lock();
            moves.push(uci.to_string());
            moves.join(" ")
        };
        self.push_line(game_state(&moves, "started", None));
        Ok(())
    }

    fn resign(&self, _game_id: &str) -> ApiResult<()> {
        self.resign_attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(result) = self.resign_script.lock().pop_front() {
            result?;
        }
        self.end_game("resign", None);
        Ok(())
    }

    fn opening_statistics(&self, _fen: &str) -> ApiResult<Vec<OpeningMove>> {
        Ok(Vec::new())
    }
}

pub fn bad_gateway(endpoint: &str) -> ApiError {
    ApiError::Http {
        status: 502,
        endpoint: endpoint.to_string(),
        body: "Bad Gateway".to_string(),
    }
}

pub fn rate_limited() -> ApiError {
    ApiError::RateLimited {
        endpoint: "/api/bot/game/move".to_string(),
    }
}

pub fn challenge() -> Challenge {
    Challenge {
        id: GAME_ID.to_string(),
        full_id: format!("{GAME_ID}abcd"),
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1".to_string(),
    }
}

/// Fast timings: 50ms wake-ups, millisecond backoffs, depth-1 search
pub fn test_config() -> BotConfig {
    BotConfig {
        token: "test".to_string(),
        ..BotConfig::default()
    }
    .with_search_depth(1)
    .expect("depth 1 is valid")
    .with_retry(
        RetryPolicy::default()
            .with_rate_limit_wait(Duration::from_millis(10))
            .with_transient_backoff(Duration::from_millis(1)),
    )
    .with_timings(SessionTimings::default().with_wake_interval(Duration::from_millis(50)))
}

pub fn game_full(white: Option<&str>, black: Option<&str>, moves: &str) -> String {
    serde_json::json!({
        "type": "gameFull",
        "id": GAME_ID,
        "white": player(white),
        "black": player(black),
        "initialFen": "startpos",
        "state": { "type": "gameState", "moves": moves, "status": "started" },
    })
    .to_string()
}

pub fn game_state(moves: &str, status: &str, winner: Option<&str>) -> String {
    let mut state = serde_json::json!({
        "type": "gameState",
        "moves": moves,
        "wtime": 3_600_000,
        "btime": 3_600_000,
        "status": status,
    });
    if let Some(winner) = winner {
        state["winner"] = winner.into();
    }
    state.to_string()
}

fn player(id: Option<&str>) -> serde_json::Value {
    match id {
        Some(id) => serde_json::json!({ "id": id, "name": id, "title": "BOT" }),
        None => serde_json::json!({ "aiLevel": 1 }),
    }
}

/// Poll `cond` until it holds or `timeout` passes
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    cond()
}
