//! Game-stream consumer
//!
//! Sole writer of the authoritative board. Applies moves as the service
//! reports them, tracks whose turn it is, raises the turn signal after each
//! opponent move and records the outcome when the game ends.

use super::signal::TurnSignal;
use crate::api::{
    ApiError, EventStream, FullSnapshot, GameApi, GameEvent, RetryPolicy, Side, StateUpdate,
    StreamStatus,
};
use crate::core::{BotError, BotResult, GameStatus, SessionState};
use chess_engine::{apply_uci, new_game, position_from_fen};
use parking_lot::RwLock;
use shakmaty::{Chess, Color, Position};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What the consumer does after an event or a drained stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    /// Game over, deactivated, or unusable: the worker exits
    Done,
    /// Stream ended while the game is still on: subscribe again
    Reconnect,
}

pub struct StateStreamConsumer {
    api: Arc<dyn GameApi>,
    game_id: String,
    bot_id: String,
    board: Arc<RwLock<Chess>>,
    state: Arc<SessionState>,
    signal: Arc<TurnSignal>,
    retry: RetryPolicy,
    color: Option<Color>,
    my_turn: bool,
    plies: usize,
    /// Early stream ends since the last snapshot
    reconnects: u32,
}

impl StateStreamConsumer {
    pub fn new(
        api: Arc<dyn GameApi>,
        game_id: &str,
        bot_id: &str,
        board: Arc<RwLock<Chess>>,
        state: Arc<SessionState>,
        signal: Arc<TurnSignal>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            api,
            game_id: game_id.to_string(),
            bot_id: bot_id.to_string(),
            board,
            state,
            signal,
            retry,
            color: None,
            my_turn: false,
            plies: 0,
            reconnects: 0,
        }
    }

    /// Worker loop. Returns when the game ends or the session is deactivated.
    pub fn run(mut self) {
        info!("[STREAM] Watching game {}", self.game_id);

        while self.state.is_active() {
            let stream = match self
                .retry
                .run("stream game", || self.api.stream_game(&self.game_id))
            {
                Ok(stream) => stream,
                Err(e) => {
                    error!("[STREAM] Cannot subscribe to game {}: {}", self.game_id, e);
                    self.state.mark_degraded();
                    self.state.deactivate();
                    break;
                }
            };

            match self.consume(stream) {
                Flow::Done | Flow::Continue => break,
                Flow::Reconnect => {
                    self.reconnects += 1;
                    if self.reconnects >= self.retry.max_transient_attempts {
                        error!(
                            "[STREAM] Stream for game {} dropped {} times, giving up",
                            self.game_id, self.reconnects
                        );
                        self.state.mark_degraded();
                        self.state.deactivate();
                        break;
                    }
                    warn!(
                        "[STREAM] Stream for game {} ended early, reconnecting ({}/{})",
                        self.game_id, self.reconnects, self.retry.max_transient_attempts
                    );
                }
            }
        }

        info!("[STREAM] Stopped watching game {}", self.game_id);
    }

    fn consume(&mut self, stream: EventStream) -> Flow {
        for item in stream {
            if !self.state.is_active() {
                return Flow::Done;
            }

            match item {
                Ok(None) => continue,
                Ok(Some(event)) => match self.handle_event(event) {
                    Ok(Flow::Continue) => {}
                    Ok(flow) => return flow,
                    Err(e) => {
                        error!("[STREAM] {}", e);
                        self.state.mark_unusable();
                        return Flow::Done;
                    }
                },
                Err(ApiError::Decode(e)) => warn!("[STREAM] Skipping unreadable event: {}", e),
                Err(e) => {
                    warn!("[STREAM] Stream error: {}", e);
                    break;
                }
            }
        }

        if self.state.is_active() {
            Flow::Reconnect
        } else {
            Flow::Done
        }
    }

    /// Apply one event to the board and session state
    pub(crate) fn handle_event(&mut self, event: GameEvent) -> BotResult<Flow> {
        match event {
            GameEvent::FullSnapshot(full) => self.handle_snapshot(full),
            GameEvent::StateUpdate(update) => Ok(self.handle_update(update)),
        }
    }

    fn handle_snapshot(&mut self, full: FullSnapshot) -> BotResult<Flow> {
        let color = if full.white.is(&self.bot_id) {
            Color::White
        } else if full.black.is(&self.bot_id) {
            Color::Black
        } else {
            return Err(BotError::UnresolvableColor {
                bot_id: self.bot_id.clone(),
                white: full.white.id,
                black: full.black.id,
            });
        };
        self.color = Some(color);
        self.state.set_color(color);

        let mut board = match position_from_fen(&full.initial_fen) {
            Ok(board) => board,
            Err(e) => {
                warn!("[STREAM] {}; using the standard start position", e);
                new_game()
            }
        };
        let mut plies = 0;
        for token in full.initial_moves.split_whitespace() {
            if let Err(e) = apply_uci(&mut board, token) {
                warn!("[STREAM] Replay: {}", e);
            }
            plies += 1;
        }
        self.my_turn = board.turn() == color;
        self.plies = plies;
        self.reconnects = 0;
        *self.board.write() = board;

        info!(
            "[STREAM] Game {} joined as {:?} after {} plies",
            self.game_id, color, plies
        );

        if full.status.is_terminal() {
            return Ok(self.finish(full.status, full.winner));
        }
        if full.status.is_in_progress() {
            self.state.mark_active();
        }

        // A reconnect while our move is already pending must not start a new turn
        if self.my_turn && !self.signal.is_raised() {
            self.signal.raise();
        }
        Ok(Flow::Continue)
    }

    fn handle_update(&mut self, update: StateUpdate) -> Flow {
        if update.status.is_terminal() {
            return self.finish(update.status, update.winner);
        }
        if !update.status.is_in_progress() {
            debug!("[STREAM] Ignoring state with status {:?}", update.status);
            return Flow::Continue;
        }

        let plies = update.ply_count();
        if plies <= self.plies {
            debug!("[STREAM] No new move ({} plies)", plies);
            return Flow::Continue;
        }

        let new_tokens: Vec<&str> = update.move_tokens().skip(self.plies).collect();
        {
            let mut board = self.board.write();
            for token in &new_tokens {
                if let Err(e) = apply_uci(&mut board, token) {
                    warn!("[STREAM] {}; board left unchanged", e);
                }
            }
        }
        self.plies = plies;
        if new_tokens.len() % 2 == 1 {
            self.my_turn = !self.my_turn;
        }

        let last = new_tokens.last().copied().unwrap_or_default();
        if self.my_turn {
            info!("[STREAM] Opponent played: {}", last);
            self.signal.raise();
        } else {
            info!("[STREAM] Bot played: {}", last);
        }
        Flow::Continue
    }

    fn finish(&mut self, status: StreamStatus, winner: Option<Side>) -> Flow {
        let outcome = if status.is_drawn() {
            GameStatus::Draw
        } else {
            match (winner, self.color) {
                (None, _) => GameStatus::Draw,
                (Some(side), Some(color)) if Color::from(side) == color => GameStatus::Win,
                (Some(_), _) => GameStatus::Loss,
            }
        };

        if self.state.finish(outcome) {
            info!(
                "[STREAM] Game {} ended by {:?}: {}",
                self.game_id, status, outcome
            );
        }
        Flow::Done
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn is_my_turn(&self) -> bool {
        self.my_turn
    }
}
