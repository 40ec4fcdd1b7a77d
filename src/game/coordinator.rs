//! Game session coordinator
//!
//! Owns the authoritative board and the session state, runs the three
//! workers (stream, decision, dispatch) and shuts them down in order:
//!
//! 1. clear the active flag and wake every waiter
//! 2. join the decision and dispatch workers
//! 3. resign unless the game already ended or the bot is not a player in it
//! 4. join the stream worker, which sees the resignation or, on the next
//!    keep-alive, the cleared flag
//!
//! Dropping a coordinator closes it.

use super::ai::{BookThenSearch, DecisionWorker, MoveSupplier};
use super::dispatcher::MoveDispatcher;
use super::signal::TurnSignal;
use super::slot::PendingMoveSlot;
use super::stream::StateStreamConsumer;
use crate::api::{Challenge, GameApi, RetryPolicy};
use crate::core::{BotConfig, BotError, BotResult, GameStatus, SessionSnapshot, SessionState};
use chess_engine::{new_game, position_from_fen};
use parking_lot::RwLock;
use shakmaty::{Chess, Color};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{error, info, warn};

pub struct Coordinator {
    game_id: String,
    api: Arc<dyn GameApi>,
    board: Arc<RwLock<Chess>>,
    state: Arc<SessionState>,
    signal: Arc<TurnSignal>,
    slot: Arc<PendingMoveSlot>,
    retry: RetryPolicy,
    submitted: Arc<AtomicUsize>,
    stream_worker: Option<JoinHandle<()>>,
    decision_worker: Option<JoinHandle<()>>,
    dispatch_worker: Option<JoinHandle<()>>,
    closed: bool,
}

impl Coordinator {
    /// Start a session for `challenge` with the book-then-search supplier
    pub fn start(
        api: Arc<dyn GameApi>,
        challenge: &Challenge,
        config: &BotConfig,
    ) -> BotResult<Self> {
        let supplier = BookThenSearch::new(Arc::clone(&api), config.retry, config.search_depth);
        Self::start_with_supplier(api, challenge, Box::new(supplier), config)
    }

    /// Start a session that takes its moves from `supplier`
    pub fn start_with_supplier(
        api: Arc<dyn GameApi>,
        challenge: &Challenge,
        supplier: Box<dyn MoveSupplier>,
        config: &BotConfig,
    ) -> BotResult<Self> {
        let bot_id = config.retry.run("account", || api.account_id())?;
        info!(
            "[SESSION] Starting game {} as {} ({})",
            challenge.id,
            bot_id,
            supplier.name()
        );

        let board = match position_from_fen(&challenge.fen) {
            Ok(board) => board,
            Err(e) => {
                warn!("[SESSION] {}; starting from the standard position", e);
                new_game()
            }
        };

        let mut coordinator = Self {
            game_id: challenge.id.clone(),
            api: Arc::clone(&api),
            board: Arc::new(RwLock::new(board)),
            state: Arc::new(SessionState::new()),
            signal: Arc::new(TurnSignal::new()),
            slot: Arc::new(PendingMoveSlot::new()),
            retry: config.retry,
            submitted: Arc::new(AtomicUsize::new(0)),
            stream_worker: None,
            decision_worker: None,
            dispatch_worker: None,
            closed: false,
        };
        let wake = config.timings.wake_interval;

        let consumer = StateStreamConsumer::new(
            Arc::clone(&api),
            &coordinator.game_id,
            &bot_id,
            Arc::clone(&coordinator.board),
            Arc::clone(&coordinator.state),
            Arc::clone(&coordinator.signal),
            config.retry,
        );
        coordinator.stream_worker = Some(spawn("stream", &coordinator.game_id, move || {
            consumer.run()
        })?);

        let decider = DecisionWorker::new(
            supplier,
            Arc::clone(&coordinator.board),
            Arc::clone(&coordinator.state),
            Arc::clone(&coordinator.signal),
            Arc::clone(&coordinator.slot),
            wake,
        );
        coordinator.decision_worker = Some(spawn("decision", &coordinator.game_id, move || {
            decider.run()
        })?);

        let dispatcher = MoveDispatcher::new(
            api,
            &coordinator.game_id,
            Arc::clone(&coordinator.state),
            Arc::clone(&coordinator.signal),
            Arc::clone(&coordinator.slot),
            config.retry,
            wake,
            Arc::clone(&coordinator.submitted),
        );
        coordinator.dispatch_worker = Some(spawn("dispatch", &coordinator.game_id, move || {
            dispatcher.run()
        })?);

        Ok(coordinator)
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }

    /// Bot color, once the first snapshot arrived
    pub fn color(&self) -> Option<Color> {
        self.state.color()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Copy of the authoritative board
    pub fn board(&self) -> Chess {
        self.board.read().clone()
    }

    /// Moves accepted by the service so far
    pub fn moves_submitted(&self) -> usize {
        self.submitted.load(Ordering::Acquire)
    }

    /// Number of times a submitted move cleared the turn signal
    pub fn turns_completed(&self) -> u64 {
        self.signal.clear_count()
    }

    /// Stop the session. Resigns if the game is still running. Idempotent.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        info!("[SESSION] Closing game {}", self.game_id);

        self.state.deactivate();
        self.signal.interrupt();

        join("decision", self.decision_worker.take());
        join("dispatch", self.dispatch_worker.take());

        if self.state.is_unusable() {
            info!("[SESSION] Not a player in game {}, nothing to resign", self.game_id);
        } else if !self.state.status().is_terminal() {
            match self.retry.run("resign", || self.api.resign(&self.game_id)) {
                Ok(()) => info!("[SESSION] Resigned game {}", self.game_id),
                Err(e) => {
                    error!("[SESSION] Could not resign game {}: {}", self.game_id, e);
                    self.state.mark_degraded();
                }
            }
        }

        join("stream", self.stream_worker.take());
        info!("[SESSION] Game {} closed ({})", self.game_id, self.state.status());
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.close();
    }
}

fn spawn<F>(name: &'static str, game_id: &str, body: F) -> BotResult<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    thread::Builder::new()
        .name(format!("{name}-{game_id}"))
        .spawn(body)
        .map_err(|source| BotError::Spawn { name, source })
}

fn join(name: &str, handle: Option<JoinHandle<()>>) {
    if let Some(handle) = handle {
        if handle.join().is_err() {
            error!("[SESSION] {} worker panicked", name);
        }
    }
}
