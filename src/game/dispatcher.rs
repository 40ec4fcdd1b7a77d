//! Move dispatcher: submits decided moves and clears the turn signal

use super::signal::TurnSignal;
use super::slot::PendingMoveSlot;
use crate::api::{GameApi, RetryPolicy};
use crate::core::SessionState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

pub struct MoveDispatcher {
    api: Arc<dyn GameApi>,
    game_id: String,
    state: Arc<SessionState>,
    signal: Arc<TurnSignal>,
    slot: Arc<PendingMoveSlot>,
    retry: RetryPolicy,
    wake: Duration,
    submitted: Arc<AtomicUsize>,
}

impl MoveDispatcher {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        api: Arc<dyn GameApi>,
        game_id: &str,
        state: Arc<SessionState>,
        signal: Arc<TurnSignal>,
        slot: Arc<PendingMoveSlot>,
        retry: RetryPolicy,
        wake: Duration,
        submitted: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            api,
            game_id: game_id.to_string(),
            state,
            signal,
            slot,
            retry,
            wake,
            submitted,
        }
    }

    pub fn run(self) {
        info!("[DISPATCH] Dispatcher started for game {}", self.game_id);

        while self.state.is_active() {
            let Some(pending) = self.slot.take(&self.state, self.wake) else {
                continue;
            };

            let result = self.retry.run("submit move", || {
                self.api.submit_move(&self.game_id, &pending.uci)
            });

            match result {
                Ok(()) => {
                    self.submitted.fetch_add(1, Ordering::AcqRel);
                    self.signal.clear_turn(pending.turn);
                    info!("[DISPATCH] Played {} (turn {})", pending.uci, pending.turn);
                }
                Err(e) => {
                    error!("[DISPATCH] Could not play {}: {}", pending.uci, e);
                    self.state.mark_degraded();
                    // Still the bot's turn: decide it again from the current board
                    if self.signal.reopen(pending.turn) {
                        warn!("[DISPATCH] Turn {} handed back for another try", pending.turn);
                    }
                }
            }
        }

        info!("[DISPATCH] Dispatcher stopped");
    }
}
