//! Decision worker: waits for the bot's turn, asks the supplier for a move and
//! hands it to the dispatcher

use super::supplier::MoveSupplier;
use crate::core::{BotError, SessionState};
use crate::game::signal::TurnSignal;
use crate::game::slot::{PendingMove, PendingMoveSlot};
use chess_engine::{move_to_uci, ChessEngineError};
use parking_lot::RwLock;
use shakmaty::{Chess, Position};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

pub struct DecisionWorker {
    supplier: Box<dyn MoveSupplier>,
    board: Arc<RwLock<Chess>>,
    state: Arc<SessionState>,
    signal: Arc<TurnSignal>,
    slot: Arc<PendingMoveSlot>,
    wake: Duration,
}

impl DecisionWorker {
    pub fn new(
        supplier: Box<dyn MoveSupplier>,
        board: Arc<RwLock<Chess>>,
        state: Arc<SessionState>,
        signal: Arc<TurnSignal>,
        slot: Arc<PendingMoveSlot>,
        wake: Duration,
    ) -> Self {
        Self {
            supplier,
            board,
            state,
            signal,
            slot,
            wake,
        }
    }

    pub fn run(mut self) {
        info!("[AI] Decision worker started ({})", self.supplier.name());
        let mut last_handled = 0;

        while self.state.is_active() {
            let Some(turn) = self.signal.wait_for_turn(last_handled, self.wake) else {
                continue;
            };
            last_handled = turn;

            let Some(color) = self.state.color() else {
                warn!("[AI] Turn {} raised before the bot's color is known", turn);
                continue;
            };

            // The signal is raised only after the triggering move is on the board
            let board = self.board.read().clone();
            if board.turn() != color {
                debug!("[AI] Turn {} already played, nothing to decide", turn);
                continue;
            }
            let started = Instant::now();

            match self.supplier.next_move(&board, color) {
                Ok(mv) => {
                    let uci = move_to_uci(&mv);
                    info!(
                        "[AI] Decided {} for turn {} in {:.2}s",
                        uci,
                        turn,
                        started.elapsed().as_secs_f32()
                    );
                    if !self.slot.offer(PendingMove { turn, uci }, &self.state, self.wake) {
                        break;
                    }
                }
                Err(BotError::Engine(ChessEngineError::NoLegalMoves { fen })) => {
                    warn!("[AI] No legal moves in {}, skipping turn {}", fen, turn);
                }
                Err(e) => {
                    error!("[AI] Could not decide a move for turn {}: {}", turn, e);
                    self.state.mark_degraded();
                }
            }
        }

        info!("[AI] Decision worker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ai::RandomMoveSupplier;
    use chess_engine::new_game;
    use shakmaty::Color;
    use std::thread::{self, JoinHandle};

    const WAKE: Duration = Duration::from_millis(20);

    struct Harness {
        state: Arc<SessionState>,
        signal: Arc<TurnSignal>,
        slot: Arc<PendingMoveSlot>,
        worker: JoinHandle<()>,
    }

    fn spawn_worker(color: Color) -> Harness {
        let state = Arc::new(SessionState::new());
        state.set_color(color);
        let signal = Arc::new(TurnSignal::new());
        let slot = Arc::new(PendingMoveSlot::new());

        let worker = DecisionWorker::new(
            Box::new(RandomMoveSupplier::new()),
            Arc::new(RwLock::new(new_game())),
            Arc::clone(&state),
            Arc::clone(&signal),
            Arc::clone(&slot),
            WAKE,
        );
        let worker = thread::spawn(move || worker.run());

        Harness {
            state,
            signal,
            slot,
            worker,
        }
    }

    impl Harness {
        fn stop(self) {
            self.state.deactivate();
            self.worker.join().unwrap();
        }
    }

    #[test]
    fn test_exits_after_deactivation_without_interrupt() {
        let h = spawn_worker(Color::Black);
        thread::sleep(Duration::from_millis(60));

        let deactivated = Instant::now();
        h.stop();
        assert!(deactivated.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_reopened_turn_is_decided_again() {
        let h = spawn_worker(Color::White);
        let turn = h.signal.raise();

        let first = h.slot.take(&h.state, WAKE).unwrap();
        assert_eq!(first.turn, turn);

        assert!(h.signal.reopen(turn));
        let second = h.slot.take(&h.state, WAKE).unwrap();
        assert_eq!(second.turn, turn);

        h.stop();
    }

    #[test]
    fn test_no_decision_when_opponent_is_to_move() {
        let h = spawn_worker(Color::Black);
        h.signal.raise();

        thread::sleep(Duration::from_millis(80));
        assert!(h.slot.is_empty());

        h.stop();
    }
}
