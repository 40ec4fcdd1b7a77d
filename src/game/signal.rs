//! Turn signal between the stream consumer, the decision worker and the dispatcher
//!
//! Each raise starts a new numbered turn. The decision worker remembers the
//! last turn it handled and only wakes for a newer one. The dispatcher clears
//! the signal for the turn whose move it submitted; a clear for an older turn
//! is ignored, so an opponent reply that arrives before the clear is never
//! lost. A turn whose move could not be submitted can be reopened, which
//! hands it to the decision worker once more.

use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct TurnState {
    turn: u64,
    raised: bool,
    reopened: bool,
    interrupted: bool,
    clears: u64,
}

#[derive(Debug, Default)]
pub struct TurnSignal {
    state: Mutex<TurnState>,
    changed: Condvar,
}

impl TurnSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark that it is the bot's turn. Returns the new turn number.
    pub fn raise(&self) -> u64 {
        let mut state = self.state.lock();
        state.turn += 1;
        state.raised = true;
        state.reopened = false;
        self.changed.notify_all();
        state.turn
    }

    /// Clear the signal if `turn` is still the current one
    pub fn clear_turn(&self, turn: u64) -> bool {
        let mut state = self.state.lock();
        if state.raised && state.turn == turn {
            state.raised = false;
            state.reopened = false;
            state.clears += 1;
            true
        } else {
            false
        }
    }

    /// Hand `turn` back to the decision worker after its move was not played.
    ///
    /// Ignored unless `turn` is still the current, raised turn.
    pub fn reopen(&self, turn: u64) -> bool {
        let mut state = self.state.lock();
        if state.raised && state.turn == turn {
            state.reopened = true;
            self.changed.notify_all();
            true
        } else {
            false
        }
    }

    /// Wait up to `timeout` for a raised turn newer than `last_handled`, or
    /// for a reopened one.
    ///
    /// Returns `None` on timeout or after [`interrupt`](Self::interrupt).
    pub fn wait_for_turn(&self, last_handled: u64, timeout: Duration) -> Option<u64> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();

        loop {
            if state.interrupted {
                return None;
            }
            if let Some(turn) = take_ready(&mut state, last_handled) {
                return Some(turn);
            }
            if self.changed.wait_until(&mut state, deadline).timed_out() {
                if state.interrupted {
                    return None;
                }
                return take_ready(&mut state, last_handled);
            }
        }
    }

    /// Wake every waiter and make all future waits return immediately
    pub fn interrupt(&self) {
        let mut state = self.state.lock();
        state.interrupted = true;
        self.changed.notify_all();
    }

    pub fn is_raised(&self) -> bool {
        self.state.lock().raised
    }

    pub fn current_turn(&self) -> u64 {
        self.state.lock().turn
    }

    /// Number of successful clears so far
    pub fn clear_count(&self) -> u64 {
        self.state.lock().clears
    }
}

fn take_ready(state: &mut TurnState, last_handled: u64) -> Option<u64> {
    if !state.raised {
        return None;
    }
    if state.turn > last_handled {
        return Some(state.turn);
    }
    if state.reopened {
        state.reopened = false;
        return Some(state.turn);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SessionState;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_raise_then_wait() {
        let signal = TurnSignal::new();
        let turn = signal.raise();
        assert_eq!(signal.wait_for_turn(0, Duration::from_millis(10)), Some(turn));
        // Already handled: times out
        assert_eq!(signal.wait_for_turn(turn, Duration::from_millis(10)), None);
    }

    #[test]
    fn test_wait_wakes_on_raise() {
        let signal = Arc::new(TurnSignal::new());
        let raiser = Arc::clone(&signal);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            raiser.raise()
        });

        let got = signal.wait_for_turn(0, Duration::from_secs(5));
        assert_eq!(got, Some(handle.join().unwrap()));
    }

    #[test]
    fn test_stale_clear_ignored() {
        let signal = TurnSignal::new();
        let first = signal.raise();
        let second = signal.raise();

        assert!(!signal.clear_turn(first));
        assert!(signal.is_raised());
        assert!(signal.clear_turn(second));
        assert!(!signal.is_raised());
        assert!(!signal.clear_turn(second));
        assert_eq!(signal.clear_count(), 1);
    }

    #[test]
    fn test_interrupt_releases_waiter() {
        let signal = Arc::new(TurnSignal::new());
        let waiter = Arc::clone(&signal);

        let start = Instant::now();
        let handle = thread::spawn(move || waiter.wait_for_turn(0, Duration::from_secs(30)));
        thread::sleep(Duration::from_millis(20));
        signal.interrupt();

        assert_eq!(handle.join().unwrap(), None);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_reopened_turn_is_handed_out_once() {
        let signal = TurnSignal::new();
        let turn = signal.raise();
        assert_eq!(signal.wait_for_turn(0, Duration::from_millis(10)), Some(turn));

        assert!(signal.reopen(turn));
        assert_eq!(signal.wait_for_turn(turn, Duration::from_millis(10)), Some(turn));
        assert_eq!(signal.wait_for_turn(turn, Duration::from_millis(10)), None);
    }

    #[test]
    fn test_reopen_ignores_superseded_turn() {
        let signal = TurnSignal::new();
        let first = signal.raise();
        assert!(!signal.reopen(first - 1));

        let second = signal.raise();
        assert!(!signal.reopen(first));
        assert!(signal.clear_turn(second));
        assert!(!signal.reopen(second));
        assert_eq!(signal.wait_for_turn(second, Duration::from_millis(10)), None);
    }

    #[test]
    fn test_reopen_wakes_waiter() {
        let signal = Arc::new(TurnSignal::new());
        let turn = signal.raise();
        let reopener = Arc::clone(&signal);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            reopener.reopen(turn)
        });

        assert_eq!(signal.wait_for_turn(turn, Duration::from_secs(5)), Some(turn));
        assert!(handle.join().unwrap());
    }

    #[test]
    fn test_waiter_loop_exits_on_deactivation_without_interrupt() {
        let signal = Arc::new(TurnSignal::new());
        let state = Arc::new(SessionState::new());
        let wake = Duration::from_millis(20);

        let handle = {
            let (signal, state) = (Arc::clone(&signal), Arc::clone(&state));
            thread::spawn(move || {
                let mut wakeups = 0;
                while state.is_active() {
                    assert_eq!(signal.wait_for_turn(0, wake), None);
                    wakeups += 1;
                }
                wakeups
            })
        };

        thread::sleep(Duration::from_millis(50));
        let deactivated = Instant::now();
        state.deactivate();

        assert!(handle.join().unwrap() >= 1);
        assert!(deactivated.elapsed() < Duration::from_secs(1));
    }
}
