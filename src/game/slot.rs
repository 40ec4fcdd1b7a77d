//! Capacity-1 handoff between the decision worker and the dispatcher

use crate::core::SessionState;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use std::time::Duration;

/// A decided move waiting to be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    /// Turn number the move answers
    pub turn: u64,
    pub uci: String,
}

/// Never holds more than one unconsumed move. Both ends wait in bounded
/// steps and give up once the session is no longer active.
#[derive(Debug)]
pub struct PendingMoveSlot {
    tx: Sender<PendingMove>,
    rx: Receiver<PendingMove>,
}

impl Default for PendingMoveSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingMoveSlot {
    pub fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self { tx, rx }
    }

    /// Put a move in the slot, blocking while it is full.
    ///
    /// Returns false if the session was deactivated before the move fit.
    pub fn offer(&self, mut pending: PendingMove, state: &SessionState, wake: Duration) -> bool {
        loop {
            if !state.is_active() {
                return false;
            }
            match self.tx.send_timeout(pending, wake) {
                Ok(()) => return true,
                Err(SendTimeoutError::Timeout(back)) => pending = back,
                Err(SendTimeoutError::Disconnected(_)) => return false,
            }
        }
    }

    /// Take the next move, waiting in `wake` steps while the session is active
    pub fn take(&self, state: &SessionState, wake: Duration) -> Option<PendingMove> {
        loop {
            if !state.is_active() {
                return None;
            }
            match self.rx.recv_timeout(wake) {
                // A move decided just before close is dropped
                Ok(pending) => return state.is_active().then_some(pending),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
