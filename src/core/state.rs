//! Shared session state
//!
//! [`SessionState`] is the thread-safe status/flag object every worker reads.
//! Status only moves forward: `Starting -> Active -> {Win, Loss, Draw}`, and a
//! terminal status never changes again. The active flag is separate and gates
//! all worker loops.

use parking_lot::RwLock;
use shakmaty::Color;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Outcome-oriented game status seen by front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Starting,
    Active,
    Win,
    Loss,
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Win | GameStatus::Loss | GameStatus::Draw)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameStatus::Starting => "starting",
            GameStatus::Active => "active",
            GameStatus::Win => "win",
            GameStatus::Loss => "loss",
            GameStatus::Draw => "draw",
        };
        f.write_str(label)
    }
}

/// Point-in-time copy of the session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub status: GameStatus,
    pub active: bool,
    /// Known once the first full snapshot arrived
    pub color: Option<Color>,
    /// Color could not be resolved; the session will never play
    pub unusable: bool,
    /// A service call failed for good during the session
    pub degraded: bool,
}

#[derive(Debug)]
pub struct SessionState {
    status: RwLock<GameStatus>,
    color: RwLock<Option<Color>>,
    active: AtomicBool,
    unusable: AtomicBool,
    degraded: AtomicBool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// New session: `Starting` and active
    pub fn new() -> Self {
        Self {
            status: RwLock::new(GameStatus::Starting),
            color: RwLock::new(None),
            active: AtomicBool::new(true),
            unusable: AtomicBool::new(false),
            degraded: AtomicBool::new(false),
        }
    }

    pub fn status(&self) -> GameStatus {
        *self.status.read()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn color(&self) -> Option<Color> {
        *self.color.read()
    }

    pub fn set_color(&self, color: Color) {
        *self.color.write() = Some(color);
    }

    /// `Starting -> Active`. Returns false if the status was anything else.
    pub fn mark_active(&self) -> bool {
        let mut status = self.status.write();
        if *status == GameStatus::Starting {
            *status = GameStatus::Active;
            true
        } else {
            false
        }
    }

    /// Record the final outcome and deactivate.
    ///
    /// Only the first terminal outcome sticks; returns whether this call set it.
    pub fn finish(&self, outcome: GameStatus) -> bool {
        debug_assert!(outcome.is_terminal());
        let changed = {
            let mut status = self.status.write();
            if status.is_terminal() || !outcome.is_terminal() {
                false
            } else {
                *status = outcome;
                true
            }
        };
        self.deactivate();
        changed
    }

    /// Clear the active flag. Returns whether it was set.
    pub fn deactivate(&self) -> bool {
        self.active.swap(false, Ordering::AcqRel)
    }

    pub fn mark_unusable(&self) {
        self.unusable.store(true, Ordering::Release);
        self.deactivate();
    }

    pub fn is_unusable(&self) -> bool {
        self.unusable.load(Ordering::Acquire)
    }

    pub fn mark_degraded(&self) {
        self.degraded.store(true, Ordering::Release);
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status(),
            active: self.is_active(),
            color: self.color(),
            unusable: self.is_unusable(),
            degraded: self.is_degraded(),
        }
    }
}
