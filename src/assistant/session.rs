//! Session state for one orchestration
//!
//! The caller owns a `Session` handle and passes it to every `submit`.
//! Each submission takes a ticket; only the ticket of the latest submission
//! may settle the session, so a slow earlier call can never overwrite the
//! state with a stale outcome.

use crate::assistant::mode::Mode;
use crate::assistant::outcome::Outcome;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Idle,
    Pending,
    Settled,
}

/// Snapshot of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub current_mode: Mode,
    pub lifecycle: Lifecycle,
    /// Number of submissions started in this session
    pub generation: u64,
    /// Outcome of the latest settled submission
    pub last_outcome: Option<Outcome>,
}

impl SessionState {
    fn new(mode: Mode) -> Self {
        Self {
            current_mode: mode,
            lifecycle: Lifecycle::Idle,
            generation: 0,
            last_outcome: None,
        }
    }
}

/// Proof of one submission, used to settle it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    mode: Mode,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// Shared handle to one session's state
///
/// Cloning the handle shares the state. The lock is never held across an
/// await point.
#[derive(Debug, Clone)]
pub struct Session {
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    /// Create a new idle session in `mode`
    pub fn new(mode: Mode) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new(mode))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a submission, superseding any pending one
    pub fn begin(&self, mode: Mode) -> Ticket {
        let mut state = self.lock();
        if state.lifecycle == Lifecycle::Pending {
            tracing::debug!(
                superseded = state.generation,
                "new submission supersedes pending one"
            );
        }
        state.generation += 1;
        state.current_mode = mode;
        state.lifecycle = Lifecycle::Idle;
        Ticket {
            generation: state.generation,
            mode,
        }
    }

    /// Mark the ticket's request as dispatched
    ///
    /// Returns `false` (and changes nothing) if the ticket is stale.
    pub fn mark_pending(&self, ticket: &Ticket) -> bool {
        let mut state = self.lock();
        if state.generation != ticket.generation {
            return false;
        }
        state.lifecycle = Lifecycle::Pending;
        true
    }

    /// Record the ticket's outcome
    ///
    /// Returns `false` (and changes nothing) if a newer submission has
    /// started since the ticket was issued.
    pub fn settle(&self, ticket: &Ticket, outcome: &Outcome) -> bool {
        let mut state = self.lock();
        if state.generation != ticket.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = state.generation,
                "discarding superseded outcome"
            );
            return false;
        }
        state.lifecycle = Lifecycle::Settled;
        state.last_outcome = Some(outcome.clone());
        true
    }

    /// Select the mode for the next submission
    pub fn set_mode(&self, mode: Mode) {
        self.lock().current_mode = mode;
    }

    pub fn current_mode(&self) -> Mode {
        self.lock().current_mode
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lock().lifecycle
    }

    /// Whether a submission is in flight (UI disables input while true)
    pub fn is_pending(&self) -> bool {
        self.lifecycle() == Lifecycle::Pending
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.lock().last_outcome.clone()
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Mode::Explain)
    }
}
