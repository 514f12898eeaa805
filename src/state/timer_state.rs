//! Timer state structure and management

use serde::Serialize;

use crate::scheduler::TickToken;

/// Whether the redraw timer is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Running,
    Stopped,
}

/// A tick that has been scheduled and not yet delivered or cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingTick {
    pub token: TickToken,
    pub due_at_millis: i64,
}

/// Timer state for tracking the redraw tick
#[derive(Debug, Clone, Serialize)]
pub struct TimerState {
    pub phase: TimerPhase,
    pub pending: Option<PendingTick>,
}

impl TimerState {
    /// Create a new stopped timer state
    pub fn new() -> Self {
        Self {
            phase: TimerPhase::Stopped,
            pending: None,
        }
    }

    /// Check if the timer is running
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Get the pending token if one is outstanding
    pub fn pending_token(&self) -> Option<TickToken> {
        self.pending.map(|tick| tick.token)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
