//! Two-state label machine behind every copy control.
//!
//! Pure bookkeeping: no DOM, no timers. The control feeds it clipboard outcomes
//! and timer expiries and re-renders when a transition reports a change.

use crate::config::ResetPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Idle,
    Copied,
}

/// Identifies the successful copy a pending reset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTicket(u64);

#[derive(Debug)]
pub struct ControlMachine {
    state: ControlState,
    policy: ResetPolicy,
    /// Bumped on every successful copy; the newest ticket carries this value.
    generation: u64,
    pending_resets: usize,
}

impl ControlMachine {
    pub fn new(policy: ResetPolicy) -> Self {
        Self {
            state: ControlState::Idle,
            policy,
            generation: 0,
            pending_resets: 0,
        }
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn pending_resets(&self) -> usize {
        self.pending_resets
    }

    /// Clipboard write completed. Enters `Copied` and hands back the ticket
    /// the caller must schedule a reset for.
    pub fn copy_succeeded(&mut self) -> ResetTicket {
        self.generation += 1;
        self.pending_resets += 1;
        self.state = ControlState::Copied;
        ResetTicket(self.generation)
    }

    /// A scheduled reset fired. Returns true when the state changed.
    pub fn reset_elapsed(&mut self, ticket: ResetTicket) -> bool {
        self.pending_resets = self.pending_resets.saturating_sub(1);

        let applies = match self.policy {
            ResetPolicy::Restart => ticket.0 == self.generation,
            ResetPolicy::Independent => true,
        };
        if applies && self.state == ControlState::Copied {
            self.state = ControlState::Idle;
            true
        } else {
            false
        }
    }
}
