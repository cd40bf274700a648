//! Heartbeat scheduling for the host's recurring 1-second interval.
//!
//! The engine never owns a timer. Instead, after every state transition the
//! scheduler compares the heartbeat the state wants against what the host is
//! currently running and emits a start/stop command for the host's interval
//! primitive.
use serde::{Deserialize, Serialize};

use crate::state::GameState;

/// Command for the host's interval primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerCommand {
    /// Begin firing `tick()` once per time unit.
    Start,
    /// Cancel the recurring interval.
    Stop,
}

/// Reconciles desired-vs-running heartbeat state across transitions.
///
/// The heartbeat is wanted while any factory is owned, or while a transient
/// system message still has ticks to burn (the message TTL must elapse even
/// with zero factories).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickScheduler {
    running: bool,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the host interval is currently believed to be running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the given state wants a heartbeat at all.
    #[must_use]
    pub fn heartbeat_wanted(gs: &GameState) -> bool {
        gs.any_factory() || gs.system_message.is_some()
    }

    /// Compare desired and running state; returns the command the host must
    /// apply, or `None` when nothing changed.
    pub fn reconcile(&mut self, gs: &GameState) -> Option<SchedulerCommand> {
        let wanted = Self::heartbeat_wanted(gs);
        match (self.running, wanted) {
            (false, true) => {
                self.running = true;
                Some(SchedulerCommand::Start)
            }
            (true, false) => {
                self.running = false;
                Some(SchedulerCommand::Stop)
            }
            _ => None,
        }
    }
}
