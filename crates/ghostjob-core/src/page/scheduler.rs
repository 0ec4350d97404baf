//! Debounced rescan scheduling.
//!
//! Bursts of page changes collapse into a single pending pass: every trigger
//! pushes the one deadline slot forward. While a pass is running further
//! triggers are dropped, not queued. Time is always passed in by the caller.

use std::time::{Duration, Instant};

/// What asked for a rescan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// New nodes were inserted into the page.
    Mutation,
    Scroll,
    Startup,
}

impl Trigger {
    pub fn delay(&self) -> Duration {
        match self {
            Trigger::Mutation => Duration::from_millis(500),
            Trigger::Scroll => Duration::from_millis(600),
            Trigger::Startup => Duration::from_millis(800),
        }
    }
}

/// A pass is already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Busy;

#[derive(Debug, Default)]
pub struct RescanScheduler {
    deadline: Option<Instant>,
    running: bool,
}

impl RescanScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a trigger. Returns `false` when it was dropped because a pass
    /// is running.
    pub fn notify(&mut self, trigger: Trigger, now: Instant) -> bool {
        if self.running {
            tracing::trace!(?trigger, "pass running, trigger dropped");
            return false;
        }
        self.deadline = Some(now + trigger.delay());
        true
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True exactly once when the pending deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if now >= at && !self.running => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn start_pass(&mut self) -> Result<(), Busy> {
        if self.running {
            return Err(Busy);
        }
        self.running = true;
        Ok(())
    }

    pub fn finish_pass(&mut self) {
        self.running = false;
    }
}
