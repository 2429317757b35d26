//! Busy-poll iteration budgets
//!
//! Blocking and polling waits in this layer are bounded by an iteration
//! count, not wall-clock time: one unit of budget is spent per failed
//! poll of the wait condition. Expiration is a normal return value
//! ([`crate::DeviceError::Timeout`]), never a fault. Because the budget
//! is an explicit parameter, tests can bound every wait deterministically.

use crate::error::{DeviceError, Result};

/// Iteration budget handed to a blocking or polling operation.
///
/// Operations that wait at more than one point (e.g. an I2C transaction)
/// take a fresh [`PollBudget`] of this size at every wait point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout {
    iterations: u32,
}

impl Timeout {
    /// Never wait: conditions must already hold when polled.
    pub const NONE: Timeout = Timeout { iterations: 0 };

    /// Budget of `iterations` failed polls per wait point.
    pub const fn iterations(iterations: u32) -> Self {
        Timeout { iterations }
    }

    /// Start a countdown for one wait point.
    pub const fn budget(self) -> PollBudget {
        PollBudget {
            remaining: self.iterations,
        }
    }
}

/// Countdown for a single wait point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBudget {
    remaining: u32,
}

impl PollBudget {
    /// Spend one iteration. Returns `false` once the budget is exhausted.
    pub fn spend(&mut self) -> bool {
        match self.remaining.checked_sub(1) {
            Some(rest) => {
                self.remaining = rest;
                true
            }
            None => false,
        }
    }

    /// Busy-poll `cond` until it holds, spending one unit per failed poll.
    ///
    /// A condition that already holds succeeds even on an exhausted
    /// budget; a condition that never holds returns
    /// [`DeviceError::Timeout`] after exactly the budgeted iterations.
    pub fn wait_for(mut self, mut cond: impl FnMut() -> bool) -> Result<()> {
        while !cond() {
            if !self.spend() {
                return Err(DeviceError::Timeout);
            }
            core::hint::spin_loop();
        }
        Ok(())
    }
}
