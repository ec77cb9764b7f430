//!
//! Replay protection
//!

use crate::clock;
use std::time::Duration;

/// 5 minutes
pub const DEFAULT_REPLAY_WINDOW: Duration = Duration::from_millis(300_000);

/// Rejects signatures whose epoch isn't recent
///
/// An epoch is fresh if and only if `0 < now - epoch < window`.
/// Epochs at or after the current time are rejected as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayGuard {
    window: Duration,
}

impl ReplayGuard {
    /// Construct a guard with a custom window
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self { window }
    }

    /// Window in which a signature is accepted
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Check the epoch against the current time of the thread-local clock
    #[must_use]
    pub fn is_fresh(&self, epoch: u64) -> bool {
        self.is_fresh_at(epoch, clock::now_millis())
    }

    /// Check the epoch against the provided current time
    #[must_use]
    pub fn is_fresh_at(&self, epoch: u64, now: u64) -> bool {
        let delta = i128::from(now) - i128::from(epoch);
        u128::try_from(delta).is_ok_and(|delta| delta > 0 && delta < self.window.as_millis())
    }
}

impl Default for ReplayGuard {
    fn default() -> Self {
        Self::new(DEFAULT_REPLAY_WINDOW)
    }
}

/// Check whether the epoch is within the window of the current time
#[inline]
#[must_use]
pub fn is_fresh(epoch: u64, window: Duration) -> bool {
    ReplayGuard::new(window).is_fresh(epoch)
}
