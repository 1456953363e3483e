//! Rate-limit backoff policy.
//!
//! GitHub signals an exhausted quota with `403 Forbidden` and an
//! `X-RateLimit-Reset` header holding the Unix time at which the window
//! resets. The request helper sleeps until then and retries the same URL.
//! The [`Clock`] seam lets tests observe the wait without actually sleeping.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Name of the header carrying the reset timestamp (Unix seconds).
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Source of wall-clock time and the means to block until a deadline.
pub trait Clock {
    /// Time elapsed since the Unix epoch.
    fn now(&self) -> Duration;

    /// Blocks the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// [`Clock`] backed by the system clock and [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// How many rate-limit waits a single request may go through.
///
/// The default is unbounded: the helper keeps waiting for as long as the
/// API keeps answering `403` with a reset header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of waits per request, or `None` for no limit.
    pub max_waits: Option<u32>,
}

impl RetryPolicy {
    /// Policy that never gives up.
    pub fn unbounded() -> Self {
        RetryPolicy { max_waits: None }
    }

    /// Policy that gives up after `max_waits` waits.
    pub fn bounded(max_waits: u32) -> Self {
        RetryPolicy {
            max_waits: Some(max_waits),
        }
    }

    /// Returns `true` if another wait is permitted after `waits_so_far`.
    pub fn allows(&self, waits_so_far: u32) -> bool {
        self.max_waits.map_or(true, |max| waits_so_far < max)
    }
}

/// Computes how long to wait until `reset_epoch_secs`, given the current time.
///
/// Returns `None` when the reset time is already in the past, in which case
/// the request is retried immediately.
pub fn wait_until_reset(reset_epoch_secs: u64, now: Duration) -> Option<Duration> {
    Duration::from_secs(reset_epoch_secs)
        .checked_sub(now)
        .filter(|d| !d.is_zero())
}
