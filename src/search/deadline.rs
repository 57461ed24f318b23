//! Wall-clock limit checked between branches.

use std::time::{Duration, Instant};

/// Stops the search once a time limit has passed.
///
/// The clock is read only every `check_interval` calls to
/// [`expired`](Self::expired), so the limit may be overshot by up to that
/// many branches.
#[derive(Debug, Clone)]
pub struct Deadline {
    limit: Option<Duration>,
    start: Instant,
    check_interval: u64,
    calls_since_check: u64,
    expired: bool,
}

impl Deadline {
    /// Starts the clock now.
    pub fn new(limit: Option<Duration>, check_interval: u64) -> Self {
        Self {
            limit,
            start: Instant::now(),
            check_interval: check_interval.max(1),
            calls_since_check: 0,
            expired: false,
        }
    }

    /// A deadline that never expires.
    pub fn unlimited() -> Self {
        Self::new(None, u64::MAX)
    }

    /// Returns `true` once the limit has passed. Stays `true` afterwards.
    #[inline]
    pub fn expired(&mut self) -> bool {
        if self.expired {
            return true;
        }
        let Some(limit) = self.limit else {
            return false;
        };
        self.calls_since_check += 1;
        if self.calls_since_check >= self.check_interval {
            self.calls_since_check = 0;
            self.expired = self.start.elapsed() >= limit;
        }
        self.expired
    }

    /// Reads the clock regardless of the check interval.
    pub fn expired_now(&mut self) -> bool {
        if let Some(limit) = self.limit {
            self.expired = self.expired || self.start.elapsed() >= limit;
        }
        self.expired
    }

    /// Time since the clock started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
