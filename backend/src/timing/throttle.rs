//! Leading-edge throttle.

use std::time::Duration;

use tokio::time::Instant;

/// Lets a call through only when `interval` has passed since the last call
/// it let through. Calls in between are dropped, not deferred.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn try_acquire(&mut self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    /// Same as [`try_acquire`](Self::try_acquire) with an explicit clock reading.
    pub fn try_acquire_at(&mut self, now: Instant) -> bool {
        let ready = self
            .last
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval);
        if ready {
            self.last = Some(now);
        }
        ready
    }

    /// Forget the last call so the next one passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
