/// Usage and lifetime bookkeeping for one pooled resource.
///
/// Times are offsets on the RenderContext frame clock.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageRecord {
    in_use: bool,
    last_used: Duration,
    /// `None` = never evicted
    ttl: Option<Duration>,
}

impl UsageRecord {
    /// Record for a default instance (never evicted).
    pub fn infinite() -> Self {
        Self {
            in_use: false,
            last_used: Duration::ZERO,
            ttl: None,
        }
    }

    /// Record for a pool-generated instance created at `now`.
    pub fn with_ttl(now: Duration, ttl: Duration) -> Self {
        Self {
            in_use: false,
            last_used: now,
            ttl: Some(ttl),
        }
    }

    pub fn is_in_use(&self) -> bool {
        self.in_use
    }

    pub fn last_used(&self) -> Duration {
        self.last_used
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn is_evictable(&self) -> bool {
        self.ttl.is_some()
    }

    /// Mark in use and postpone eviction.
    pub fn mark_used(&mut self, now: Duration) {
        self.in_use = true;
        self.last_used = now;
    }

    pub fn release(&mut self) {
        self.in_use = false;
    }

    /// Time left before the TTL elapses (`None` for infinite records).
    pub fn time_remaining(&self, now: Duration) -> Option<Duration> {
        self.ttl.map(|ttl| ttl.saturating_sub(now.saturating_sub(self.last_used)))
    }

    /// Unused and strictly past its TTL.
    pub fn is_expired(&self, now: Duration) -> bool {
        match self.ttl {
            Some(ttl) => !self.in_use && now.saturating_sub(self.last_used) > ttl,
            None => false,
        }
    }

    /// When an eviction check should run next (`None` for infinite records).
    pub fn next_check(&self, now: Duration) -> Option<Duration> {
        self.ttl.map(|ttl| (self.last_used + ttl).max(now))
    }
}

#[cfg(test)]
#[path = "usage_record_tests.rs"]
mod tests;
