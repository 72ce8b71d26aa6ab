#[cfg(test)]
#[path = "../../tests/unit/utils/quota_test.rs"]
mod quota_test;

use crate::utils::Timer;
use std::sync::Arc;
use std::time::Duration;

/// Specifies a computational quota for the search. The search checks it cooperatively before
/// every unit of work and never gets interrupted preemptively.
pub trait Quota {
    /// Returns true when computation should be stopped.
    fn is_reached(&self) -> bool;

    /// Returns a remaining time budget if the quota is time based.
    fn remaining(&self) -> Option<Duration> {
        None
    }
}

/// A wall-clock quota.
pub struct TimeQuota {
    start: Timer,
    limit: Duration,
}

impl TimeQuota {
    /// Creates a new instance of `TimeQuota` with the limit given in seconds.
    pub fn new(limit_in_secs: f64) -> Self {
        Self { start: Timer::start(), limit: Duration::from_secs_f64(limit_in_secs.max(0.)) }
    }
}

impl Quota for TimeQuota {
    fn is_reached(&self) -> bool {
        self.start.elapsed() >= self.limit
    }

    fn remaining(&self) -> Option<Duration> {
        Some(self.limit.saturating_sub(self.start.elapsed()))
    }
}

/// A quota which is reached when any of its inner quotas is reached.
pub struct CompositeQuota {
    inners: Vec<Arc<dyn Quota + Send + Sync>>,
}

impl CompositeQuota {
    /// Creates a new instance of `CompositeQuota`.
    pub fn new(inners: Vec<Arc<dyn Quota + Send + Sync>>) -> Self {
        Self { inners }
    }
}

impl Quota for CompositeQuota {
    fn is_reached(&self) -> bool {
        self.inners.iter().any(|quota| quota.is_reached())
    }

    fn remaining(&self) -> Option<Duration> {
        self.inners.iter().filter_map(|quota| quota.remaining()).min()
    }
}
