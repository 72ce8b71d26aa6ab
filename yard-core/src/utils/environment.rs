use crate::utils::{DefaultRandom, Quota, Random};
use std::sync::Arc;
use std::time::Duration;

/// A logger type.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Keeps track of environment specific information which influences algorithm behavior.
#[derive(Clone)]
pub struct Environment {
    /// A wrapper on random generator.
    pub random: Arc<dyn Random + Send + Sync>,

    /// A global execution quota.
    pub quota: Option<Arc<dyn Quota + Send + Sync>>,

    /// An information logger.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates an instance of `Environment`.
    pub fn new(
        random: Arc<dyn Random + Send + Sync>,
        quota: Option<Arc<dyn Quota + Send + Sync>>,
        logger: InfoLogger,
    ) -> Self {
        Self { random, quota, logger }
    }

    /// Creates an environment with a repeatable random sequence and no logging.
    pub fn new_repeatable(seed: u64) -> Self {
        Self::new(Arc::new(DefaultRandom::new_repeatable(seed)), None, Arc::new(|_| ()))
    }

    /// Returns true if the global quota is reached.
    pub fn is_quota_reached(&self) -> bool {
        self.quota.as_ref().is_some_and(|quota| quota.is_reached())
    }

    /// Returns the remaining time budget, `None` means unlimited.
    pub fn remaining(&self) -> Option<Duration> {
        self.quota.as_ref().and_then(|quota| quota.remaining())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Arc::new(DefaultRandom::default()), None, Arc::new(|msg: &str| println!("{msg}")))
    }
}

/// Returns amount of CPUs.
pub fn get_cpus() -> usize {
    num_cpus::get()
}
