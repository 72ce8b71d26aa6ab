use crate::utils::Float;
use std::time::{Duration, Instant};

/// Implements a simple wall-clock timer.
#[derive(Clone, Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Starts a new timer.
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    /// Returns elapsed time.
    pub fn elapsed(&self) -> Duration {
        Instant::now() - self.start
    }

    /// Returns elapsed seconds as float.
    pub fn elapsed_secs_as_float(&self) -> Float {
        self.elapsed().as_secs_f64() as Float
    }
}
