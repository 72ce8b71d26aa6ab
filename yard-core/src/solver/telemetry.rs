//! A module which provides simple progress logging of the search.

use crate::models::Solution;
use crate::solver::{SearchResult, ShakeOutcome};
use crate::utils::{InfoLogger, Timer};

/// Specifies a telemetry mode.
#[derive(Clone)]
pub enum TelemetryMode {
    /// No telemetry at all.
    None,
    /// Only logging.
    OnlyLogging {
        /// A logger type.
        logger: InfoLogger,
    },
}

/// Writes human readable information about the search progress into log.
pub struct Telemetry {
    time: Timer,
    mode: TelemetryMode,
}

impl Telemetry {
    /// Creates a new instance of `Telemetry`.
    pub fn new(mode: TelemetryMode) -> Self {
        Self { time: Timer::start(), mode }
    }

    /// Reports a constructed solution which starts a round.
    pub fn on_initial(&self, round: usize, attempts: usize, solution: &Solution) {
        self.log(&format!("round {round}: constructed solution in {attempts} attempt(s), cost: {}", solution.cost));
    }

    /// Reports a round which is skipped as no feasible solution was constructed.
    pub fn on_round_skipped(&self, round: usize, attempts: usize) {
        self.log(&format!("round {round}: skipped, no feasible construction after {attempts} attempt(s)"));
    }

    /// Reports a new best known solution.
    pub fn on_best(&self, solution: &Solution) {
        self.log(&format!("new best: {}", solution.cost));
    }

    /// Reports the end of a search phase.
    pub fn on_phase_end(&self, phase: &str, reason: &str, explored: usize) {
        self.log(&format!("{phase} finished: {reason}, explored: {explored}"));
    }

    /// Reports a shake.
    pub fn on_shake(&self, shake: usize, outcome: &ShakeOutcome) {
        let duplicate = if outcome.is_duplicate { ", accepted duplicate" } else { "" };
        self.log(&format!("shake {shake}: {} attempt(s){duplicate}", outcome.attempts));
    }

    /// Reports the search result.
    pub fn on_result(&self, result: &SearchResult) {
        match (&result.initial, &result.best) {
            (Some(initial), Some(best)) => self.log(&format!(
                "search finished in {:.2}s: initial {:.3}, best {}, improvement {:.2}%, explored {}, shakes {}",
                result.elapsed_secs,
                initial.objective(),
                best.cost,
                result.improvement_ratio().unwrap_or(0.) * 100.,
                result.explored,
                result.shakes,
            )),
            _ => self.log("search finished: no solution found"),
        }
    }

    fn log(&self, message: &str) {
        if let TelemetryMode::OnlyLogging { logger } = &self.mode {
            (logger)(&format!("[{:.2}s] {message}", self.time.elapsed_secs_as_float()));
        }
    }
}
