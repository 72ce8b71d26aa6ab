#[cfg(test)]
#[path = "../../tests/unit/solver/refinement_test.rs"]
mod refinement_test;

use crate::models::Solution;
use crate::solver::SubproblemOracle;
use crate::utils::{Environment, Float, is_less_by};

/// A result of local refinement.
pub struct RefinementOutcome {
    /// The best solution found.
    pub solution: Solution,
    /// Amount of accepted refinement steps.
    pub steps: usize,
}

/// Alternates two restricted re-optimizations of the oracle: operation timing with fixed subblocks
/// and subblock assignment with fixed timing. A combined step is accepted only while it strictly
/// improves the objective.
pub fn refine_locally<O: SubproblemOracle + ?Sized>(
    oracle: &O,
    solution: Solution,
    environment: &Environment,
    epsilon: Float,
) -> RefinementOutcome {
    let mut current = solution;
    let mut steps = 0;

    while !environment.is_quota_reached() {
        let timed = oracle.reoptimize_timing(&current, environment.remaining());
        let relocated = oracle.reoptimize_assignment(timed.as_ref().unwrap_or(&current), environment.remaining());

        match relocated.or(timed) {
            Some(candidate) if is_less_by(candidate.objective(), current.objective(), epsilon) => {
                current = candidate;
                steps += 1;
            }
            _ => break,
        }
    }

    RefinementOutcome { solution: current, steps }
}
