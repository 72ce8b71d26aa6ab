use crate::models::{Assignment, Solution};
use std::sync::Arc;
use std::time::Duration;

/// A black-box optimizer which turns a fixed subblock assignment into a detailed schedule.
///
/// Implementations must return `None` instead of failing when no schedule exists or the time
/// budget is exhausted. A returned solution keeps the given assignment verbatim and its objective
/// decomposes exactly into route, time and congestion components.
pub trait SubproblemOracle {
    /// Evaluates the assignment within the remaining time budget, `None` budget means unlimited.
    fn evaluate(&self, assignment: &Assignment, budget: Option<Duration>) -> Option<Solution>;

    /// Re-optimizes operation times keeping subblocks of the solution fixed.
    fn reoptimize_timing(&self, _solution: &Solution, _budget: Option<Duration>) -> Option<Solution> {
        None
    }

    /// Re-optimizes the subblock assignment keeping operation times of the solution fixed.
    fn reoptimize_assignment(&self, _solution: &Solution, _budget: Option<Duration>) -> Option<Solution> {
        None
    }
}

impl<T: SubproblemOracle + ?Sized> SubproblemOracle for Arc<T> {
    fn evaluate(&self, assignment: &Assignment, budget: Option<Duration>) -> Option<Solution> {
        self.as_ref().evaluate(assignment, budget)
    }

    fn reoptimize_timing(&self, solution: &Solution, budget: Option<Duration>) -> Option<Solution> {
        self.as_ref().reoptimize_timing(solution, budget)
    }

    fn reoptimize_assignment(&self, solution: &Solution, budget: Option<Duration>) -> Option<Solution> {
        self.as_ref().reoptimize_assignment(solution, budget)
    }
}
