use crate::models::{Assignment, Solution};
use crate::solver::SubproblemOracle;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// An oracle which never finds a schedule.
pub struct AlwaysInfeasibleOracle;

impl SubproblemOracle for AlwaysInfeasibleOracle {
    fn evaluate(&self, _: &Assignment, _: Option<Duration>) -> Option<Solution> {
        None
    }
}

/// Counts calls of the wrapped oracle.
pub struct CountingOracle<O> {
    inner: O,
    evaluations: AtomicUsize,
}

impl<O: SubproblemOracle> CountingOracle<O> {
    pub fn new(inner: O) -> Self {
        Self { inner, evaluations: AtomicUsize::new(0) }
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }
}

impl<O: SubproblemOracle> SubproblemOracle for CountingOracle<O> {
    fn evaluate(&self, assignment: &Assignment, budget: Option<Duration>) -> Option<Solution> {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        self.inner.evaluate(assignment, budget)
    }

    fn reoptimize_timing(&self, solution: &Solution, budget: Option<Duration>) -> Option<Solution> {
        self.inner.reoptimize_timing(solution, budget)
    }

    fn reoptimize_assignment(&self, solution: &Solution, budget: Option<Duration>) -> Option<Solution> {
        self.inner.reoptimize_assignment(solution, budget)
    }
}
