use crate::utils::Float;

/// Tunable parameters of the decomposed neighborhood search.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Maximum amount of neighbors generated per iteration.
    pub neighbor_limit: usize,
    /// Maximum amount of iterations without a new best solution.
    pub max_no_best_iterations: usize,
    /// Maximum amount of iterations without improving the current solution.
    pub max_no_improved_iterations: usize,
    /// Maximum amount of neighbors evaluated per neighborhood search phase.
    pub max_explored_solutions: usize,
    /// Amount of shakes, the search runs one round more than this value.
    pub shaking_times: usize,
    /// Amount of the most expensive vessel periods moved by a shake.
    pub critical_elements: usize,
    /// Capacity of the tabu history.
    pub max_tabu_size: usize,
    /// Maximum amount of attempts to avoid a tabu sequence.
    pub max_shake_attempts: usize,
    /// Maximum amount of reshuffles when the initial construction is infeasible.
    pub max_heuristic_random_attempts: usize,
    /// Stops evaluating the current batch of neighbors after a new best solution.
    pub meet_best_and_break: bool,
    /// Stops evaluating the current batch of neighbors after an improving solution.
    pub meet_improved_and_break: bool,
    /// Shuffles relative order of critical vessel periods during a shake.
    pub shuffle_critical: bool,
    /// Uses scored critical neighbors, otherwise unscored random neighbors.
    pub critical_neighbors: bool,
    /// Runs local refinement after the neighborhood search.
    pub local_refinement: bool,
    /// A global wall-clock limit in seconds.
    pub time_limit: Option<Float>,
    /// A hint of how many threads one oracle uses.
    pub parallelism: usize,
    /// A tolerance used in all cost comparisons.
    pub epsilon: Float,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            neighbor_limit: 20,
            max_no_best_iterations: 10,
            max_no_improved_iterations: 5,
            max_explored_solutions: 200,
            shaking_times: 10,
            critical_elements: 3,
            max_tabu_size: 10,
            max_shake_attempts: 10,
            max_heuristic_random_attempts: 10,
            meet_best_and_break: true,
            meet_improved_and_break: false,
            shuffle_critical: true,
            critical_neighbors: true,
            local_refinement: false,
            time_limit: None,
            parallelism: 1,
            epsilon: 1E-6,
        }
    }
}

impl SearchConfig {
    /// Sets maximum amount of neighbors per iteration.
    pub fn with_neighbor_limit(mut self, limit: usize) -> Self {
        self.neighbor_limit = limit;
        self
    }

    /// Sets stall limits: iterations without a new best and without an improvement.
    pub fn with_stall_limits(mut self, max_no_best: usize, max_no_improved: usize) -> Self {
        self.max_no_best_iterations = max_no_best;
        self.max_no_improved_iterations = max_no_improved;
        self
    }

    /// Sets maximum amount of evaluated neighbors per phase.
    pub fn with_max_explored_solutions(mut self, max_explored: usize) -> Self {
        self.max_explored_solutions = max_explored;
        self
    }

    /// Sets shake parameters.
    pub fn with_shaking(mut self, shaking_times: usize, critical_elements: usize, shuffle_critical: bool) -> Self {
        self.shaking_times = shaking_times;
        self.critical_elements = critical_elements;
        self.shuffle_critical = shuffle_critical;
        self
    }

    /// Sets tabu parameters.
    pub fn with_tabu(mut self, max_tabu_size: usize, max_shake_attempts: usize) -> Self {
        self.max_tabu_size = max_tabu_size;
        self.max_shake_attempts = max_shake_attempts;
        self
    }

    /// Sets maximum amount of reshuffles of an infeasible construction.
    pub fn with_max_heuristic_random_attempts(mut self, attempts: usize) -> Self {
        self.max_heuristic_random_attempts = attempts;
        self
    }

    /// Sets early break flags of the neighbor batch evaluation.
    pub fn with_early_breaks(mut self, meet_best_and_break: bool, meet_improved_and_break: bool) -> Self {
        self.meet_best_and_break = meet_best_and_break;
        self.meet_improved_and_break = meet_improved_and_break;
        self
    }

    /// Sets neighbor generation mode.
    pub fn with_critical_neighbors(mut self, critical_neighbors: bool) -> Self {
        self.critical_neighbors = critical_neighbors;
        self
    }

    /// Enables or disables local refinement.
    pub fn with_local_refinement(mut self, local_refinement: bool) -> Self {
        self.local_refinement = local_refinement;
        self
    }

    /// Sets a global time limit in seconds.
    pub fn with_time_limit(mut self, time_limit: Option<Float>) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Sets a solver parallelism hint.
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism.max(1);
        self
    }
}
