#[cfg(test)]
#[path = "../../tests/unit/solver/search_test.rs"]
mod search_test;

use crate::construction::YardTemplateHeuristic;
use crate::models::{Assignment, CostTable, Instance, Solution};
use crate::solver::*;
use crate::utils::*;
use std::cmp::Ordering;
use std::sync::Arc;

/// A result of the decomposed neighborhood search with its provenance.
#[derive(Clone, Debug, Default)]
pub struct SearchResult {
    /// The best known solution, `None` when every round failed to construct a feasible one.
    pub best: Option<Solution>,
    /// The first feasible solution constructed.
    pub initial: Option<Solution>,
    /// Objectives of consecutive best known solutions.
    pub history: Vec<Float>,
    /// Amount of neighbors evaluated by the oracle.
    pub explored: usize,
    /// Amount of rounds started.
    pub rounds: usize,
    /// Amount of rounds skipped as no feasible solution was constructed.
    pub skipped_rounds: usize,
    /// Amount of shakes.
    pub shakes: usize,
    /// Elapsed time in seconds.
    pub elapsed_secs: Float,
}

impl SearchResult {
    /// Returns the best assignment found.
    pub fn best_assignment(&self) -> Option<&Assignment> {
        self.best.as_ref().map(|solution| &solution.assignment)
    }

    /// Returns relative improvement of the best objective over the initial one.
    pub fn improvement_ratio(&self) -> Option<Float> {
        let initial = self.initial.as_ref()?.objective();
        let best = self.best.as_ref()?.objective();

        Some(if compare_floats(initial, 0.) == Ordering::Equal { 0. } else { (initial - best) / initial })
    }
}

/// Explores yard templates: constructs an assignment greedily from a priority order, improves it
/// with cost guided neighbors evaluated by the oracle and perturbs the priority between rounds.
pub struct DecomposedNeighborhoodSearch<O: SubproblemOracle> {
    instance: Arc<Instance>,
    oracle: O,
    config: SearchConfig,
    environment: Environment,
    telemetry_mode: TelemetryMode,
}

impl<O: SubproblemOracle> DecomposedNeighborhoodSearch<O> {
    /// Creates a new instance of `DecomposedNeighborhoodSearch`.
    pub fn new(instance: Arc<Instance>, oracle: O, config: SearchConfig, environment: Environment) -> Self {
        Self { instance, oracle, config, environment, telemetry_mode: TelemetryMode::None }
    }

    /// Sets telemetry mode.
    pub fn with_telemetry(mut self, telemetry_mode: TelemetryMode) -> Self {
        self.telemetry_mode = telemetry_mode;
        self
    }

    /// Returns a reference to the oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Runs the search until all shake rounds are done or the quota is reached.
    pub fn solve(&self) -> SearchResult {
        let timer = Timer::start();
        let context = SearchContext {
            instance: self.instance.as_ref(),
            oracle: &self.oracle,
            config: &self.config,
            environment: self.create_environment(),
            telemetry: Telemetry::new(self.telemetry_mode.clone()),
            heuristic: YardTemplateHeuristic::new(self.instance.clone()),
            generator: NeighborhoodGenerator::new(
                self.instance.clone(),
                self.config.neighbor_limit,
                self.config.epsilon,
            ),
        };

        let mut state = SearchState::new(self.instance.as_ref(), &self.config);

        loop {
            if context.environment.is_quota_reached() {
                break;
            }

            let round = state.rounds;
            state.rounds += 1;

            let round_result = context.run_round(&mut state, round);

            if state.shakes >= self.config.shaking_times || context.environment.is_quota_reached() {
                break;
            }

            context.shake(&mut state, round_result.as_ref());
        }

        let result = SearchResult {
            best: state.incumbent,
            initial: state.initial,
            history: state.history,
            explored: state.explored,
            rounds: state.rounds,
            skipped_rounds: state.skipped_rounds,
            shakes: state.shakes,
            elapsed_secs: timer.elapsed_secs_as_float(),
        };

        context.telemetry.on_result(&result);

        result
    }

    fn create_environment(&self) -> Environment {
        let quota: Option<Arc<dyn Quota + Send + Sync>> = match (self.config.time_limit, self.environment.quota.clone()) {
            (Some(limit), Some(quota)) => {
                let time_quota: Arc<dyn Quota + Send + Sync> = Arc::new(TimeQuota::new(limit));
                Some(Arc::new(CompositeQuota::new(vec![time_quota, quota])))
            }
            (Some(limit), None) => Some(Arc::new(TimeQuota::new(limit))),
            (None, quota) => quota,
        };

        Environment { quota, ..self.environment.clone() }
    }
}

/// A mutable state of one search run.
struct SearchState {
    priority: Vec<usize>,
    costs: CostTable,
    tabu: TabuList,
    incumbent: Option<Solution>,
    initial: Option<Solution>,
    history: Vec<Float>,
    explored: usize,
    rounds: usize,
    skipped_rounds: usize,
    shakes: usize,
}

impl SearchState {
    fn new(instance: &Instance, config: &SearchConfig) -> Self {
        let priority = initial_priority(instance);
        let mut tabu = TabuList::new(config.max_tabu_size);
        tabu.push(priority.clone());

        Self {
            priority,
            costs: CostTable::from_routes(instance),
            tabu,
            incumbent: None,
            initial: None,
            history: vec![],
            explored: 0,
            rounds: 0,
            skipped_rounds: 0,
            shakes: 0,
        }
    }

    fn is_best(&self, solution: &Solution, epsilon: Float) -> bool {
        self.incumbent.as_ref().is_none_or(|best| is_less_by(solution.objective(), best.objective(), epsilon))
    }

    fn accept_best(&mut self, solution: &Solution, telemetry: &Telemetry) {
        self.history.push(solution.objective());
        self.incumbent = Some(solution.clone());
        telemetry.on_best(solution);
    }
}

/// A state of the round which is used to pick critical vessel periods for the next shake.
struct RoundResult {
    current: Solution,
    costs: CostTable,
}

/// An immutable context shared by all search phases.
struct SearchContext<'a, O: SubproblemOracle> {
    instance: &'a Instance,
    oracle: &'a O,
    config: &'a SearchConfig,
    environment: Environment,
    telemetry: Telemetry,
    heuristic: YardTemplateHeuristic,
    generator: NeighborhoodGenerator,
}

impl<O: SubproblemOracle> SearchContext<'_, O> {
    fn run_round(&self, state: &mut SearchState, round: usize) -> Option<RoundResult> {
        let (current, attempts) = match self.construct(state) {
            Ok(constructed) => constructed,
            Err(attempts) => {
                state.skipped_rounds += 1;
                self.telemetry.on_round_skipped(round, attempts);
                return None;
            }
        };

        self.telemetry.on_initial(round, attempts, &current);

        if state.initial.is_none() {
            state.initial = Some(current.clone());
        }

        if state.is_best(&current, self.config.epsilon) {
            state.accept_best(&current, &self.telemetry);
        }

        let mut round_costs = state.costs.clone();
        let mut current = self.explore(state, current, &mut round_costs);

        if self.config.local_refinement {
            current = self.refine(state, current);
        }

        state.costs.blend(&round_costs);

        Some(RoundResult { current, costs: round_costs })
    }

    /// Builds an assignment from the current priority reshuffling it before each next attempt.
    /// Returns a solution with amount of attempts used or amount of failed attempts.
    fn construct(&self, state: &mut SearchState) -> Result<(Solution, usize), usize> {
        let max_attempts = self.config.max_heuristic_random_attempts.max(1);

        for attempt in 1..=max_attempts {
            if self.environment.is_quota_reached() {
                return Err(attempt - 1);
            }

            let solution = self
                .heuristic
                .assign(state.priority.as_slice(), &state.costs)
                .and_then(|assignment| self.evaluate(&assignment));

            if let Some(solution) = solution {
                assert_valid(self.instance, &solution.assignment);
                return Ok((solution, attempt));
            }

            if attempt < max_attempts {
                self.environment.random.shuffle(state.priority.as_mut_slice());
            }
        }

        Err(max_attempts)
    }

    fn explore(&self, state: &mut SearchState, mut current: Solution, costs: &mut CostTable) -> Solution {
        let config = self.config;
        let epsilon = config.epsilon;

        let mut iteration = 0;
        let mut no_best = 0;
        let mut no_improved = 0;
        let mut explored = 0;

        let reason = loop {
            if no_best >= config.max_no_best_iterations {
                break "no best solution found";
            }
            if no_improved >= config.max_no_improved_iterations {
                break "no improvement";
            }
            if explored >= config.max_explored_solutions {
                break "explored limit";
            }
            if self.environment.is_quota_reached() {
                break "quota reached";
            }

            costs.decay(&estimate_costs(self.instance, &current), 1. / (iteration as Float + 2.));
            iteration += 1;

            let neighbors = if config.critical_neighbors {
                self.generator.generate(&current.assignment, costs)
            } else {
                self.generator.generate_random(&current.assignment, costs, self.environment.random.as_ref())
            };

            let mut has_feasible = false;
            let mut has_best = false;
            let mut has_improved = false;

            for neighbor in neighbors {
                if explored >= config.max_explored_solutions || self.environment.is_quota_reached() {
                    break;
                }

                explored += 1;
                state.explored += 1;

                let Some(candidate) = self.evaluate(&neighbor.assignment) else { continue };
                has_feasible = true;

                let observation = estimate_costs(self.instance, &candidate);

                if state.is_best(&candidate, epsilon) {
                    assert_valid(self.instance, &candidate.assignment);
                    costs.merge_min(&observation);
                    state.accept_best(&candidate, &self.telemetry);
                    current = candidate;
                    has_best = true;

                    if config.meet_best_and_break {
                        break;
                    }
                } else if is_less_by(candidate.objective(), current.objective(), epsilon) {
                    assert_valid(self.instance, &candidate.assignment);
                    costs.average(&observation);
                    current = candidate;
                    has_improved = true;

                    if config.meet_improved_and_break {
                        break;
                    }
                } else {
                    costs.average(&observation);
                }
            }

            if !has_feasible {
                break "no feasible neighbor";
            }

            if has_best {
                no_best = 0;
                no_improved = 0;
            } else {
                no_best += 1;
                if has_improved {
                    no_improved = 0;
                } else {
                    no_improved += 1;
                }
            }
        };

        self.telemetry.on_phase_end("neighborhood search", reason, explored);

        current
    }

    fn refine(&self, state: &mut SearchState, current: Solution) -> Solution {
        let outcome = refine_locally(self.oracle, current, &self.environment, self.config.epsilon);
        assert_valid(self.instance, &outcome.solution.assignment);

        if state.is_best(&outcome.solution, self.config.epsilon) {
            state.accept_best(&outcome.solution, &self.telemetry);
        }

        self.telemetry.on_phase_end("local refinement", &format!("{} step(s) accepted", outcome.steps), outcome.steps);

        outcome.solution
    }

    fn shake(&self, state: &mut SearchState, round: Option<&RoundResult>) {
        let criticality = match (round, state.incumbent.as_ref()) {
            (Some(round), _) => period_criticality(self.instance, &round.current.assignment, &round.costs),
            (None, Some(best)) => period_criticality(self.instance, &best.assignment, &state.costs),
            (None, None) => vec![0.; self.instance.period_count()],
        };

        let params = ShakeParams {
            critical_elements: self.config.critical_elements,
            shuffle_critical: self.config.shuffle_critical,
            max_attempts: self.config.max_shake_attempts,
        };

        let outcome = tabu_critical_shake(
            state.priority.as_slice(),
            criticality.as_slice(),
            &params,
            &mut state.tabu,
            self.environment.random.as_ref(),
        );

        state.shakes += 1;
        self.telemetry.on_shake(state.shakes, &outcome);
        state.priority = outcome.priority;
    }

    fn evaluate(&self, assignment: &Assignment) -> Option<Solution> {
        let solution = self.oracle.evaluate(assignment, self.environment.remaining())?;
        assert!(solution.assignment == *assignment, "oracle has not preserved the assignment");

        Some(solution)
    }
}

/// Returns vessel periods ordered by descending total load, ties are resolved by id.
pub fn initial_priority(instance: &Instance) -> Vec<usize> {
    let mut priority = (0..instance.period_count()).collect::<Vec<_>>();
    priority.sort_by(|&a, &b| instance.period(b).total_load.cmp(&instance.period(a).total_load).then(a.cmp(&b)));

    priority
}

fn assert_valid(instance: &Instance, assignment: &Assignment) {
    if let Err(err) = assignment.validate(instance) {
        panic!("invalid assignment accepted: {err}");
    }
}
