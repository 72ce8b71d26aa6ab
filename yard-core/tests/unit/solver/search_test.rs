use super::*;
use crate::helpers::models::*;
use crate::helpers::solver::{AlwaysInfeasibleOracle, CountingOracle};
use crate::helpers::utils::create_test_environment;
use crate::scheduling::GreedyScheduleOracle;
use std::sync::Mutex;

fn create_search(config: SearchConfig) -> DecomposedNeighborhoodSearch<GreedyScheduleOracle> {
    let instance = create_yard_instance_arc();
    let oracle = GreedyScheduleOracle::new(instance.clone());

    DecomposedNeighborhoodSearch::new(instance, oracle, config, create_test_environment())
}

fn assert_result(instance: &Instance, result: &SearchResult) {
    let best = result.best.as_ref().expect("no best solution");
    let initial = result.initial.as_ref().expect("no initial solution");

    assert!(best.assignment.validate(instance).is_ok());
    assert!(best.objective() <= initial.objective());
    assert!(result.history.windows(2).all(|pair| pair[1] < pair[0]));
    assert_eq!(result.history.last().copied(), Some(best.objective()));
    assert_eq!(result.best_assignment(), Some(&best.assignment));
    assert!(result.improvement_ratio().is_some_and(|ratio| (0. ..=1.).contains(&ratio)));
}

#[test]
fn can_order_initial_priority_by_load() {
    let instance = create_yard_instance();

    assert_eq!(initial_priority(&instance), vec![1, 2, 5, 0, 4, 3]);
}

fn create_logger() -> (InfoLogger, Arc<Mutex<Vec<String>>>) {
    let messages = Arc::new(Mutex::new(Vec::<String>::new()));
    let logger: InfoLogger = {
        let messages = messages.clone();
        Arc::new(move |msg: &str| messages.lock().unwrap().push(msg.to_string()))
    };

    (logger, messages)
}

#[test]
fn can_find_solution_with_monotonic_history() {
    let instance = Arc::new(create_yard_instance_with_limit(1));
    let oracle = CountingOracle::new(GreedyScheduleOracle::new(instance.clone()));
    let (logger, messages) = create_logger();
    let config = SearchConfig::default().with_shaking(3, 2, true);
    let search = DecomposedNeighborhoodSearch::new(instance.clone(), oracle, config, create_test_environment())
        .with_telemetry(TelemetryMode::OnlyLogging { logger });

    let result = search.solve();

    assert_result(instance.as_ref(), &result);
    assert_eq!(result.rounds, 4);
    assert_eq!(result.shakes, 3);
    assert_eq!(result.skipped_rounds, 0);
    assert!(result.explored > 0);
    assert!(search.oracle().evaluations() >= result.explored + result.rounds);
    // some explored neighbors are not accepted as a new best
    assert!(result.explored > result.history.len());
    // a new best which does not follow a construction comes from explored neighbors
    let messages = messages.lock().unwrap();
    assert!(
        messages.windows(2).any(|pair| !pair[0].contains("constructed solution") && pair[1].contains("new best"))
    );
}

#[test]
fn can_keep_priority_after_last_failed_construction() {
    let instance = create_yard_instance_arc();
    let oracle = AlwaysInfeasibleOracle;
    let config = SearchConfig::default().with_max_heuristic_random_attempts(1);
    let context = SearchContext {
        instance: instance.as_ref(),
        oracle: &oracle,
        config: &config,
        environment: create_test_environment(),
        telemetry: Telemetry::new(TelemetryMode::None),
        heuristic: YardTemplateHeuristic::new(instance.clone()),
        generator: NeighborhoodGenerator::new(instance.clone(), config.neighbor_limit, config.epsilon),
    };
    let mut state = SearchState::new(instance.as_ref(), &config);

    let result = context.construct(&mut state);

    assert_eq!(result.err(), Some(1));
    assert_eq!(state.priority, initial_priority(instance.as_ref()));
}

#[test]
fn can_limit_explored_neighbors_per_phase() {
    let instance = create_yard_instance_arc();
    let oracle = CountingOracle::new(GreedyScheduleOracle::new(instance.clone()));
    let config = SearchConfig::default().with_shaking(2, 1, false).with_max_explored_solutions(3);
    let search = DecomposedNeighborhoodSearch::new(instance, oracle, config, create_test_environment());

    let result = search.solve();

    assert!(result.explored <= 3 * result.rounds);
    // every round evaluates its construction once on top of explored neighbors
    assert_eq!(search.oracle().evaluations(), result.explored + result.rounds);
}

#[test]
fn can_skip_rounds_when_oracle_is_always_infeasible() {
    let instance = create_yard_instance_arc();
    let oracle = CountingOracle::new(AlwaysInfeasibleOracle);
    let config = SearchConfig::default().with_shaking(2, 1, true).with_max_heuristic_random_attempts(4);
    let search = DecomposedNeighborhoodSearch::new(instance, oracle, config, create_test_environment());

    let result = search.solve();

    assert!(result.best.is_none());
    assert!(result.initial.is_none());
    assert!(result.history.is_empty());
    assert_eq!(result.rounds, 3);
    assert_eq!(result.skipped_rounds, 3);
    assert_eq!(result.shakes, 2);
    assert_eq!(result.improvement_ratio(), None);
    assert_eq!(search.oracle().evaluations(), 4 * 3);
}

#[test]
fn can_stop_immediately_with_zero_time_limit() {
    let search = create_search(SearchConfig::default().with_time_limit(Some(0.)));

    let result = search.solve();

    assert!(result.best.is_none());
    assert_eq!(result.rounds, 0);
}

#[test]
fn can_reproduce_search_with_same_seed() {
    let config = SearchConfig::default().with_shaking(3, 2, true);

    let first = create_search(config.clone()).solve();
    let second = create_search(config).solve();

    assert_eq!(first.history, second.history);
    assert_eq!(first.best_assignment(), second.best_assignment());
}

parameterized_test! {can_solve_with_different_modes, (critical_neighbors, local_refinement, meet_improved_and_break), {
    let config = SearchConfig::default()
        .with_shaking(2, 2, true)
        .with_critical_neighbors(critical_neighbors)
        .with_local_refinement(local_refinement)
        .with_early_breaks(true, meet_improved_and_break);

    let result = create_search(config).solve();

    assert_result(&create_yard_instance(), &result);
}}

can_solve_with_different_modes! {
    case01_critical: (true, false, false),
    case02_random: (false, false, false),
    case03_refinement: (true, true, false),
    case04_random_refinement: (false, true, true),
    case05_improved_break: (true, false, true),
}

#[test]
fn can_solve_conflicting_instance_without_neighbors() {
    let instance = Arc::new(create_conflicting_instance());
    let oracle = CountingOracle::new(GreedyScheduleOracle::new(instance.clone()));
    let config = SearchConfig::default().with_shaking(1, 1, false);
    let search = DecomposedNeighborhoodSearch::new(instance.clone(), oracle, config, create_test_environment());

    let result = search.solve();

    let best = result.best.as_ref().unwrap();
    assert!(best.assignment.validate(instance.as_ref()).is_ok());
    assert_ne!(best.assignment.subblocks(0), best.assignment.subblocks(1));
    assert_eq!(result.explored, 0);
    assert_eq!(search.oracle().evaluations(), 2);
}

#[test]
fn can_write_progress_log() {
    let (logger, messages) = create_logger();
    let search = create_search(SearchConfig::default().with_shaking(1, 1, true))
        .with_telemetry(TelemetryMode::OnlyLogging { logger });

    search.solve();

    let messages = messages.lock().unwrap();
    assert!(messages.iter().any(|msg| msg.contains("round 0: constructed solution")));
    assert!(messages.iter().any(|msg| msg.contains("new best")));
    assert!(messages.iter().any(|msg| msg.contains("shake 1")));
    assert!(messages.last().is_some_and(|msg| msg.contains("search finished")));
}
