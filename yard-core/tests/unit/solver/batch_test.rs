use super::*;
use crate::helpers::models::*;
use crate::helpers::solver::AlwaysInfeasibleOracle;
use crate::helpers::utils::create_test_environment;
use crate::scheduling::GreedyScheduleOracle;

fn create_job(name: &str, seed: u64) -> BatchJob {
    BatchJob { name: name.to_string(), config: SearchConfig::default().with_shaking(2, 2, true), seed: Some(seed) }
}

#[test]
fn can_run_independent_searches() {
    let instance = create_yard_instance_arc();
    let jobs = vec![create_job("first", 1), create_job("second", 2), create_job("third", 1)];

    let results = run_batch(instance.clone(), jobs, 2, &create_test_environment(), TelemetryMode::None, |instance, _| {
        GreedyScheduleOracle::new(instance)
    });

    assert_eq!(results.len(), 3);
    assert!(results.values().all(|result| {
        result.best.as_ref().is_some_and(|best| best.assignment.validate(instance.as_ref()).is_ok())
    }));
    assert_eq!(results["first"].history, results["third"].history);
}

#[test]
fn can_collect_results_without_solution() {
    let instance = create_yard_instance_arc();

    let results = run_batch(instance, vec![create_job("job", 0)], 1, &create_test_environment(), TelemetryMode::None, |_, _| {
        AlwaysInfeasibleOracle
    });

    assert!(results["job"].best.is_none());
}

#[test]
fn can_get_default_parallelism() {
    assert!(default_parallelism(0) >= 1);
    assert!(default_parallelism(1) >= 1);
    assert_eq!(default_parallelism(usize::MAX), 1);
}
