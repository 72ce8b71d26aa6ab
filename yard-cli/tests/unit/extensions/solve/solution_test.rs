use super::*;
use std::fs::File;
use std::io::BufReader;
use yard_core::models::{Assignment, StorageSchedule, UnloadOperation};

fn create_test_instance() -> Instance {
    let file = File::open("../data/instances/small.json").expect("cannot read instance from file");

    crate::extensions::solve::instance::read_instance(BufReader::new(file)).unwrap()
}

fn create_test_result(route: Float) -> SearchResult {
    let solution = |route: Float| Solution {
        assignment: Assignment::from_lists(vec![vec![0], vec![1, 2], vec![3, 4], vec![5], vec![0], vec![1]]),
        schedules: vec![StorageSchedule {
            period: 2,
            subblock: 3,
            load_time: 6,
            unloads: vec![UnloadOperation { source: 0, time: 1, quantity: 12 }],
        }],
        cost: CostBreakdown { route, time: 2., congestion: 1. },
    };

    SearchResult {
        best: Some(solution(route)),
        initial: Some(solution(route + 7.)),
        history: vec![route + 7., route],
        explored: 10,
        rounds: 2,
        skipped_rounds: 0,
        shakes: 1,
        elapsed_secs: 0.5,
    }
}

#[test]
fn can_create_result_with_best_run() {
    let instance = create_test_instance();
    let results = vec![
        ("run-0".to_string(), create_test_result(10.)),
        ("run-1".to_string(), create_test_result(8.)),
        ("run-2".to_string(), SearchResult::default()),
    ];

    let result = create_result(&instance, results.as_slice());

    assert_eq!(result.best_run, Some("run-1".to_string()));
    assert_eq!(result.runs.len(), 3);
    assert!(result.runs[2].solution.is_none());
    assert_eq!(result.runs[2].initial_objective, None);

    let run = &result.runs[1];
    assert_eq!(run.initial_objective, Some(18.));
    assert_eq!(run.history, vec![15., 8.]);
    let solution = run.solution.as_ref().expect("no solution");
    assert_eq!(solution.cost.total, 11.);
    assert_eq!(solution.assignment[1].period, "v0-1");
    assert_eq!(solution.assignment[1].subblocks, vec![1, 2]);
    assert_eq!(solution.schedules[0].period, "v1-0");
    assert_eq!(solution.schedules[0].unloads[0].source, "v0-0");
}

#[test]
fn can_have_no_best_run_when_nothing_found() {
    let instance = create_test_instance();
    let results = vec![("run-0".to_string(), SearchResult::default())];

    let result = create_result(&instance, results.as_slice());

    assert!(result.best_run.is_none());
}

#[test]
fn can_write_result_as_json() {
    let instance = create_test_instance();
    let results = vec![("run-0".to_string(), create_test_result(10.))];
    let mut buffer = Vec::new();

    write_result(&instance, results.as_slice(), BufWriter::new(&mut buffer)).unwrap();

    let value: serde_json::Value = serde_json::from_slice(buffer.as_slice()).unwrap();
    assert_eq!(value["bestRun"], "run-0");
    assert_eq!(value["runs"][0]["skippedRounds"], 0);
    assert_eq!(value["runs"][0]["solution"]["schedules"][0]["loadTime"], 6);
    assert_eq!(value["runs"][0]["solution"]["cost"]["route"], 10.);
}
