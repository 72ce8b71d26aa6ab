use super::*;
use std::fs::File;

fn read_config_from_str(json: &str) -> GenericResult<Config> {
    read_config(BufReader::new(json.as_bytes()))
}

#[test]
fn can_read_full_config() {
    let file = File::open("../data/config/config.json").expect("cannot read config from file");

    let config = read_config(BufReader::new(file)).unwrap();

    let neighborhood = config.neighborhood.as_ref().expect("no neighborhood config");
    assert_eq!(neighborhood.neighbor_limit, Some(10));
    assert_eq!(neighborhood.critical_neighbors, Some(true));
    assert_eq!(neighborhood.max_explored_solutions, Some(50));
    assert_eq!(neighborhood.max_no_best_iterations, Some(5));
    assert_eq!(neighborhood.max_no_improved_iterations, Some(3));
    assert_eq!(neighborhood.meet_best_and_break, Some(true));
    assert_eq!(neighborhood.meet_improved_and_break, Some(false));

    let shaking = config.shaking.as_ref().expect("no shaking config");
    assert_eq!(shaking.times, Some(2));
    assert_eq!(shaking.critical_elements, Some(2));
    assert_eq!(shaking.shuffle_critical, Some(true));
    assert_eq!(shaking.max_tabu_size, Some(5));
    assert_eq!(shaking.max_attempts, Some(5));

    assert_eq!(config.construction.as_ref().and_then(|construction| construction.max_random_attempts), Some(4));
    assert!(config.refinement.as_ref().is_some_and(|refinement| refinement.enabled));
    assert_eq!(config.max_time(), Some(30.));
    assert_eq!(config.runs(), Some(2));
    assert_eq!(config.parallelism(), Some(2));
    assert!(!config.is_logging_enabled());
    assert_eq!(config.epsilon, Some(1E-6));
}

#[test]
fn can_create_search_config_from_full_config() {
    let file = File::open("../data/config/config.json").expect("cannot read config from file");
    let config = read_config(BufReader::new(file)).unwrap();

    let search = create_search_config(&config);

    assert_eq!(search.neighbor_limit, 10);
    assert_eq!(search.max_explored_solutions, 50);
    assert_eq!((search.max_no_best_iterations, search.max_no_improved_iterations), (5, 3));
    assert_eq!((search.meet_best_and_break, search.meet_improved_and_break), (true, false));
    assert_eq!((search.shaking_times, search.critical_elements, search.shuffle_critical), (2, 2, true));
    assert_eq!((search.max_tabu_size, search.max_shake_attempts), (5, 5));
    assert_eq!(search.max_heuristic_random_attempts, 4);
    assert!(search.local_refinement);
    assert!(search.critical_neighbors);
    assert_eq!(search.parallelism, 1);
    assert_eq!(search.time_limit, None);
}

#[test]
fn can_use_defaults_for_empty_config() {
    let config = read_config_from_str("{}").unwrap();

    let search = create_search_config(&config);
    let default = SearchConfig::default();

    assert_eq!(search.neighbor_limit, default.neighbor_limit);
    assert_eq!(search.max_explored_solutions, default.max_explored_solutions);
    assert_eq!(search.shaking_times, default.shaking_times);
    assert_eq!(search.max_tabu_size, default.max_tabu_size);
    assert_eq!(search.max_heuristic_random_attempts, default.max_heuristic_random_attempts);
    assert_eq!(search.local_refinement, default.local_refinement);
    assert_eq!(search.epsilon, default.epsilon);
    assert_eq!(config.runs(), None);
    assert_eq!(config.max_time(), None);
}

#[test]
fn can_override_only_specified_fields() {
    let config = read_config_from_str(r#"{ "shaking": { "times": 3 }, "telemetry": { "logging": { "enabled": true } } }"#)
        .unwrap();

    let search = create_search_config(&config);

    assert_eq!(search.shaking_times, 3);
    assert_eq!(search.critical_elements, SearchConfig::default().critical_elements);
    assert_eq!(search.max_shake_attempts, SearchConfig::default().max_shake_attempts);
    assert!(config.is_logging_enabled());
}

#[test]
fn can_return_error_on_invalid_config() {
    let err = read_config_from_str(r#"{ "neighborhood": 1 }"#).unwrap_err();

    assert!(err.to_string().starts_with("cannot deserialize config"));
}
