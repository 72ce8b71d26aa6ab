//! Solver configuration.

#![allow(missing_docs)]

#[cfg(test)]
#[path = "../../../tests/unit/extensions/solve/config_test.rs"]
mod config_test;

use serde::Deserialize;
use std::io::{BufReader, Read};
use yard_core::solver::SearchConfig;
use yard_core::utils::{Float, GenericResult};

/// An algorithm configuration.
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Specifies neighborhood search configuration.
    pub neighborhood: Option<NeighborhoodConfig>,
    /// Specifies shake configuration.
    pub shaking: Option<ShakingConfig>,
    /// Specifies initial construction configuration.
    pub construction: Option<ConstructionConfig>,
    /// Specifies local refinement configuration.
    pub refinement: Option<RefinementConfig>,
    /// Specifies algorithm termination configuration.
    pub termination: Option<TerminationConfig>,
    /// Specifies how many independent searches are run.
    pub batch: Option<BatchConfig>,
    /// Specifies telemetry configuration.
    pub telemetry: Option<TelemetryConfig>,
    /// A tolerance used in cost comparisons.
    pub epsilon: Option<Float>,
}

/// A neighborhood search configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodConfig {
    /// Max amount of neighbors generated per iteration. Default is 20.
    pub neighbor_limit: Option<usize>,
    /// Use scored critical neighbors instead of random ones. Default is true.
    pub critical_neighbors: Option<bool>,
    /// Max amount of evaluated neighbors per phase. Default is 200.
    pub max_explored_solutions: Option<usize>,
    /// Max amount of iterations without a new best. Default is 10.
    pub max_no_best_iterations: Option<usize>,
    /// Max amount of iterations without an improvement. Default is 5.
    pub max_no_improved_iterations: Option<usize>,
    /// Stop the neighbor batch after a new best. Default is true.
    pub meet_best_and_break: Option<bool>,
    /// Stop the neighbor batch after an improvement. Default is false.
    pub meet_improved_and_break: Option<bool>,
}

/// A shake configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ShakingConfig {
    /// Amount of shakes. Default is 10.
    pub times: Option<usize>,
    /// Amount of critical vessel periods reinserted as a block at a random position. Default is 3.
    pub critical_elements: Option<usize>,
    /// Shuffle critical vessel periods. Default is true.
    pub shuffle_critical: Option<bool>,
    /// Tabu history capacity. Default is 10.
    pub max_tabu_size: Option<usize>,
    /// Max attempts to avoid a tabu sequence. Default is 10.
    pub max_attempts: Option<usize>,
}

/// An initial construction configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ConstructionConfig {
    /// Max amount of reshuffles of an infeasible construction. Default is 10.
    pub max_random_attempts: Option<usize>,
}

/// A local refinement configuration.
#[derive(Clone, Deserialize, Debug)]
pub struct RefinementConfig {
    /// Enables refinement after each neighborhood search phase.
    pub enabled: bool,
}

/// An algorithm termination configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TerminationConfig {
    /// Max time in seconds shared by all searches.
    pub max_time: Option<Float>,
}

/// A batch configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BatchConfig {
    /// Amount of independent searches. Default is 1.
    pub runs: Option<usize>,
    /// Worker pool size. Default depends on cpus and solver threads.
    pub parallelism: Option<usize>,
    /// Amount of threads one oracle is expected to use. Default is 1.
    pub solver_threads: Option<usize>,
}

/// A telemetry configuration.
#[derive(Clone, Deserialize, Debug)]
pub struct TelemetryConfig {
    /// Specifies logging configuration.
    pub logging: Option<LoggingConfig>,
}

/// A logging configuration.
#[derive(Clone, Deserialize, Debug)]
pub struct LoggingConfig {
    /// Specifies whether logging is enabled.
    pub enabled: bool,
}

impl Config {
    /// Returns max time from termination configuration.
    pub fn max_time(&self) -> Option<Float> {
        self.termination.as_ref().and_then(|termination| termination.max_time)
    }

    /// Returns amount of runs from batch configuration.
    pub fn runs(&self) -> Option<usize> {
        self.batch.as_ref().and_then(|batch| batch.runs)
    }

    /// Returns worker pool size from batch configuration.
    pub fn parallelism(&self) -> Option<usize> {
        self.batch.as_ref().and_then(|batch| batch.parallelism)
    }

    /// Returns true if logging is enabled.
    pub fn is_logging_enabled(&self) -> bool {
        self.telemetry.as_ref().and_then(|telemetry| telemetry.logging.as_ref()).is_some_and(|logging| logging.enabled)
    }
}

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> GenericResult<Config> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'").into())
}

/// Creates search parameters from config overlaying them on defaults.
pub fn create_search_config(config: &Config) -> SearchConfig {
    let search = SearchConfig::default();

    let search = configure_from_neighborhood(search, &config.neighborhood);
    let search = configure_from_shaking(search, &config.shaking);

    let mut search = search
        .with_max_heuristic_random_attempts(
            config
                .construction
                .as_ref()
                .and_then(|construction| construction.max_random_attempts)
                .unwrap_or(SearchConfig::default().max_heuristic_random_attempts),
        )
        .with_local_refinement(config.refinement.as_ref().is_some_and(|refinement| refinement.enabled))
        .with_parallelism(config.batch.as_ref().and_then(|batch| batch.solver_threads).unwrap_or(1));

    if let Some(epsilon) = config.epsilon {
        search.epsilon = epsilon;
    }

    search
}

fn configure_from_neighborhood(search: SearchConfig, config: &Option<NeighborhoodConfig>) -> SearchConfig {
    let Some(config) = config else { return search };

    let max_no_best = config.max_no_best_iterations.unwrap_or(search.max_no_best_iterations);
    let max_no_improved = config.max_no_improved_iterations.unwrap_or(search.max_no_improved_iterations);
    let meet_best = config.meet_best_and_break.unwrap_or(search.meet_best_and_break);
    let meet_improved = config.meet_improved_and_break.unwrap_or(search.meet_improved_and_break);
    let neighbor_limit = config.neighbor_limit.unwrap_or(search.neighbor_limit);
    let max_explored = config.max_explored_solutions.unwrap_or(search.max_explored_solutions);
    let critical_neighbors = config.critical_neighbors.unwrap_or(search.critical_neighbors);

    search
        .with_neighbor_limit(neighbor_limit)
        .with_max_explored_solutions(max_explored)
        .with_stall_limits(max_no_best, max_no_improved)
        .with_early_breaks(meet_best, meet_improved)
        .with_critical_neighbors(critical_neighbors)
}

fn configure_from_shaking(search: SearchConfig, config: &Option<ShakingConfig>) -> SearchConfig {
    let Some(config) = config else { return search };

    let times = config.times.unwrap_or(search.shaking_times);
    let critical_elements = config.critical_elements.unwrap_or(search.critical_elements);
    let shuffle_critical = config.shuffle_critical.unwrap_or(search.shuffle_critical);
    let max_tabu_size = config.max_tabu_size.unwrap_or(search.max_tabu_size);
    let max_attempts = config.max_attempts.unwrap_or(search.max_shake_attempts);

    search.with_shaking(times, critical_elements, shuffle_critical).with_tabu(max_tabu_size, max_attempts)
}
