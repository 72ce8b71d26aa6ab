#[cfg(test)]
#[path = "../../tests/unit/solver/batch_test.rs"]
mod batch_test;

use crate::models::Instance;
use crate::solver::{DecomposedNeighborhoodSearch, SearchConfig, SearchResult, SubproblemOracle, TelemetryMode};
use crate::utils::{DefaultRandom, Environment, ThreadPool, get_cpus, parallel_into_collect};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// An independent search run.
#[derive(Clone, Debug)]
pub struct BatchJob {
    /// A unique job name used as a key of the results map.
    pub name: String,
    /// Search parameters.
    pub config: SearchConfig,
    /// A random seed, `None` means a seed from system entropy.
    pub seed: Option<u64>,
}

/// Runs independent searches on a bounded worker pool. Each worker owns its environment, oracle
/// and search state, only the quota and logger of the given environment are shared.
pub fn run_batch<O, F>(
    instance: Arc<Instance>,
    jobs: Vec<BatchJob>,
    parallelism: usize,
    environment: &Environment,
    telemetry_mode: TelemetryMode,
    oracle_factory: F,
) -> FxHashMap<String, SearchResult>
where
    O: SubproblemOracle,
    F: Fn(Arc<Instance>, &SearchConfig) -> O + Send + Sync,
{
    let pool = ThreadPool::new(parallelism);

    pool.execute(|| {
        parallel_into_collect(jobs, |job| {
            let random = match job.seed {
                Some(seed) => Arc::new(DefaultRandom::new_repeatable(seed)),
                None => Arc::new(DefaultRandom::default()),
            };
            let environment = Environment::new(random, environment.quota.clone(), environment.logger.clone());
            let telemetry_mode = match &telemetry_mode {
                TelemetryMode::None => TelemetryMode::None,
                TelemetryMode::OnlyLogging { logger } => {
                    let logger = logger.clone();
                    let name = job.name.clone();
                    TelemetryMode::OnlyLogging { logger: Arc::new(move |msg: &str| (logger)(&format!("{name}: {msg}"))) }
                }
            };

            let oracle = oracle_factory(instance.clone(), &job.config);
            let search = DecomposedNeighborhoodSearch::new(instance.clone(), oracle, job.config, environment)
                .with_telemetry(telemetry_mode);

            (job.name, search.solve())
        })
    })
    .into_iter()
    .collect()
}

/// Returns a worker pool size which keeps `solver_threads` threads per search busy.
pub fn default_parallelism(solver_threads: usize) -> usize {
    (get_cpus() / solver_threads.max(1)).max(1)
}
