//! This module reimports commonly used types.

pub use crate::construction::{Preferences, YardTemplateHeuristic};

pub use crate::models::{
    Assignment, ConflictIndex, CostBreakdown, CostObservation, CostTable, CostWeights, Instance, InstanceBuilder,
    Interval, Solution,
};

pub use crate::scheduling::GreedyScheduleOracle;

pub use crate::solver::{
    BatchJob, DecomposedNeighborhoodSearch, SearchConfig, SearchResult, SubproblemOracle, TelemetryMode,
    run_batch,
};

pub use crate::utils::{
    DefaultRandom, Environment, Float, GenericError, GenericResult, InfoLogger, Quota, Random, TimeQuota,
    compare_floats,
};
