use crate::models::Assignment;
use crate::utils::Float;
use std::fmt::{Display, Formatter};

/// Containers of one source vessel period unloaded into a subblock at given time.
#[derive(Clone, Debug, PartialEq)]
pub struct UnloadOperation {
    /// A source vessel period.
    pub source: usize,
    /// An unload time step.
    pub time: usize,
    /// Amount of containers.
    pub quantity: usize,
}

/// A schedule of one (vessel period, subblock) pair: containers unloaded into the subblock from
/// several sources, and a single load operation moving all of them onto the vessel period.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageSchedule {
    /// A destination vessel period.
    pub period: usize,
    /// A subblock.
    pub subblock: usize,
    /// A load time step.
    pub load_time: usize,
    /// Unload operations.
    pub unloads: Vec<UnloadOperation>,
}

impl StorageSchedule {
    /// Returns amount of containers stored in the subblock.
    pub fn quantity(&self) -> usize {
        self.unloads.iter().map(|unload| unload.quantity).sum()
    }
}

/// A weighted decomposition of the objective value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CostBreakdown {
    /// A weighted travel distance.
    pub route: Float,
    /// A weighted earliness and tardiness.
    pub time: Float,
    /// A weighted road overload.
    pub congestion: Float,
}

impl CostBreakdown {
    /// Returns the objective value.
    pub fn total(&self) -> Float {
        self.route + self.time + self.congestion
    }
}

impl Display for CostBreakdown {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} (route: {:.3}, time: {:.3}, congestion: {:.3})", self.total(), self.route, self.time, self.congestion)
    }
}

/// A detailed schedule produced by the subproblem oracle for an assignment.
#[derive(Clone, Debug)]
pub struct Solution {
    /// An assignment the schedule was built for.
    pub assignment: Assignment,
    /// Schedules of every assigned (vessel period, subblock) pair.
    pub schedules: Vec<StorageSchedule>,
    /// An objective decomposition.
    pub cost: CostBreakdown,
}

impl Solution {
    /// Returns the objective value.
    pub fn objective(&self) -> Float {
        self.cost.total()
    }
}
