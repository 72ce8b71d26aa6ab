#[cfg(test)]
#[path = "../../tests/unit/scheduling/evaluation_test.rs"]
mod evaluation_test;

use crate::models::{CostBreakdown, Instance, Path, StorageSchedule};
use crate::utils::{Float, GenericResult};

/// Specifies whether containers are moved from a vessel into the yard or vice versa.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationKind {
    /// Containers are moved from the yard onto the destination vessel.
    Load,
    /// Containers are moved from the source vessel into the yard.
    Unload,
}

/// A single truck operation derived from a storage schedule.
#[derive(Clone, Copy, Debug)]
pub struct Operation<'a> {
    /// An operation kind.
    pub kind: OperationKind,
    /// A vessel period whose vessel is handled: the destination for load, the source for unload.
    pub handler: usize,
    /// A destination vessel period of the stored containers.
    pub destination: usize,
    /// A subblock.
    pub subblock: usize,
    /// A time step.
    pub time: usize,
    /// Amount of containers moved.
    pub quantity: usize,
    /// A path driven between the berth and the subblock.
    pub path: &'a Path,
}

/// Enumerates all operations of given schedules.
pub fn operations<'a>(instance: &'a Instance, schedules: &'a [StorageSchedule]) -> impl Iterator<Item = Operation<'a>> + 'a {
    schedules.iter().flat_map(move |schedule| {
        let destination = schedule.period;
        let subblock = schedule.subblock;

        let load = Operation {
            kind: OperationKind::Load,
            handler: destination,
            destination,
            subblock,
            time: schedule.load_time,
            quantity: schedule.quantity(),
            path: &instance.route(instance.period(destination).vessel, subblock).outbound,
        };

        let unloads = schedule.unloads.iter().map(move |unload| Operation {
            kind: OperationKind::Unload,
            handler: unload.source,
            destination,
            subblock,
            time: unload.time,
            quantity: unload.quantity,
            path: &instance.route(instance.period(unload.source).vessel, subblock).inbound,
        });

        std::iter::once(load).chain(unloads)
    })
}

/// Returns earliness and tardiness of an operation of the vessel period at given time.
pub fn deviation(instance: &Instance, period: usize, time: usize) -> (usize, usize) {
    let horizon = instance.horizon;
    let period = instance.period(period);

    let offset = period.feasible.shifts_from_start(time, horizon);
    let expected_start = period.feasible.shifts_from_start(period.expected.start(), horizon);
    let expected_last = expected_start + period.expected.length().saturating_sub(1);

    (expected_start.saturating_sub(offset), offset.saturating_sub(expected_last))
}

/// Returns the unweighted deviation cost of an operation of the vessel period at given time.
pub fn deviation_cost(instance: &Instance, period: usize, time: usize) -> Float {
    let (earliness, tardiness) = deviation(instance, period, time);
    let period = instance.period(period);

    period.earliness_cost * earliness as Float + period.tardiness_cost * tardiness as Float
}

/// Worst deviations of every vessel period over its operations.
#[derive(Clone, Debug)]
pub struct DeviationProfile {
    /// The largest earliness per vessel period.
    pub earliness: Vec<usize>,
    /// The largest tardiness per vessel period.
    pub tardiness: Vec<usize>,
    /// A sum of operation earliness per vessel period.
    pub total_earliness: Vec<usize>,
    /// A sum of operation tardiness per vessel period.
    pub total_tardiness: Vec<usize>,
}

impl DeviationProfile {
    /// Collects deviations of all operations.
    pub fn new(instance: &Instance, schedules: &[StorageSchedule]) -> Self {
        let size = instance.period_count();
        let mut profile =
            Self { earliness: vec![0; size], tardiness: vec![0; size], total_earliness: vec![0; size], total_tardiness: vec![0; size] };

        operations(instance, schedules).for_each(|operation| {
            let (earliness, tardiness) = deviation(instance, operation.handler, operation.time);
            let handler = operation.handler;

            profile.earliness[handler] = profile.earliness[handler].max(earliness);
            profile.tardiness[handler] = profile.tardiness[handler].max(tardiness);
            profile.total_earliness[handler] += earliness;
            profile.total_tardiness[handler] += tardiness;
        });

        profile
    }

    /// Returns unweighted earliness and tardiness cost of the vessel period.
    pub fn period_costs(&self, instance: &Instance, period: usize) -> (Float, Float) {
        let data = instance.period(period);

        (data.earliness_cost * self.earliness[period] as Float, data.tardiness_cost * self.tardiness[period] as Float)
    }
}

/// Container flows per (road, time step) cell.
#[derive(Clone, Debug)]
pub struct CongestionGrid {
    horizon: usize,
    limits: Vec<usize>,
    flows: Vec<usize>,
}

impl CongestionGrid {
    /// Creates an empty grid.
    pub fn new(instance: &Instance) -> Self {
        Self {
            horizon: instance.horizon,
            limits: instance.roads.iter().map(|road| road.limit).collect(),
            flows: vec![0; instance.roads.len() * instance.horizon],
        }
    }

    /// Creates a grid filled with all operations of given schedules.
    pub fn from_schedules(instance: &Instance, schedules: &[StorageSchedule]) -> Self {
        let mut grid = Self::new(instance);
        operations(instance, schedules).for_each(|operation| grid.add(&operation.path.roads, operation.time, operation.quantity));

        grid
    }

    /// Adds flow on given roads at given time.
    pub fn add(&mut self, roads: &[usize], time: usize, quantity: usize) {
        roads.iter().for_each(|&road| {
            let idx = self.index(road, time);
            self.flows[idx] += quantity;
        });
    }

    /// Removes flow from given roads at given time.
    pub fn remove(&mut self, roads: &[usize], time: usize, quantity: usize) {
        roads.iter().for_each(|&road| {
            let idx = self.index(road, time);
            self.flows[idx] = self.flows[idx].saturating_sub(quantity);
        });
    }

    /// Returns flow of the cell.
    pub fn flow(&self, road: usize, time: usize) -> usize {
        self.flows[self.index(road, time)]
    }

    /// Returns overflow of the cell.
    pub fn overflow(&self, road: usize, time: usize) -> usize {
        self.flow(road, time).saturating_sub(self.limits[road])
    }

    /// Returns a sum of overflows of all cells.
    pub fn total_overflow(&self) -> usize {
        self.cells().map(|(road, time)| self.overflow(road, time)).sum()
    }

    /// Returns the largest overflow over all cells.
    pub fn worst_overflow(&self) -> usize {
        self.cells().map(|(road, time)| self.overflow(road, time)).max().unwrap_or(0)
    }

    /// Returns how much the total overflow grows if given flow is added.
    pub fn marginal_overflow(&self, roads: &[usize], time: usize, quantity: usize) -> usize {
        roads
            .iter()
            .map(|&road| {
                let flow = self.flow(road, time);
                let limit = self.limits[road];
                (flow + quantity).saturating_sub(limit) - flow.saturating_sub(limit)
            })
            .sum()
    }

    fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.limits.len()).flat_map(move |road| (0..self.horizon).map(move |time| (road, time)))
    }

    fn index(&self, road: usize, time: usize) -> usize {
        road * self.horizon + time % self.horizon
    }
}

/// Evaluates the exact weighted objective decomposition of given schedules.
pub fn evaluate_schedules(instance: &Instance, schedules: &[StorageSchedule]) -> CostBreakdown {
    let weights = &instance.weights;

    let route = schedules
        .iter()
        .flat_map(|schedule| {
            schedule.unloads.iter().map(move |unload| {
                unload.quantity as Float * instance.transfer_distance(unload.source, schedule.period, schedule.subblock)
            })
        })
        .sum::<Float>();

    let profile = DeviationProfile::new(instance, schedules);
    let time = (0..instance.period_count())
        .map(|period| {
            let (earliness, tardiness) = profile.period_costs(instance, period);
            earliness + tardiness
        })
        .sum::<Float>();

    let congestion = CongestionGrid::from_schedules(instance, schedules).worst_overflow() as Float;

    CostBreakdown { route: weights.route * route, time: weights.time * time, congestion: weights.congestion * congestion }
}

/// Checks that schedules respect time windows and store exactly the incoming flows of every
/// assigned vessel period.
pub fn validate_schedules(instance: &Instance, schedules: &[StorageSchedule]) -> GenericResult<()> {
    let horizon = instance.horizon;
    let mut stored = vec![vec![0_usize; instance.period_count()]; instance.period_count()];

    for schedule in schedules {
        if schedule.quantity() > instance.subblock_capacity {
            return Err(format!("subblock {} exceeds its capacity", schedule.subblock).into());
        }

        for operation in operations(instance, std::slice::from_ref(schedule)) {
            if operation.time >= horizon || !instance.period(operation.handler).feasible.contains(operation.time, horizon) {
                return Err(format!(
                    "operation of period {} at time {} is outside of its feasible window",
                    operation.handler, operation.time
                )
                .into());
            }
        }

        schedule.unloads.iter().for_each(|unload| stored[schedule.period][unload.source] += unload.quantity);
    }

    let mut expected = vec![vec![0_usize; instance.period_count()]; instance.period_count()];
    instance.flows.iter().for_each(|flow| expected[flow.destination][flow.source] += flow.quantity);

    for (destination, (stored, expected)) in stored.iter().zip(expected.iter()).enumerate() {
        if let Some(source) = (0..instance.period_count()).find(|&source| stored[source] != expected[source]) {
            return Err(format!(
                "flow {source} -> {destination} stores {} containers instead of {}",
                stored[source], expected[source]
            )
            .into());
        }
    }

    Ok(())
}
