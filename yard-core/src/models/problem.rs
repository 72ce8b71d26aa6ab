#[cfg(test)]
#[path = "../../tests/unit/models/problem_test.rs"]
mod problem_test;

use crate::models::{ConflictIndex, Interval};
use crate::utils::{Float, GenericResult};

/// A vessel which calls on the terminal several times within the horizon.
#[derive(Clone, Debug)]
pub struct Vessel {
    /// A dense vessel id.
    pub id: usize,
    /// A vessel name used in logs and reports.
    pub name: String,
    /// Vessel periods which belong to the vessel.
    pub periods: Vec<usize>,
}

/// One recurring berth visit of a vessel within the cyclic horizon.
#[derive(Clone, Debug)]
pub struct VesselPeriod {
    /// A dense vessel period id.
    pub id: usize,
    /// An id of the vessel the period belongs to.
    pub vessel: usize,
    /// A period name used in logs and reports.
    pub name: String,
    /// A berth visit window.
    pub period: Interval,
    /// A window where load and unload operations are allowed.
    pub feasible: Interval,
    /// A window where operations cause no earliness or tardiness.
    pub expected: Interval,
    /// A cost of one time step of earliness.
    pub earliness_cost: Float,
    /// A cost of one time step of tardiness.
    pub tardiness_cost: Float,
    /// Total amount of containers to load onto the vessel during the period.
    pub total_load: usize,
}

impl VesselPeriod {
    /// Creates a new vessel period with the same visit, feasible and expected windows and zero costs.
    pub fn new(vessel: usize, name: &str, period: Interval) -> Self {
        Self {
            id: 0,
            vessel,
            name: name.to_string(),
            period,
            feasible: period,
            expected: period,
            earliness_cost: 0.,
            tardiness_cost: 0.,
            total_load: 0,
        }
    }

    /// Sets feasible and expected windows.
    pub fn with_windows(mut self, feasible: Interval, expected: Interval) -> Self {
        self.feasible = feasible;
        self.expected = expected;
        self
    }

    /// Sets earliness and tardiness unit costs.
    pub fn with_costs(mut self, earliness_cost: Float, tardiness_cost: Float) -> Self {
        self.earliness_cost = earliness_cost;
        self.tardiness_cost = tardiness_cost;
        self
    }
}

/// A yard storage cell.
#[derive(Clone, Debug)]
pub struct Subblock {
    /// A dense subblock id.
    pub id: usize,
    /// A yard block the subblock belongs to.
    pub block: usize,
    /// A lane inside the block.
    pub lane: usize,
    /// Adjacent subblocks: neighbour lanes of the same block and the same lane of neighbour blocks.
    pub neighbours: Vec<usize>,
}

/// A road segment with its flow limit per time step.
#[derive(Clone, Debug)]
pub struct Road {
    /// A dense road id.
    pub id: usize,
    /// Amount of containers which can pass the road in one time step without congestion.
    pub limit: usize,
}

/// A path driven by trucks between a berth and a subblock.
#[derive(Clone, Debug, Default)]
pub struct Path {
    /// A travel distance.
    pub distance: Float,
    /// Road segments traversed.
    pub roads: Vec<usize>,
}

impl Path {
    /// Creates a new instance of `Path`.
    pub fn new(distance: Float, roads: Vec<usize>) -> Self {
        Self { distance, roads }
    }
}

/// Routing between a vessel berth and a subblock.
#[derive(Clone, Debug, Default)]
pub struct Route {
    /// A path from the vessel berth to the subblock, used by unload operations.
    pub inbound: Path,
    /// A path from the subblock to the vessel berth, used by load operations.
    pub outbound: Path,
}

/// A transshipment flow: containers unloaded from the source vessel period are stored in the yard
/// and later loaded onto the destination vessel period.
#[derive(Clone, Debug)]
pub struct Flow {
    /// A source vessel period.
    pub source: usize,
    /// A destination vessel period.
    pub destination: usize,
    /// Amount of containers.
    pub quantity: usize,
}

/// Weights of objective components.
#[derive(Clone, Copy, Debug)]
pub struct CostWeights {
    /// A weight of travel distance.
    pub route: Float,
    /// A weight of earliness and tardiness.
    pub time: Float,
    /// A weight of road overload.
    pub congestion: Float,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self { route: 1., time: 1., congestion: 1. }
    }
}

/// Static problem data. Immutable after construction, the conflict relation is precomputed.
pub struct Instance {
    /// A size of the cyclic horizon.
    pub horizon: usize,
    /// Amount of containers one subblock can store.
    pub subblock_capacity: usize,
    /// Objective weights.
    pub weights: CostWeights,
    /// Vessels.
    pub vessels: Vec<Vessel>,
    /// Vessel periods.
    pub periods: Vec<VesselPeriod>,
    /// Subblocks.
    pub subblocks: Vec<Subblock>,
    /// Roads.
    pub roads: Vec<Road>,
    /// Transshipment flows.
    pub flows: Vec<Flow>,

    routes: Vec<Route>,
    incoming: Vec<Vec<usize>>,
    conflicts: ConflictIndex,
}

impl Instance {
    /// Returns a vessel period by its id.
    pub fn period(&self, period: usize) -> &VesselPeriod {
        &self.periods[period]
    }

    /// Returns amount of vessel periods.
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// Returns amount of subblocks.
    pub fn subblock_count(&self) -> usize {
        self.subblocks.len()
    }

    /// Returns amount of subblocks the vessel period needs to store its load.
    pub fn required_subblocks(&self, period: usize) -> usize {
        self.periods[period].total_load.div_ceil(self.subblock_capacity)
    }

    /// Returns routing between the berth of a vessel and a subblock.
    pub fn route(&self, vessel: usize, subblock: usize) -> &Route {
        &self.routes[vessel * self.subblocks.len() + subblock]
    }

    /// Returns a per container distance of moving containers from `source` to `destination` through `subblock`.
    pub fn transfer_distance(&self, source: usize, destination: usize, subblock: usize) -> Float {
        let source_vessel = self.periods[source].vessel;
        let destination_vessel = self.periods[destination].vessel;

        self.route(source_vessel, subblock).inbound.distance + self.route(destination_vessel, subblock).outbound.distance
    }

    /// Returns flows loaded onto given vessel period.
    pub fn incoming_flows(&self, period: usize) -> impl Iterator<Item = &Flow> + '_ {
        self.incoming[period].iter().map(move |&idx| &self.flows[idx])
    }

    /// Returns the precomputed conflict relation.
    pub fn conflicts(&self) -> &ConflictIndex {
        &self.conflicts
    }
}

/// Provides the way to build and validate an `Instance`.
pub struct InstanceBuilder {
    horizon: usize,
    subblock_capacity: usize,
    weights: CostWeights,
    vessels: Vec<String>,
    periods: Vec<VesselPeriod>,
    subblocks: Vec<(usize, usize)>,
    roads: Vec<usize>,
    routes: Vec<(usize, usize, Route)>,
    flows: Vec<Flow>,
}

impl InstanceBuilder {
    /// Creates a new builder for given horizon and subblock capacity.
    pub fn new(horizon: usize, subblock_capacity: usize) -> Self {
        Self {
            horizon,
            subblock_capacity,
            weights: CostWeights::default(),
            vessels: vec![],
            periods: vec![],
            subblocks: vec![],
            roads: vec![],
            routes: vec![],
            flows: vec![],
        }
    }

    /// Sets objective weights.
    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Adds a vessel, its id is the insertion index.
    pub fn add_vessel(mut self, name: &str) -> Self {
        self.vessels.push(name.to_string());
        self
    }

    /// Adds a vessel period, its id is the insertion index.
    pub fn add_period(mut self, period: VesselPeriod) -> Self {
        self.periods.push(period);
        self
    }

    /// Adds a subblock located at given block and lane, its id is the insertion index.
    pub fn add_subblock(mut self, block: usize, lane: usize) -> Self {
        self.subblocks.push((block, lane));
        self
    }

    /// Adds a road with given flow limit, its id is the insertion index.
    pub fn add_road(mut self, limit: usize) -> Self {
        self.roads.push(limit);
        self
    }

    /// Sets routing between a vessel berth and a subblock.
    pub fn add_route(mut self, vessel: usize, subblock: usize, inbound: Path, outbound: Path) -> Self {
        self.routes.push((vessel, subblock, Route { inbound, outbound }));
        self
    }

    /// Adds a transshipment flow.
    pub fn add_flow(mut self, source: usize, destination: usize, quantity: usize) -> Self {
        self.flows.push(Flow { source, destination, quantity });
        self
    }

    /// Validates the data and builds an instance.
    pub fn build(self) -> GenericResult<Instance> {
        if self.horizon == 0 {
            return Err("horizon must be positive".into());
        }

        if self.subblock_capacity == 0 {
            return Err("subblock capacity must be positive".into());
        }

        let horizon = self.horizon;
        let vessel_count = self.vessels.len();
        let subblock_count = self.subblocks.len();

        let mut vessels = self
            .vessels
            .into_iter()
            .enumerate()
            .map(|(id, name)| Vessel { id, name, periods: vec![] })
            .collect::<Vec<_>>();

        let mut periods = self.periods;
        for (id, period) in periods.iter_mut().enumerate() {
            period.id = id;
            period.total_load = 0;
            validate_period(period, vessel_count, horizon)?;
            vessels[period.vessel].periods.push(id);
        }

        for vessel in vessels.iter() {
            for (idx, &first) in vessel.periods.iter().enumerate() {
                for &second in vessel.periods.iter().skip(idx + 1) {
                    if periods[first].period.is_intersecting(&periods[second].period, horizon) {
                        return Err(format!(
                            "periods '{}' and '{}' of vessel '{}' overlap",
                            periods[first].name, periods[second].name, vessel.name
                        )
                        .into());
                    }
                }
            }
        }

        let mut incoming = vec![vec![]; periods.len()];
        for (idx, flow) in self.flows.iter().enumerate() {
            if flow.source >= periods.len() || flow.destination >= periods.len() {
                return Err(format!("flow {idx} refers to unknown vessel period").into());
            }

            if flow.source == flow.destination {
                return Err(format!("flow {idx} has the same source and destination").into());
            }

            if flow.quantity == 0 {
                return Err(format!("flow {idx} has zero quantity").into());
            }

            periods[flow.destination].total_load += flow.quantity;
            incoming[flow.destination].push(idx);
        }

        let roads = self.roads.into_iter().enumerate().map(|(id, limit)| Road { id, limit }).collect::<Vec<_>>();

        let mut routes: Vec<Option<Route>> = vec![None; vessel_count * subblock_count];
        for (vessel, subblock, route) in self.routes {
            if vessel >= vessel_count || subblock >= subblock_count {
                return Err(format!("route ({vessel}, {subblock}) refers to unknown vessel or subblock").into());
            }

            if let Some(road) =
                route.inbound.roads.iter().chain(route.outbound.roads.iter()).find(|&&road| road >= roads.len())
            {
                return Err(format!("route ({vessel}, {subblock}) refers to unknown road {road}").into());
            }

            routes[vessel * subblock_count + subblock] = Some(route);
        }

        let routes = routes
            .into_iter()
            .enumerate()
            .map(|(idx, route)| {
                route.ok_or_else(|| {
                    format!("no route between vessel {} and subblock {}", idx / subblock_count, idx % subblock_count)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let subblocks = create_subblocks(&self.subblocks);
        let conflicts = ConflictIndex::new(&periods, horizon);

        Ok(Instance {
            horizon,
            subblock_capacity: self.subblock_capacity,
            weights: self.weights,
            vessels,
            periods,
            subblocks,
            roads,
            flows: self.flows,
            routes,
            incoming,
            conflicts,
        })
    }
}

fn validate_period(period: &VesselPeriod, vessel_count: usize, horizon: usize) -> GenericResult<()> {
    if period.vessel >= vessel_count {
        return Err(format!("period '{}' refers to unknown vessel {}", period.name, period.vessel).into());
    }

    let windows = [&period.period, &period.feasible, &period.expected];
    if windows.iter().any(|window| window.is_empty() || window.length() > horizon) {
        return Err(format!("period '{}' has an empty window or a window longer than horizon", period.name).into());
    }

    if !period.feasible.covers(&period.expected, horizon) {
        return Err(format!("expected window of period '{}' is not inside its feasible window", period.name).into());
    }

    if period.earliness_cost < 0. || period.tardiness_cost < 0. {
        return Err(format!("period '{}' has negative deviation cost", period.name).into());
    }

    Ok(())
}

fn create_subblocks(locations: &[(usize, usize)]) -> Vec<Subblock> {
    locations
        .iter()
        .enumerate()
        .map(|(id, &(block, lane))| {
            let neighbours = locations
                .iter()
                .enumerate()
                .filter(|&(other, &(other_block, other_lane))| {
                    other != id
                        && ((other_block == block && other_lane.abs_diff(lane) == 1)
                            || (other_lane == lane && other_block.abs_diff(block) == 1))
                })
                .map(|(other, _)| other)
                .collect();

            Subblock { id, block, lane, neighbours }
        })
        .collect()
}
