//! A json representation of the yard template problem.

#![allow(missing_docs)]

#[cfg(test)]
#[path = "../../../tests/unit/extensions/solve/instance_test.rs"]
mod instance_test;

use serde::Deserialize;
use std::collections::HashMap;
use std::io::{BufReader, Read};
use yard_core::models::{CostWeights, Instance, InstanceBuilder, Interval, Path, VesselPeriod};
use yard_core::utils::{Float, GenericResult};

/// A yard template problem definition.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonInstance {
    /// A size of the cyclic horizon in time steps.
    pub horizon: usize,
    /// Amount of containers one subblock can store.
    pub subblock_capacity: usize,
    /// Objective weights, all equal to one when omitted.
    pub weights: Option<JsonWeights>,
    /// Vessels with their periods.
    pub vessels: Vec<JsonVessel>,
    /// Subblocks, referred by index.
    pub subblocks: Vec<JsonSubblock>,
    /// Roads, referred by index.
    pub roads: Vec<JsonRoad>,
    /// Routing between vessel berths and subblocks.
    pub routes: Vec<JsonRoute>,
    /// Transshipment flows.
    pub flows: Vec<JsonFlow>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct JsonWeights {
    pub route: Option<Float>,
    pub time: Option<Float>,
    pub congestion: Option<Float>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct JsonVessel {
    pub name: String,
    pub periods: Vec<JsonPeriod>,
}

/// A vessel period. Feasible window defaults to the visit window, expected window defaults to
/// the feasible one.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonPeriod {
    pub name: String,
    pub visit: JsonInterval,
    pub feasible: Option<JsonInterval>,
    pub expected: Option<JsonInterval>,
    pub earliness_cost: Option<Float>,
    pub tardiness_cost: Option<Float>,
}

#[derive(Clone, Copy, Deserialize, Debug)]
pub struct JsonInterval {
    pub start: usize,
    pub length: usize,
}

#[derive(Clone, Deserialize, Debug)]
pub struct JsonSubblock {
    pub block: usize,
    pub lane: usize,
}

#[derive(Clone, Deserialize, Debug)]
pub struct JsonRoad {
    pub limit: usize,
}

/// A route of a vessel berth to a subblock. Outbound path is the same as inbound when omitted.
#[derive(Clone, Deserialize, Debug)]
pub struct JsonRoute {
    pub vessel: String,
    pub subblock: usize,
    pub inbound: JsonPath,
    pub outbound: Option<JsonPath>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct JsonPath {
    pub distance: Float,
    #[serde(default)]
    pub roads: Vec<usize>,
}

/// A flow between two vessel periods referred by their names.
#[derive(Clone, Deserialize, Debug)]
pub struct JsonFlow {
    pub source: String,
    pub destination: String,
    pub quantity: usize,
}

impl From<&JsonPath> for Path {
    fn from(path: &JsonPath) -> Self {
        Path::new(path.distance, path.roads.clone())
    }
}

/// Reads and validates an instance from json.
pub fn read_instance<R: Read>(reader: BufReader<R>) -> GenericResult<Instance> {
    let instance: JsonInstance =
        serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize instance: '{err}'"))?;

    create_instance(&instance)
}

/// Maps json instance to the core model.
pub fn create_instance(instance: &JsonInstance) -> GenericResult<Instance> {
    let vessel_ids = create_index(instance.vessels.iter().map(|vessel| vessel.name.as_str()), "vessel")?;
    let period_ids = create_index(
        instance.vessels.iter().flat_map(|vessel| vessel.periods.iter().map(|period| period.name.as_str())),
        "vessel period",
    )?;

    let builder = InstanceBuilder::new(instance.horizon, instance.subblock_capacity)
        .with_weights(create_weights(instance.weights.as_ref()));

    let builder = instance.vessels.iter().enumerate().fold(builder, |builder, (vessel_id, vessel)| {
        vessel.periods.iter().fold(builder.add_vessel(&vessel.name), |builder, period| {
            builder.add_period(create_period(vessel_id, period, instance.horizon))
        })
    });

    let builder =
        instance.subblocks.iter().fold(builder, |builder, subblock| builder.add_subblock(subblock.block, subblock.lane));
    let builder = instance.roads.iter().fold(builder, |builder, road| builder.add_road(road.limit));

    let builder = instance.routes.iter().try_fold(builder, |builder, route| {
        let vessel = get_id(&vessel_ids, &route.vessel, "vessel")?;
        let inbound = Path::from(&route.inbound);
        let outbound = route.outbound.as_ref().map_or_else(|| inbound.clone(), Path::from);

        GenericResult::Ok(builder.add_route(vessel, route.subblock, inbound, outbound))
    })?;

    let builder = instance.flows.iter().try_fold(builder, |builder, flow| {
        let source = get_id(&period_ids, &flow.source, "vessel period")?;
        let destination = get_id(&period_ids, &flow.destination, "vessel period")?;

        GenericResult::Ok(builder.add_flow(source, destination, flow.quantity))
    })?;

    builder.build()
}

fn create_weights(weights: Option<&JsonWeights>) -> CostWeights {
    let default = CostWeights::default();

    weights.map_or(default, |weights| CostWeights {
        route: weights.route.unwrap_or(default.route),
        time: weights.time.unwrap_or(default.time),
        congestion: weights.congestion.unwrap_or(default.congestion),
    })
}

fn create_period(vessel: usize, period: &JsonPeriod, horizon: usize) -> VesselPeriod {
    let to_interval = |interval: JsonInterval| Interval::new(interval.start % horizon.max(1), interval.length);

    let visit = to_interval(period.visit);
    let feasible = period.feasible.map_or(visit, to_interval);
    let expected = period.expected.map_or(feasible, to_interval);

    VesselPeriod::new(vessel, &period.name, visit)
        .with_windows(feasible, expected)
        .with_costs(period.earliness_cost.unwrap_or(0.), period.tardiness_cost.unwrap_or(0.))
}

fn create_index<'a>(names: impl Iterator<Item = &'a str>, description: &str) -> GenericResult<HashMap<String, usize>> {
    names.enumerate().try_fold(HashMap::new(), |mut index, (id, name)| {
        if index.insert(name.to_string(), id).is_some() {
            return Err(format!("duplicate {description} name: '{name}'").into());
        }

        Ok(index)
    })
}

fn get_id(index: &HashMap<String, usize>, name: &str, description: &str) -> GenericResult<usize> {
    index.get(name).copied().ok_or_else(|| format!("unknown {description}: '{name}'").into())
}
