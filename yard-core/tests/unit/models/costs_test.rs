use super::*;
use crate::helpers::models::*;
use crate::models::{InstanceBuilder, Interval, VesselPeriod};

fn create_observation(cells: &[(usize, usize, Float)]) -> CostObservation {
    let mut observation = CostObservation::new(2, 3);
    cells.iter().for_each(|&(period, subblock, cost)| observation.add(period, subblock, cost));

    observation
}

#[test]
fn can_seed_table_from_routes() {
    let instance = create_builder()
        .add_route(0, 0, create_path(1., vec![]), create_path(1., vec![]))
        .add_route(0, 1, create_path(3., vec![]), create_path(3., vec![]))
        .add_route(1, 0, create_path(2., vec![]), create_path(2., vec![]))
        .add_route(1, 1, create_path(4., vec![]), create_path(4., vec![]))
        .add_flow(0, 1, 15)
        .build()
        .unwrap();

    let table = CostTable::from_routes(&instance);

    // 15 containers, 2 subblocks required: inbound of v0 plus outbound of v1
    assert_eq!(table.get(1, 0), 15. * (1. + 2.) / 2.);
    assert_eq!(table.get(1, 1), 15. * (3. + 4.) / 2.);
    assert_eq!(table.row(0).to_vec(), vec![0., 0.]);
}

fn create_builder() -> InstanceBuilder {
    InstanceBuilder::new(10, 10)
        .add_vessel("v0")
        .add_vessel("v1")
        .add_period(VesselPeriod::new(0, "v0-0", Interval::new(0, 4)))
        .add_period(VesselPeriod::new(1, "v1-0", Interval::new(5, 4)))
        .add_subblock(0, 0)
        .add_subblock(0, 1)
}

#[test]
fn can_merge_min_without_increasing_entries() {
    let mut table = CostTable::new(2, 3, 10.);
    let before = table.clone();

    table.merge_min(&create_observation(&[(0, 0, 5.), (0, 1, 15.), (1, 2, 10.)]));

    assert_eq!(table.get(0, 0), 5.);
    assert_eq!(table.get(0, 1), 10.);
    assert_eq!(table.get(1, 2), 10.);
    assert!((0..2).all(|period| (0..3).all(|subblock| table.get(period, subblock) <= before.get(period, subblock))));
}

#[test]
fn can_average_observed_cells_only() {
    let mut table = CostTable::new(2, 3, 10.);

    table.average(&create_observation(&[(1, 1, 20.), (0, 2, 0.)]));

    assert_eq!(table.get(1, 1), 15.);
    assert_eq!(table.get(0, 2), 5.);
    assert_eq!(table.get(0, 0), 10.);
}

parameterized_test! {can_decay_towards_observation, (weight, expected), {
    let mut table = CostTable::new(2, 3, 10.);

    table.decay(&create_observation(&[(0, 0, 20.)]), weight);

    assert_eq!(table.get(0, 0), expected);
    assert_eq!(table.get(1, 0), 10.);
}}

can_decay_towards_observation! {
    case01_half: (0.5, 15.),
    case02_zero: (0., 10.),
    case03_full: (1., 20.),
    case04_clamped: (2., 20.),
}

#[test]
fn can_blend_tables() {
    let mut table = CostTable::new(1, 2, 10.);
    let mut other = CostTable::new(1, 2, 0.);
    other.set(0, 1, 30.);

    table.blend(&other);

    assert_eq!(table.row(0).to_vec(), vec![5., 20.]);
}

#[test]
fn can_sum_over_subblocks() {
    let mut table = CostTable::new(1, 3, 1.);
    table.set(0, 2, 5.);

    assert_eq!(table.sum_over(0, &[0, 2]), 6.);
    assert_eq!(table.periods(), 1);
    assert_eq!(table.subblocks(), 3);
}

#[test]
fn can_track_observed_cells() {
    let mut observation = CostObservation::new(2, 3);

    observation.touch(0, 1);
    observation.add(1, 2, 3.);
    observation.add(1, 2, 4.);
    observation.touch(1, 2);

    assert_eq!(observation.get(0, 1), Some(0.));
    assert_eq!(observation.get(1, 2), Some(7.));
    assert_eq!(observation.get(0, 0), None);
    assert_eq!(observation.iter().collect::<Vec<_>>(), vec![(0, 1, 0.), (1, 2, 7.)]);
    assert_eq!(observation.total(), 7.);
}
