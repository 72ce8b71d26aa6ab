#[cfg(test)]
#[path = "../../tests/unit/solver/attribution_test.rs"]
mod attribution_test;

use crate::models::{CostObservation, Instance, Solution};
use crate::scheduling::{CongestionGrid, DeviationProfile, deviation, operations};
use crate::utils::Float;

/// Decomposes the objective of a solved schedule into per (vessel period, subblock) costs.
///
/// Every operation is charged to the cell of the destination vessel period and subblock it serves:
/// * route: the operation transfer distance times its quantity;
/// * time: a pro-rata share of the handled vessel period deviation cost, proportional to the
///   operation's own earliness (tardiness) within the sum over all operations of that period;
/// * congestion: for every road cell used, `overflow * worst / (flow * total_overflow)` per container,
///   so an operation carrying `quantity` containers is charged `quantity` times that coefficient
///   rather than the coefficient once per operation.
///
/// Weighted shares sum up to the solution objective, but a cell value is a heuristic estimate and
/// not the true marginal cost of the cell.
pub fn estimate_costs(instance: &Instance, solution: &Solution) -> CostObservation {
    let weights = &instance.weights;
    let schedules = solution.schedules.as_slice();
    let mut observation = CostObservation::new(instance.period_count(), instance.subblock_count());

    solution.assignment.iter().for_each(|(period, subblocks)| {
        subblocks.iter().for_each(|&subblock| observation.touch(period, subblock));
    });

    schedules.iter().for_each(|schedule| {
        schedule.unloads.iter().for_each(|unload| {
            let distance = instance.transfer_distance(unload.source, schedule.period, schedule.subblock);
            observation.add(schedule.period, schedule.subblock, weights.route * distance * unload.quantity as Float);
        });
    });

    let profile = DeviationProfile::new(instance, schedules);
    let grid = CongestionGrid::from_schedules(instance, schedules);
    let total_overflow = grid.total_overflow() as Float;
    let worst_overflow = grid.worst_overflow() as Float;

    operations(instance, schedules).for_each(|operation| {
        let handler = operation.handler;
        let (earliness, tardiness) = deviation(instance, handler, operation.time);
        let (earliness_cost, tardiness_cost) = profile.period_costs(instance, handler);

        let time_cost = pro_rata(earliness, profile.total_earliness[handler], earliness_cost)
            + pro_rata(tardiness, profile.total_tardiness[handler], tardiness_cost);

        let congestion_cost = if total_overflow > 0. {
            operation
                .path
                .roads
                .iter()
                .map(|&road| {
                    match grid.overflow(road, operation.time) {
                        0 => 0.,
                        overflow => {
                            let flow = grid.flow(road, operation.time) as Float;
                            (overflow as Float * worst_overflow) / (flow * total_overflow)
                        }
                    }
                })
                .sum::<Float>()
                * operation.quantity as Float
        } else {
            0.
        };

        observation.add(
            operation.destination,
            operation.subblock,
            weights.time * time_cost + weights.congestion * congestion_cost,
        );
    });

    observation
}

fn pro_rata(magnitude: usize, total: usize, cost: Float) -> Float {
    if total == 0 {
        assert_eq!(magnitude, 0, "operation deviation is not counted in its period total");
        0.
    } else {
        cost * magnitude as Float / total as Float
    }
}
