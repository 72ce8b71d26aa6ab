#[cfg(test)]
#[path = "../../tests/unit/scheduling/greedy_test.rs"]
mod greedy_test;

use crate::models::{Assignment, Instance, Solution, StorageSchedule, UnloadOperation};
use crate::scheduling::{CongestionGrid, deviation_cost, evaluate_schedules};
use crate::solver::SubproblemOracle;
use crate::utils::{Float, Timer, compare_floats};
use std::sync::Arc;
use std::time::Duration;

const IMPROVEMENT_TOLERANCE: Float = 1e-9;

/// A reference subproblem oracle which builds schedules greedily.
///
/// Incoming flows of every destination vessel period are split over its subblocks by the cheapest
/// transfer distance, then every unload and load operation is timed inside the feasible window of
/// the handled vessel period by the smallest deviation cost plus marginal road overflow.
pub struct GreedyScheduleOracle {
    instance: Arc<Instance>,
}

impl GreedyScheduleOracle {
    /// Creates a new instance of `GreedyScheduleOracle`.
    pub fn new(instance: Arc<Instance>) -> Self {
        Self { instance }
    }

    fn allocate(&self, assignment: &Assignment) -> Option<Vec<StorageSchedule>> {
        let instance = self.instance.as_ref();
        let capacity = instance.subblock_capacity;
        let mut schedules = Vec::new();

        if assignment.periods() != instance.period_count() {
            return None;
        }

        for (period, subblocks) in assignment.iter() {
            if subblocks.len() != instance.required_subblocks(period) {
                return None;
            }

            let load_time = instance.period(period).expected.start() % instance.horizon;
            let mut remaining = vec![capacity; subblocks.len()];
            let mut storages = subblocks
                .iter()
                .map(|&subblock| StorageSchedule { period, subblock, load_time, unloads: vec![] })
                .collect::<Vec<_>>();

            let mut flows = instance.incoming_flows(period).collect::<Vec<_>>();
            flows.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.source.cmp(&b.source)));

            for flow in flows {
                let mut quantity = flow.quantity;
                while quantity > 0 {
                    let idx = (0..subblocks.len()).filter(|&idx| remaining[idx] > 0).min_by(|&a, &b| {
                        compare_floats(
                            instance.transfer_distance(flow.source, period, subblocks[a]),
                            instance.transfer_distance(flow.source, period, subblocks[b]),
                        )
                    })?;

                    let amount = quantity.min(remaining[idx]);
                    remaining[idx] -= amount;
                    quantity -= amount;

                    storages[idx].unloads.push(UnloadOperation { source: flow.source, time: 0, quantity: amount });
                }
            }

            schedules.extend(storages);
        }

        Some(schedules)
    }

    fn assign_times(&self, schedules: &mut [StorageSchedule]) {
        let instance = self.instance.as_ref();
        let mut grid = CongestionGrid::new(instance);

        for schedule in schedules.iter_mut() {
            let subblock = schedule.subblock;

            for unload in schedule.unloads.iter_mut() {
                let roads = &instance.route(instance.period(unload.source).vessel, subblock).inbound.roads;
                unload.time = self.best_time(&grid, unload.source, roads, unload.quantity);
                grid.add(roads, unload.time, unload.quantity);
            }

            let quantity = schedule.quantity();
            let roads = &instance.route(instance.period(schedule.period).vessel, subblock).outbound.roads;
            schedule.load_time = self.best_time(&grid, schedule.period, roads, quantity);
            grid.add(roads, schedule.load_time, quantity);
        }
    }

    fn best_time(&self, grid: &CongestionGrid, handler: usize, roads: &[usize], quantity: usize) -> usize {
        let instance = self.instance.as_ref();
        let weights = &instance.weights;
        let feasible = instance.period(handler).feasible;

        feasible
            .steps(instance.horizon)
            .map(|time| {
                let score = weights.time * deviation_cost(instance, handler, time)
                    + weights.congestion * grid.marginal_overflow(roads, time, quantity) as Float;
                (time, score)
            })
            .min_by(|(_, a), (_, b)| compare_floats(*a, *b))
            .map(|(time, _)| time)
            .unwrap_or(feasible.start() % instance.horizon)
    }

    fn create_solution(&self, assignment: Assignment, schedules: Vec<StorageSchedule>) -> Solution {
        let cost = evaluate_schedules(self.instance.as_ref(), schedules.as_slice());

        Solution { assignment, schedules, cost }
    }
}

impl SubproblemOracle for GreedyScheduleOracle {
    fn evaluate(&self, assignment: &Assignment, budget: Option<Duration>) -> Option<Solution> {
        if is_exhausted(budget) {
            return None;
        }

        let mut schedules = self.allocate(assignment)?;
        self.assign_times(schedules.as_mut_slice());

        Some(self.create_solution(assignment.clone(), schedules))
    }

    fn reoptimize_timing(&self, solution: &Solution, budget: Option<Duration>) -> Option<Solution> {
        if is_exhausted(budget) {
            return None;
        }

        let instance = self.instance.as_ref();
        let timer = Timer::start();
        let mut schedules = solution.schedules.clone();
        let mut best = evaluate_schedules(instance, schedules.as_slice()).total();

        'outer: for schedule_idx in 0..schedules.len() {
            // NOTE the last operation index addresses the load operation
            for operation_idx in 0..=schedules[schedule_idx].unloads.len() {
                if budget.is_some_and(|budget| timer.elapsed() >= budget) {
                    break 'outer;
                }

                let handler = schedules[schedule_idx]
                    .unloads
                    .get(operation_idx)
                    .map_or(schedules[schedule_idx].period, |unload| unload.source);
                let original = *operation_time(&mut schedules[schedule_idx], operation_idx);
                let mut best_time = original;

                for time in instance.period(handler).feasible.steps(instance.horizon).filter(|&time| time != original) {
                    *operation_time(&mut schedules[schedule_idx], operation_idx) = time;
                    let cost = evaluate_schedules(instance, schedules.as_slice()).total();

                    if cost < best - IMPROVEMENT_TOLERANCE {
                        best = cost;
                        best_time = time;
                    }
                }

                *operation_time(&mut schedules[schedule_idx], operation_idx) = best_time;
            }
        }

        Some(self.create_solution(solution.assignment.clone(), schedules))
    }

    fn reoptimize_assignment(&self, solution: &Solution, budget: Option<Duration>) -> Option<Solution> {
        if is_exhausted(budget) {
            return None;
        }

        let instance = self.instance.as_ref();
        let conflicts = instance.conflicts();
        let timer = Timer::start();
        let mut assignment = solution.assignment.clone();
        let mut schedules = solution.schedules.clone();
        let mut best = evaluate_schedules(instance, schedules.as_slice()).total();

        for schedule_idx in 0..schedules.len() {
            if budget.is_some_and(|budget| timer.elapsed() >= budget) {
                break;
            }

            let period = schedules[schedule_idx].period;
            let original = schedules[schedule_idx].subblock;
            let occupancy = assignment.occupancy(instance.subblock_count());
            let mut best_subblock = original;

            let candidates = (0..instance.subblock_count())
                .filter(|&subblock| !assignment.contains(period, subblock))
                .filter(|&subblock| occupancy[subblock].iter().all(|&tenant| !conflicts.is_conflict(period, tenant)))
                .collect::<Vec<_>>();

            for subblock in candidates {
                schedules[schedule_idx].subblock = subblock;
                let cost = evaluate_schedules(instance, schedules.as_slice()).total();

                if cost < best - IMPROVEMENT_TOLERANCE {
                    best = cost;
                    best_subblock = subblock;
                }
            }

            schedules[schedule_idx].subblock = best_subblock;
            if best_subblock != original {
                assignment.relocate(period, original, best_subblock);
            }
        }

        Some(self.create_solution(assignment, schedules))
    }
}

fn is_exhausted(budget: Option<Duration>) -> bool {
    budget.is_some_and(|budget| budget.is_zero())
}

fn operation_time(schedule: &mut StorageSchedule, operation_idx: usize) -> &mut usize {
    if operation_idx < schedule.unloads.len() {
        &mut schedule.unloads[operation_idx].time
    } else {
        &mut schedule.load_time
    }
}
