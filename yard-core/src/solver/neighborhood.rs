#[cfg(test)]
#[path = "../../tests/unit/solver/neighborhood_test.rs"]
mod neighborhood_test;

use crate::models::{Assignment, CostTable, Instance};
use crate::solver::CapacityLimitedQueue;
use crate::utils::{Float, Random};
use std::sync::Arc;

/// An assignment mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Moves a vessel period from one subblock to another one.
    Relocate {
        /// A vessel period.
        period: usize,
        /// A currently used subblock.
        from: usize,
        /// A new subblock.
        to: usize,
    },
    /// Swaps all vessel periods of two subblocks.
    Swap {
        /// A first subblock.
        first: usize,
        /// A second subblock.
        second: usize,
    },
}

impl Move {
    /// Applies the move to a copy of the assignment.
    pub fn apply(&self, assignment: &Assignment) -> Assignment {
        let mut assignment = assignment.clone();
        match *self {
            Move::Relocate { period, from, to } => assignment.relocate(period, from, to),
            Move::Swap { first, second } => assignment.swap_subblocks(first, second),
        }

        assignment
    }
}

/// A candidate assignment with its estimated cost delta.
#[derive(Clone, Debug)]
pub struct Neighbor {
    /// A move which produced the candidate.
    pub mv: Move,
    /// An estimated cost delta, negative means improvement.
    pub delta: Float,
    /// A candidate assignment.
    pub assignment: Assignment,
}

/// Produces bounded sets of candidate assignments ranked by estimated cost delta.
pub struct NeighborhoodGenerator {
    instance: Arc<Instance>,
    limit: usize,
    epsilon: Float,
}

impl NeighborhoodGenerator {
    /// Creates a new instance of `NeighborhoodGenerator`.
    pub fn new(instance: Arc<Instance>, limit: usize, epsilon: Float) -> Self {
        Self { instance, limit, epsilon }
    }

    /// Generates up to `limit` most improving single relocations and batch swaps. Only moves with
    /// estimated delta below `-epsilon` are admitted. Neighbors are ordered from the most improving.
    pub fn generate(&self, assignment: &Assignment, costs: &CostTable) -> Vec<Neighbor> {
        let subblocks = self.instance.subblock_count();
        let occupancy = assignment.occupancy(subblocks);
        let mut queue = CapacityLimitedQueue::new(self.limit);

        for (period, current) in assignment.iter() {
            if current.is_empty() {
                continue;
            }

            let blocked = self.blocked_subblocks(assignment, &occupancy, period);

            for &from in current {
                for to in (0..subblocks).filter(|&to| !blocked[to]) {
                    let delta = costs.get(period, to) - costs.get(period, from);
                    if delta < -self.epsilon {
                        queue.push(Move::Relocate { period, from, to }, -delta, ());
                    }
                }
            }
        }

        for first in 0..subblocks {
            for second in (first + 1)..subblocks {
                if let Some(delta) = swap_delta(&occupancy, costs, first, second) {
                    if delta < -self.epsilon {
                        queue.push(Move::Swap { first, second }, -delta, ());
                    }
                }
            }
        }

        queue
            .into_sorted_vec()
            .into_iter()
            .map(|(mv, priority, _)| self.create_neighbor(assignment, mv, -priority))
            .collect()
    }

    /// Generates up to `limit` unscored random neighbors: relocations to adjacent subblocks are
    /// preferred, other feasible relocations and batch swaps are sampled uniformly.
    pub fn generate_random(&self, assignment: &Assignment, costs: &CostTable, random: &dyn Random) -> Vec<Neighbor> {
        let subblocks = self.instance.subblock_count();
        let occupancy = assignment.occupancy(subblocks);

        let mut adjacent = vec![];
        let mut distant = vec![];

        for (period, current) in assignment.iter() {
            if current.is_empty() {
                continue;
            }

            let blocked = self.blocked_subblocks(assignment, &occupancy, period);
            for &from in current {
                let neighbours = &self.instance.subblocks[from].neighbours;
                for to in (0..subblocks).filter(|&to| !blocked[to]) {
                    let mv = Move::Relocate { period, from, to };
                    if neighbours.contains(&to) {
                        adjacent.push(mv);
                    } else {
                        distant.push(mv);
                    }
                }
            }
        }

        for first in 0..subblocks {
            for second in (first + 1)..subblocks {
                if occupancy[first] != occupancy[second] {
                    distant.push(Move::Swap { first, second });
                }
            }
        }

        let moves = shuffled(adjacent, random).into_iter().chain(shuffled(distant, random)).take(self.limit);

        moves
            .map(|mv| {
                let delta = match mv {
                    Move::Relocate { period, from, to } => costs.get(period, to) - costs.get(period, from),
                    Move::Swap { first, second } => swap_delta(&occupancy, costs, first, second).unwrap_or(0.),
                };
                self.create_neighbor(assignment, mv, delta)
            })
            .collect()
    }

    /// Returns subblocks a vessel period cannot move to: already used ones and those used by a
    /// conflicting vessel period.
    fn blocked_subblocks(&self, assignment: &Assignment, occupancy: &[Vec<usize>], period: usize) -> Vec<bool> {
        let conflicts = self.instance.conflicts();

        occupancy
            .iter()
            .enumerate()
            .map(|(subblock, tenants)| {
                assignment.contains(period, subblock) || tenants.iter().any(|&tenant| conflicts.is_conflict(period, tenant))
            })
            .collect()
    }

    fn create_neighbor(&self, assignment: &Assignment, mv: Move, delta: Float) -> Neighbor {
        let candidate = mv.apply(assignment);

        if let Move::Swap { first, second } = mv {
            let preserved = assignment.iter().zip(candidate.iter()).all(|((_, old), (_, new))| old.len() == new.len());
            assert!(preserved, "swap of subblocks {first} and {second} changed a period subblock count");
        }

        Neighbor { mv, delta, assignment: candidate }
    }
}

/// Returns the estimated delta of swapping tenants of two subblocks, `None` if the swap changes nothing.
fn swap_delta(occupancy: &[Vec<usize>], costs: &CostTable, first: usize, second: usize) -> Option<Float> {
    let first_tenants = &occupancy[first];
    let second_tenants = &occupancy[second];

    let forward = first_tenants.iter().filter(|period| !second_tenants.contains(period)).collect::<Vec<_>>();
    let back = second_tenants.iter().filter(|period| !first_tenants.contains(period)).collect::<Vec<_>>();

    if forward.is_empty() && back.is_empty() {
        return None;
    }

    let forward = forward.into_iter().map(|&period| costs.get(period, second) - costs.get(period, first)).sum::<Float>();
    let back = back.into_iter().map(|&period| costs.get(period, first) - costs.get(period, second)).sum::<Float>();

    Some(forward + back)
}

fn shuffled(moves: Vec<Move>, random: &dyn Random) -> Vec<Move> {
    let mut order = (0..moves.len()).collect::<Vec<_>>();
    random.shuffle(order.as_mut_slice());

    order.into_iter().map(|idx| moves[idx]).collect()
}
