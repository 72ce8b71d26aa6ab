#[cfg(test)]
#[path = "../../tests/unit/solver/shake_test.rs"]
mod shake_test;

use crate::models::{Assignment, CostTable, Instance};
use crate::utils::{Float, Random, compare_floats};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// A bounded history of priority sequences, the oldest sequence is evicted first.
pub struct TabuList {
    capacity: usize,
    history: VecDeque<Vec<usize>>,
    counts: FxHashMap<Vec<usize>, usize>,
}

impl TabuList {
    /// Creates a new instance of `TabuList`.
    pub fn new(capacity: usize) -> Self {
        Self { capacity, history: VecDeque::with_capacity(capacity), counts: FxHashMap::default() }
    }

    /// Checks whether the sequence is in the history.
    pub fn contains(&self, priority: &[usize]) -> bool {
        self.counts.contains_key(priority)
    }

    /// Returns amount of remembered sequences.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns true if nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Remembers the sequence evicting the oldest one when full.
    pub fn push(&mut self, priority: Vec<usize>) {
        if self.capacity == 0 {
            return;
        }

        while self.history.len() >= self.capacity {
            if let Some(oldest) = self.history.pop_front() {
                if let Some(count) = self.counts.get_mut(&oldest) {
                    *count -= 1;
                    if *count == 0 {
                        self.counts.remove(&oldest);
                    }
                }
            }
        }

        *self.counts.entry(priority.clone()).or_insert(0) += 1;
        self.history.push_back(priority);
    }
}

/// A result of a shake.
#[derive(Clone, Debug)]
pub struct ShakeOutcome {
    /// A new priority sequence.
    pub priority: Vec<usize>,
    /// Amount of generated sequences.
    pub attempts: usize,
    /// True if every attempt hit the tabu history and a duplicate was accepted.
    pub is_duplicate: bool,
}

/// Parameters of a tabu guided critical shake.
#[derive(Clone, Copy, Debug)]
pub struct ShakeParams {
    /// Amount of the most expensive vessel periods moved together.
    pub critical_elements: usize,
    /// Specifies whether relative order of critical vessel periods is shuffled.
    pub shuffle_critical: bool,
    /// Maximum amount of attempts to find a sequence which is not in the tabu history.
    pub max_attempts: usize,
}

/// Returns criticality of every vessel period: a sum of its cost table entries over its assigned
/// subblocks normalized by its container count.
pub fn period_criticality(instance: &Instance, assignment: &Assignment, costs: &CostTable) -> Vec<Float> {
    (0..instance.period_count())
        .map(|period| match instance.period(period).total_load {
            0 => 0.,
            load => costs.sum_over(period, assignment.subblocks(period)) / load as Float,
        })
        .collect()
}

/// Perturbs the priority: the most critical vessel periods are removed, optionally shuffled, and
/// reinserted as a contiguous block at a uniformly random position. Sequences from the tabu history
/// are rejected until attempts are exhausted, then the last one is accepted as a duplicate.
/// The accepted sequence is added to the history.
pub fn tabu_critical_shake(
    priority: &[usize],
    criticality: &[Float],
    params: &ShakeParams,
    tabu: &mut TabuList,
    random: &dyn Random,
) -> ShakeOutcome {
    let critical = select_critical(priority, criticality, params.critical_elements);
    let max_attempts = params.max_attempts.max(1);

    let mut attempts = 0;
    let outcome = loop {
        attempts += 1;
        let candidate = reinsert_block(priority, &critical, params.shuffle_critical, random);

        if !tabu.contains(&candidate) {
            break ShakeOutcome { priority: candidate, attempts, is_duplicate: false };
        }

        if attempts >= max_attempts {
            break ShakeOutcome { priority: candidate, attempts, is_duplicate: true };
        }
    };

    tabu.push(outcome.priority.clone());

    outcome
}

/// Returns up to `amount` vessel periods with the highest criticality in their priority order.
fn select_critical(priority: &[usize], criticality: &[Float], amount: usize) -> Vec<usize> {
    let mut ranked = priority.to_vec();
    ranked.sort_by(|&a, &b| compare_floats(criticality[b], criticality[a]));
    ranked.truncate(amount);

    priority.iter().copied().filter(|period| ranked.contains(period)).collect()
}

fn reinsert_block(priority: &[usize], critical: &[usize], shuffle: bool, random: &dyn Random) -> Vec<usize> {
    if critical.is_empty() {
        return priority.to_vec();
    }

    let mut block = critical.to_vec();
    if shuffle {
        random.shuffle(block.as_mut_slice());
    }

    let mut rest = priority.iter().copied().filter(|period| !critical.contains(period)).collect::<Vec<_>>();
    let position = random.uniform_int(0, rest.len() as i32) as usize;
    rest.splice(position..position, block);

    rest
}
