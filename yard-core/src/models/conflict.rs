#[cfg(test)]
#[path = "../../tests/unit/models/conflict_test.rs"]
mod conflict_test;

use crate::models::VesselPeriod;

/// A precomputed symmetric conflict relation: two vessel periods conflict iff they belong to
/// different vessels and their feasible windows intersect on the cyclic horizon.
#[derive(Clone, Debug)]
pub struct ConflictIndex {
    size: usize,
    matrix: Vec<bool>,
    lists: Vec<Vec<usize>>,
}

impl ConflictIndex {
    /// Computes conflicts of all vessel period pairs.
    pub fn new(periods: &[VesselPeriod], horizon: usize) -> Self {
        let size = periods.len();
        let mut matrix = vec![false; size * size];
        let mut lists = vec![vec![]; size];

        for (first, a) in periods.iter().enumerate() {
            for (second, b) in periods.iter().enumerate().skip(first + 1) {
                if a.vessel != b.vessel && a.feasible.is_intersecting(&b.feasible, horizon) {
                    matrix[first * size + second] = true;
                    matrix[second * size + first] = true;
                    lists[first].push(second);
                    lists[second].push(first);
                }
            }
        }

        Self { size, matrix, lists }
    }

    /// Checks whether two vessel periods conflict.
    pub fn is_conflict(&self, first: usize, second: usize) -> bool {
        self.matrix[first * self.size + second]
    }

    /// Returns all vessel periods which conflict with given one, in ascending id order.
    pub fn conflicts(&self, period: usize) -> &[usize] {
        self.lists[period].as_slice()
    }

    /// Returns total amount of conflicting pairs.
    pub fn pairs(&self) -> usize {
        self.lists.iter().map(|list| list.len()).sum::<usize>() / 2
    }
}
