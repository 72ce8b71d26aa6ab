#[cfg(test)]
#[path = "../../tests/unit/models/costs_test.rs"]
mod costs_test;

use crate::models::Instance;
use crate::utils::Float;

/// Estimated marginal costs of storing a vessel period's load in a subblock. A dense table indexed
/// by (vessel period, subblock).
#[derive(Clone, Debug, PartialEq)]
pub struct CostTable {
    subblocks: usize,
    data: Vec<Float>,
}

impl CostTable {
    /// Creates a table filled with the same value.
    pub fn new(periods: usize, subblocks: usize, value: Float) -> Self {
        Self { subblocks, data: vec![value; periods * subblocks] }
    }

    /// Seeds a table with route costs: a cell estimates the weighted distance of serving every
    /// incoming flow of the vessel period through the subblock, spread over its required subblocks.
    pub fn from_routes(instance: &Instance) -> Self {
        let mut table = Self::new(instance.period_count(), instance.subblock_count(), 0.);

        for period in 0..instance.period_count() {
            let required = instance.required_subblocks(period);
            if required == 0 {
                continue;
            }

            for subblock in 0..instance.subblock_count() {
                let cost = instance
                    .incoming_flows(period)
                    .map(|flow| flow.quantity as Float * instance.transfer_distance(flow.source, period, subblock))
                    .sum::<Float>();

                table.set(period, subblock, instance.weights.route * cost / required as Float);
            }
        }

        table
    }

    /// Returns amount of vessel periods.
    pub fn periods(&self) -> usize {
        self.data.len().checked_div(self.subblocks).unwrap_or(0)
    }

    /// Returns amount of subblocks.
    pub fn subblocks(&self) -> usize {
        self.subblocks
    }

    /// Returns a cell value.
    pub fn get(&self, period: usize, subblock: usize) -> Float {
        self.data[period * self.subblocks + subblock]
    }

    /// Sets a cell value.
    pub fn set(&mut self, period: usize, subblock: usize, value: Float) {
        self.data[period * self.subblocks + subblock] = value;
    }

    /// Returns costs of the vessel period for all subblocks.
    pub fn row(&self, period: usize) -> &[Float] {
        &self.data[period * self.subblocks..(period + 1) * self.subblocks]
    }

    /// Returns a sum of the vessel period costs over given subblocks.
    pub fn sum_over(&self, period: usize, subblocks: &[usize]) -> Float {
        subblocks.iter().map(|&subblock| self.get(period, subblock)).sum()
    }

    /// Aggressive update: keeps the smallest of known and observed cost in every observed cell.
    pub fn merge_min(&mut self, observation: &CostObservation) {
        self.apply(observation, |known, observed| known.min(observed));
    }

    /// Averaging update: every observed cell becomes the mean of known and observed cost.
    pub fn average(&mut self, observation: &CostObservation) {
        self.apply(observation, |known, observed| (known + observed) / 2.);
    }

    /// Iterative decay update: observed cells move towards the observation by `weight`.
    pub fn decay(&mut self, observation: &CostObservation, weight: Float) {
        let weight = weight.clamp(0., 1.);
        self.apply(observation, |known, observed| known * (1. - weight) + observed * weight);
    }

    /// Blends another dense table into this one by averaging every cell.
    pub fn blend(&mut self, other: &CostTable) {
        assert_eq!(self.data.len(), other.data.len());
        self.data.iter_mut().zip(other.data.iter()).for_each(|(known, other)| *known = (*known + *other) / 2.);
    }

    fn apply<F: Fn(Float, Float) -> Float>(&mut self, observation: &CostObservation, update: F) {
        assert_eq!(self.subblocks, observation.subblocks);
        observation.iter().for_each(|(period, subblock, observed)| {
            let idx = period * self.subblocks + subblock;
            self.data[idx] = update(self.data[idx], observed);
        });
    }
}

/// Costs attributed to (vessel period, subblock) cells from one solved schedule. Only cells used by
/// the schedule are observed.
#[derive(Clone, Debug, PartialEq)]
pub struct CostObservation {
    subblocks: usize,
    data: Vec<Option<Float>>,
}

impl CostObservation {
    /// Creates an observation without observed cells.
    pub fn new(periods: usize, subblocks: usize) -> Self {
        Self { subblocks, data: vec![None; periods * subblocks] }
    }

    /// Marks the cell as observed with zero cost if it is not observed yet.
    pub fn touch(&mut self, period: usize, subblock: usize) {
        self.data[period * self.subblocks + subblock].get_or_insert(0.);
    }

    /// Adds cost to the cell.
    pub fn add(&mut self, period: usize, subblock: usize, cost: Float) {
        *self.data[period * self.subblocks + subblock].get_or_insert(0.) += cost;
    }

    /// Returns the cell cost if observed.
    pub fn get(&self, period: usize, subblock: usize) -> Option<Float> {
        self.data[period * self.subblocks + subblock]
    }

    /// Iterates over observed cells.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Float)> + '_ {
        self.data.iter().enumerate().filter_map(|(idx, cost)| cost.map(|cost| (idx / self.subblocks, idx % self.subblocks, cost)))
    }

    /// Returns a sum of all observed costs.
    pub fn total(&self) -> Float {
        self.data.iter().flatten().sum()
    }
}
