use crate::models::CostTable;
use crate::utils::compare_floats;

/// Subblocks of every vessel period ranked by ascending cost, ties broken by subblock id.
#[derive(Clone, Debug)]
pub struct Preferences {
    ranked: Vec<Vec<usize>>,
}

impl Preferences {
    /// Identifies preferences from the cost table.
    pub fn identify(costs: &CostTable) -> Self {
        let ranked = (0..costs.periods())
            .map(|period| {
                let row = costs.row(period);
                let mut subblocks = (0..costs.subblocks()).collect::<Vec<_>>();
                // NOTE sort is stable, so equal costs keep the subblock id order
                subblocks.sort_by(|&a, &b| compare_floats(row[a], row[b]));

                subblocks
            })
            .collect();

        Self { ranked }
    }

    /// Returns subblocks of the vessel period from the most to the least preferred.
    pub fn ranked(&self, period: usize) -> &[usize] {
        self.ranked[period].as_slice()
    }
}
