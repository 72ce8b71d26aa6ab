#[cfg(test)]
#[path = "../../tests/unit/construction/template_test.rs"]
mod template_test;

use crate::construction::Preferences;
use crate::models::{Assignment, CostTable, Instance};
use std::sync::Arc;

/// A priority and preference driven greedy constructor of yard templates.
///
/// Vessel periods are served in priority order, each one as many times as it needs subblocks.
/// Every time the cheapest subblock which is not banned for the vessel period is taken; taking a
/// subblock bans it for the period itself and for all periods conflicting with it. The result
/// depends only on the priority order and the cost table.
pub struct YardTemplateHeuristic {
    instance: Arc<Instance>,
}

impl YardTemplateHeuristic {
    /// Creates a new instance of `YardTemplateHeuristic`.
    pub fn new(instance: Arc<Instance>) -> Self {
        Self { instance }
    }

    /// Builds an assignment or returns `None` when some vessel period runs out of allowed subblocks.
    pub fn assign(&self, priority: &[usize], costs: &CostTable) -> Option<Assignment> {
        let instance = self.instance.as_ref();
        let periods = instance.period_count();
        let subblocks = instance.subblock_count();

        assert_eq!(priority.len(), periods, "priority must contain every vessel period");

        let preferences = Preferences::identify(costs);
        let conflicts = instance.conflicts();

        let mut banned = vec![false; periods * subblocks];
        let mut assignment = Assignment::new_empty(periods);

        for period in self.allocation_sequence(priority) {
            let subblock =
                preferences.ranked(period).iter().copied().find(|&subblock| !banned[period * subblocks + subblock])?;

            assignment.insert(period, subblock);
            banned[period * subblocks + subblock] = true;
            conflicts.conflicts(period).iter().for_each(|&other| banned[other * subblocks + subblock] = true);
        }

        Some(assignment)
    }

    /// Expands priority into an allocation sequence where every vessel period is repeated as many
    /// times as it needs subblocks.
    pub fn allocation_sequence(&self, priority: &[usize]) -> Vec<usize> {
        priority
            .iter()
            .flat_map(|&period| std::iter::repeat_n(period, self.instance.required_subblocks(period)))
            .collect()
    }
}
