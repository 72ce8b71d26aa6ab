#[cfg(test)]
#[path = "../../tests/unit/models/assignment_test.rs"]
mod assignment_test;

use crate::models::Instance;
use crate::utils::GenericResult;

/// A yard template: a mapping from every vessel period to the set of subblocks storing its load.
/// Subblock sets are kept sorted by id, so two equal templates always compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Assignment {
    subblocks: Vec<Vec<usize>>,
}

impl Assignment {
    /// Creates an assignment with no subblocks for given amount of vessel periods.
    pub fn new_empty(periods: usize) -> Self {
        Self { subblocks: vec![vec![]; periods] }
    }

    /// Creates an assignment from raw subblock lists.
    pub fn from_lists(mut subblocks: Vec<Vec<usize>>) -> Self {
        subblocks.iter_mut().for_each(|list| list.sort_unstable());
        Self { subblocks }
    }

    /// Returns amount of vessel periods.
    pub fn periods(&self) -> usize {
        self.subblocks.len()
    }

    /// Returns subblocks assigned to the vessel period.
    pub fn subblocks(&self, period: usize) -> &[usize] {
        self.subblocks[period].as_slice()
    }

    /// Iterates over vessel periods with their subblocks.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.subblocks.iter().enumerate().map(|(period, list)| (period, list.as_slice()))
    }

    /// Checks whether subblock is assigned to the vessel period.
    pub fn contains(&self, period: usize, subblock: usize) -> bool {
        self.subblocks[period].binary_search(&subblock).is_ok()
    }

    /// Assigns the subblock to the vessel period. Returns false if it is already assigned.
    pub fn insert(&mut self, period: usize, subblock: usize) -> bool {
        match self.subblocks[period].binary_search(&subblock) {
            Ok(_) => false,
            Err(idx) => {
                self.subblocks[period].insert(idx, subblock);
                true
            }
        }
    }

    /// Moves the vessel period from one subblock to another.
    pub fn relocate(&mut self, period: usize, from: usize, to: usize) {
        let list = &mut self.subblocks[period];
        let idx = list.binary_search(&from).unwrap_or_else(|_| panic!("period {period} does not use subblock {from}"));
        list.remove(idx);

        assert!(self.insert(period, to), "period {period} already uses subblock {to}");
    }

    /// Swaps all tenants of two subblocks: those of `first` move to `second` and vice versa.
    /// Vessel periods which use both subblocks are not affected.
    pub fn swap_subblocks(&mut self, first: usize, second: usize) {
        for list in self.subblocks.iter_mut() {
            match (list.binary_search(&first), list.binary_search(&second)) {
                (Ok(_), Err(_)) | (Err(_), Ok(_)) => {
                    list.iter_mut().for_each(|subblock| {
                        if *subblock == first {
                            *subblock = second;
                        } else if *subblock == second {
                            *subblock = first;
                        }
                    });
                    list.sort_unstable();
                }
                _ => {}
            }
        }
    }

    /// Returns vessel periods which use the subblock.
    pub fn tenants(&self, subblock: usize) -> Vec<usize> {
        self.iter().filter(|(_, list)| list.binary_search(&subblock).is_ok()).map(|(period, _)| period).collect()
    }

    /// Returns tenants of every subblock.
    pub fn occupancy(&self, subblock_count: usize) -> Vec<Vec<usize>> {
        let mut occupancy = vec![vec![]; subblock_count];
        self.iter().for_each(|(period, list)| list.iter().for_each(|&subblock| occupancy[subblock].push(period)));

        occupancy
    }

    /// Validates capacity and conflict invariants against the instance.
    pub fn validate(&self, instance: &Instance) -> GenericResult<()> {
        if self.periods() != instance.period_count() {
            return Err(format!(
                "assignment has {} vessel periods, instance has {}",
                self.periods(),
                instance.period_count()
            )
            .into());
        }

        for (period, list) in self.iter() {
            if list.windows(2).any(|pair| pair[0] == pair[1]) {
                return Err(format!("period {period} has duplicate subblocks").into());
            }

            if let Some(subblock) = list.iter().find(|&&subblock| subblock >= instance.subblock_count()) {
                return Err(format!("period {period} uses unknown subblock {subblock}").into());
            }

            let required = instance.required_subblocks(period);
            if list.len() != required {
                return Err(format!("period {period} has {} subblocks, requires {required}", list.len()).into());
            }
        }

        let conflicts = instance.conflicts();
        for (subblock, tenants) in self.occupancy(instance.subblock_count()).iter().enumerate() {
            for (idx, &first) in tenants.iter().enumerate() {
                if let Some(&second) = tenants.iter().skip(idx + 1).find(|&&second| conflicts.is_conflict(first, second))
                {
                    return Err(
                        format!("conflicting periods {first} and {second} share subblock {subblock}").into()
                    );
                }
            }
        }

        Ok(())
    }
}
