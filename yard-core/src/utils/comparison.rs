#[cfg(test)]
#[path = "../../tests/unit/utils/comparison_test.rs"]
mod comparison_test;

use crate::utils::Float;
use std::cmp::Ordering;

/// Compares floating point numbers, NaN is considered as the greatest value.
#[inline]
pub fn compare_floats(a: Float, b: Float) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => match (a.is_nan(), b.is_nan()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        },
    }
}

/// Returns true if `a` is strictly less than `b` by more than `epsilon`.
#[inline]
pub fn is_less_by(a: Float, b: Float, epsilon: Float) -> bool {
    a < b - epsilon
}

/// A float wrapper with total order which can be used as a key in ordered collections.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrdFloat(pub Float);

impl PartialEq for OrdFloat {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrdFloat {}

impl PartialOrd for OrdFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_floats(self.0, other.0)
    }
}
