#[cfg(test)]
#[path = "../../tests/unit/models/interval_test.rs"]
mod interval_test;

use std::fmt::{Display, Formatter};

/// A closed-open time window `[start, start + length)` on a ring of size `horizon`.
/// The window wraps around the end of the horizon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Interval {
    start: usize,
    length: usize,
}

impl Interval {
    /// Creates a new instance of `Interval`.
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Returns the first time step of the interval, not normalized by horizon.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the amount of time steps covered by the interval.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns true if the interval covers no time step.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns absolute time steps of the interval in chronological order starting from its start.
    pub fn steps(&self, horizon: usize) -> impl Iterator<Item = usize> + use<> {
        let start = self.start % horizon.max(1);
        let length = self.length.min(horizon);

        (0..length).map(move |shift| (start + shift) % horizon)
    }

    /// Returns how many steps `time` lies after the start of the interval, measured on the ring.
    pub fn shifts_from_start(&self, time: usize, horizon: usize) -> usize {
        let start = self.start % horizon;
        let time = time % horizon;

        (time + horizon - start) % horizon
    }

    /// Checks whether given time step lies inside the interval.
    pub fn contains(&self, time: usize, horizon: usize) -> bool {
        self.shifts_from_start(time, horizon) < self.length.min(horizon)
    }

    /// Checks whether every step of `other` lies inside this interval.
    pub fn covers(&self, other: &Interval, horizon: usize) -> bool {
        other.steps(horizon).all(|time| self.contains(time, horizon))
    }

    /// Returns overlapping time steps of two intervals in the chronological order of `self`.
    /// The result can wrap around the horizon end.
    pub fn intersection(&self, other: &Interval, horizon: usize) -> Vec<usize> {
        self.steps(horizon).filter(|&time| other.contains(time, horizon)).collect()
    }

    /// Returns amount of overlapping time steps.
    pub fn intersection_len(&self, other: &Interval, horizon: usize) -> usize {
        self.steps(horizon).filter(|&time| other.contains(time, horizon)).count()
    }

    /// Checks whether two intervals share at least one time step in constant time.
    pub fn is_intersecting(&self, other: &Interval, horizon: usize) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        // on a ring, two arcs overlap iff one of them contains the start of another
        self.contains(other.start, horizon) || other.contains(self.start, horizon)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.start + self.length)
    }
}
