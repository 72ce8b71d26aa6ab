//! A collection of models which describe the yard template problem and its solutions.

mod assignment;
pub use self::assignment::Assignment;

mod conflict;
pub use self::conflict::ConflictIndex;

mod costs;
pub use self::costs::{CostObservation, CostTable};

mod interval;
pub use self::interval::Interval;

mod problem;
pub use self::problem::*;

mod solution;
pub use self::solution::*;
