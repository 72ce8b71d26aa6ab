//! The scheduling module evaluates detailed schedules and provides a reference implementation of
//! the subproblem oracle.

mod evaluation;
pub use self::evaluation::*;

mod greedy;
pub use self::greedy::GreedyScheduleOracle;
