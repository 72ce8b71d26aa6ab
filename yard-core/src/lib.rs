//! Core crate contains the building blocks of a decomposed neighborhood search which allocates
//! yard ***subblocks*** to recurring ***vessel periods*** of a cyclic container terminal schedule.
//!
//! The search itself never solves the detailed scheduling problem: it delegates that to a
//! [`SubproblemOracle`](crate::solver::SubproblemOracle), and concentrates on exploring the
//! space of yard templates (assignments of subblocks to vessel periods).

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod construction;
pub mod models;
pub mod prelude;
pub mod scheduling;
pub mod solver;
pub mod utils;
