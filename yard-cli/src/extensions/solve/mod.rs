//! Contains functionality used by `solve` command.

pub mod config;
pub mod instance;
pub mod interruption;
pub mod solution;
