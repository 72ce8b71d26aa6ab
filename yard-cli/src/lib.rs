//! A command line interface library of the yard template solver: json adapters for instances,
//! configs and results, and an interruption aware quota.

#![warn(missing_docs)]

pub mod extensions;
