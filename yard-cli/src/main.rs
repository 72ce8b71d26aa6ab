//! A command line interface to the *yard template* solver.

mod commands;

use crate::commands::create_write_buffer;
use crate::commands::solve::{get_solve_app, run_solve};
use clap::Command;
use std::process;

fn main() {
    let matches = Command::new("Yard Template Solver")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A command line interface to the yard template solver")
        .subcommand(get_solve_app())
        .get_matches();

    let result = match matches.subcommand() {
        Some(("solve", solve_matches)) => run_solve(solve_matches, create_write_buffer),
        _ => Err("no subcommand was used. Use -h to print help information.".to_string()),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }
}
