#[cfg(test)]
#[path = "../../tests/unit/commands/solve_test.rs"]
mod solve_test;

use super::*;

use clap::{Arg, ArgAction, Command};
use std::io::BufReader;
use std::sync::Arc;
use yard_cli::extensions::solve::config::{Config, create_search_config, read_config};
use yard_cli::extensions::solve::instance::read_instance;
use yard_cli::extensions::solve::interruption::create_interruption_quota;
use yard_cli::extensions::solve::solution::write_result;
use yard_core::prelude::*;
use yard_core::solver::default_parallelism;

const INSTANCE_ARG_NAME: &str = "INSTANCE";
const CONFIG_ARG_NAME: &str = "config";
const TIME_ARG_NAME: &str = "max-time";
const RANDOM_SEED_NAME: &str = "seed";
const RUNS_ARG_NAME: &str = "runs";
const PARALLELISM_ARG_NAME: &str = "parallelism";
const OUT_RESULT_ARG_NAME: &str = "out-result";
const LOG_ARG_NAME: &str = "log";

pub fn get_solve_app() -> Command {
    Command::new("solve")
        .about("Solves the yard template problem")
        .arg(Arg::new(INSTANCE_ARG_NAME).help("Sets the instance file to use").required(true).index(1))
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Specifies path to algorithm configuration file")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .required(false)
                .num_args(1),
        )
        .arg(
            Arg::new(TIME_ARG_NAME)
                .help("Specifies max time all runs share in seconds")
                .short('t')
                .long(TIME_ARG_NAME)
                .required(false)
                .num_args(1),
        )
        .arg(
            Arg::new(RANDOM_SEED_NAME)
                .help("Specifies randomization seed to avoid stochastic behavior")
                .long(RANDOM_SEED_NAME)
                .required(false)
                .num_args(1),
        )
        .arg(
            Arg::new(RUNS_ARG_NAME)
                .help("Specifies amount of independent search runs")
                .short('r')
                .long(RUNS_ARG_NAME)
                .required(false)
                .num_args(1),
        )
        .arg(
            Arg::new(PARALLELISM_ARG_NAME)
                .help("Specifies amount of runs executed in parallel")
                .short('p')
                .long(PARALLELISM_ARG_NAME)
                .required(false)
                .num_args(1),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to file for result output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false)
                .num_args(1),
        )
        .arg(
            Arg::new(LOG_ARG_NAME)
                .help("Specifies whether default logging is enabled")
                .long(LOG_ARG_NAME)
                .required(false)
                .action(ArgAction::SetTrue),
        )
}

/// Runs solver commands.
pub fn run_solve(
    matches: &ArgMatches,
    out_writer_func: fn(Option<File>) -> BufWriter<Box<dyn Write>>,
) -> Result<(), String> {
    // required
    let instance_path = matches.get_one::<String>(INSTANCE_ARG_NAME).ok_or("instance path is not specified")?;
    let instance_file = open_file(instance_path, "instance");

    // optional
    let config = match matches.get_one::<String>(CONFIG_ARG_NAME) {
        Some(path) => read_config(BufReader::new(open_file(path, "config"))).map_err(|err| err.to_string())?,
        None => Config::default(),
    };
    let max_time = parse_float_value::<Float>(matches, TIME_ARG_NAME, "max time")?.or(config.max_time());
    let seed = parse_int_value::<u64>(matches, RANDOM_SEED_NAME, "seed")?;
    let runs = parse_int_value::<usize>(matches, RUNS_ARG_NAME, "runs")?.or(config.runs()).unwrap_or(1).max(1);
    let parallelism = parse_int_value::<usize>(matches, PARALLELISM_ARG_NAME, "parallelism")?.or(config.parallelism());
    let out_result = matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result"));
    let is_logging_enabled = matches.get_flag(LOG_ARG_NAME) || config.is_logging_enabled();

    let instance = read_instance(BufReader::new(instance_file))
        .map(Arc::new)
        .map_err(|err| format!("cannot read instance: '{err}'"))?;

    let search_config = create_search_config(&config);
    let parallelism = parallelism.unwrap_or_else(|| default_parallelism(search_config.parallelism)).max(1);

    let logger: InfoLogger =
        if is_logging_enabled { Arc::new(|msg: &str| println!("{msg}")) } else { Arc::new(|_: &str| ()) };
    let telemetry_mode = if is_logging_enabled {
        TelemetryMode::OnlyLogging { logger: logger.clone() }
    } else {
        TelemetryMode::None
    };
    let environment =
        Environment::new(Arc::new(DefaultRandom::default()), Some(create_interruption_quota(max_time)), logger);

    let jobs = create_jobs(&search_config, runs, seed);
    let results = run_batch(instance.clone(), jobs, parallelism, &environment, telemetry_mode, |instance, _| {
        GreedyScheduleOracle::new(instance)
    });

    let mut results = results.into_iter().collect::<Vec<_>>();
    results.sort_by(|(a, _), (b, _)| a.cmp(b));

    write_result(instance.as_ref(), results.as_slice(), out_writer_func(out_result)).map_err(|err| err.to_string())?;

    if results.iter().all(|(_, result)| result.best.is_none()) {
        return Err("cannot find any feasible yard template".to_string());
    }

    Ok(())
}

/// Creates independent runs, each run gets its own seed derived from the given one.
fn create_jobs(config: &SearchConfig, runs: usize, seed: Option<u64>) -> Vec<BatchJob> {
    let width = runs.to_string().len();

    (0..runs)
        .map(|run| BatchJob {
            name: format!("run-{run:0width$}"),
            config: config.clone(),
            seed: seed.map(|seed| seed.wrapping_add(run as u64)),
        })
        .collect()
}
