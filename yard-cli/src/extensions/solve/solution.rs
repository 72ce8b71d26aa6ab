//! A json representation of search results.

#![allow(missing_docs)]

#[cfg(test)]
#[path = "../../../tests/unit/extensions/solve/solution_test.rs"]
mod solution_test;

use serde::Serialize;
use std::io::{BufWriter, Write};
use yard_core::models::{CostBreakdown, Instance, Solution};
use yard_core::solver::SearchResult;
use yard_core::utils::{Float, GenericResult, compare_floats};

/// Results of all runs together with the name of the run which found the best solution.
#[derive(Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonResult {
    pub best_run: Option<String>,
    pub runs: Vec<JsonRun>,
}

#[derive(Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonRun {
    pub name: String,
    pub initial_objective: Option<Float>,
    pub improvement: Option<Float>,
    pub explored: usize,
    pub rounds: usize,
    pub skipped_rounds: usize,
    pub shakes: usize,
    pub elapsed_secs: Float,
    pub history: Vec<Float>,
    pub solution: Option<JsonSolution>,
}

#[derive(Clone, Serialize, Debug)]
pub struct JsonSolution {
    pub cost: JsonCost,
    pub assignment: Vec<JsonAssignment>,
    pub schedules: Vec<JsonSchedule>,
}

#[derive(Clone, Serialize, Debug)]
pub struct JsonCost {
    pub total: Float,
    pub route: Float,
    pub time: Float,
    pub congestion: Float,
}

#[derive(Clone, Serialize, Debug)]
pub struct JsonAssignment {
    pub period: String,
    pub subblocks: Vec<usize>,
}

#[derive(Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JsonSchedule {
    pub period: String,
    pub subblock: usize,
    pub load_time: usize,
    pub unloads: Vec<JsonUnload>,
}

#[derive(Clone, Serialize, Debug)]
pub struct JsonUnload {
    pub source: String,
    pub time: usize,
    pub quantity: usize,
}

impl From<&CostBreakdown> for JsonCost {
    fn from(cost: &CostBreakdown) -> Self {
        Self { total: cost.total(), route: cost.route, time: cost.time, congestion: cost.congestion }
    }
}

/// Creates json result from named search results, runs keep the given order.
pub fn create_result(instance: &Instance, results: &[(String, SearchResult)]) -> JsonResult {
    let best_run = results
        .iter()
        .filter_map(|(name, result)| result.best.as_ref().map(|best| (name, best.objective())))
        .min_by(|(_, a), (_, b)| compare_floats(*a, *b))
        .map(|(name, _)| name.clone());

    let runs = results
        .iter()
        .map(|(name, result)| JsonRun {
            name: name.clone(),
            initial_objective: result.initial.as_ref().map(|initial| initial.objective()),
            improvement: result.improvement_ratio(),
            explored: result.explored,
            rounds: result.rounds,
            skipped_rounds: result.skipped_rounds,
            shakes: result.shakes,
            elapsed_secs: result.elapsed_secs,
            history: result.history.clone(),
            solution: result.best.as_ref().map(|best| create_solution(instance, best)),
        })
        .collect();

    JsonResult { best_run, runs }
}

/// Writes search results as json.
pub fn write_result<W: Write>(
    instance: &Instance,
    results: &[(String, SearchResult)],
    writer: BufWriter<W>,
) -> GenericResult<()> {
    serde_json::to_writer_pretty(writer, &create_result(instance, results))
        .map_err(|err| format!("cannot write result: '{err}'").into())
}

fn create_solution(instance: &Instance, solution: &Solution) -> JsonSolution {
    let period_name = |period: usize| instance.period(period).name.clone();

    JsonSolution {
        cost: JsonCost::from(&solution.cost),
        assignment: solution
            .assignment
            .iter()
            .map(|(period, subblocks)| JsonAssignment { period: period_name(period), subblocks: subblocks.to_vec() })
            .collect(),
        schedules: solution
            .schedules
            .iter()
            .map(|schedule| JsonSchedule {
                period: period_name(schedule.period),
                subblock: schedule.subblock,
                load_time: schedule.load_time,
                unloads: schedule
                    .unloads
                    .iter()
                    .map(|unload| JsonUnload {
                        source: period_name(unload.source),
                        time: unload.time,
                        quantity: unload.quantity,
                    })
                    .collect(),
            })
            .collect(),
    }
}
