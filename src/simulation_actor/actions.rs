//! Custom actions for the simulation actor.
//!
//! Runs are created through the generic `Create` request; everything that happens to a run
//! afterwards goes through one of these actions.

use serde::Serialize;

use crate::model::Cdr;
use crate::simulation::NumberRecord;

#[derive(Debug, Clone)]
pub enum SimulationAction {
    /// Runs the remaining schedule and returns every record of the run.
    ///
    /// The first call does the work; later calls return the same records.
    Generate,
    /// Looks up who was given a number, and when.
    Resolve(String),
    /// Reports the shape and progress of the run.
    Summary,
}

/// Results from SimulationActions - variants match 1:1 with SimulationAction
#[derive(Debug, Clone)]
pub enum SimulationActionResult {
    Generate(Vec<Cdr>),
    Resolve(Option<ResolvedNumber>),
    Summary(RunSummary),
}

/// A number traced back to its holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedNumber {
    pub record: NumberRecord,
    /// Holder name, suffixed with the epoch for numbers handed out by churn.
    pub identity_tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub actors: usize,
    pub friendships: usize,
    pub epoch: u32,
    pub records_emitted: u64,
    pub numbers_issued: usize,
    pub finished: bool,
}
