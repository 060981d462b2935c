//! ActorEntity implementation for [`SimulationRun`].

use std::fmt;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::framework::ActorEntity;
use crate::model::{Cdr, SimulationConfig};
use crate::simulation::{FixedNames, NameSource, RandomNames, Simulation};

use super::actions::{ResolvedNumber, RunSummary, SimulationAction, SimulationActionResult};
use super::error::SimulationActorError;

/// Identifier of a run inside the simulation actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub u64);

impl From<u64> for RunId {
    fn from(value: u64) -> Self {
        RunId(value)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run_{}", self.0)
    }
}

/// Payload for creating a run.
#[derive(Debug, Clone, Default)]
pub struct SimulationCreate {
    pub config: SimulationConfig,
    /// Display names to use, cycled in order. `None` draws names seeded from `config.seed`.
    pub names: Option<Vec<String>>,
}

/// One isolated simulation hosted by the actor, together with its output once generated.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub id: RunId,
    simulation: Simulation,
    records: Option<Vec<Cdr>>,
}

impl SimulationRun {
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Records of the run, if it has been generated.
    pub fn records(&self) -> Option<&[Cdr]> {
        self.records.as_deref()
    }

    fn summary(&self) -> RunSummary {
        let sim = &self.simulation;
        RunSummary {
            actors: sim.population().len(),
            friendships: sim.friendships().edge_count(),
            epoch: sim.epoch(),
            records_emitted: sim.records_emitted(),
            numbers_issued: sim.numbers().issued_count(),
            finished: sim.is_finished(),
        }
    }
}

#[async_trait]
impl ActorEntity for SimulationRun {
    type Id = RunId;
    type Create = SimulationCreate;
    type Action = SimulationAction;
    type ActionResult = SimulationActionResult;
    type Context = ();
    type Error = SimulationActorError;

    /// Builds a fresh simulation: new allocator, new phonebooks, nothing shared.
    fn from_create_params(id: RunId, params: SimulationCreate) -> Result<Self, SimulationActorError> {
        let mut names: Box<dyn NameSource> = match params.names {
            Some(list) => Box::new(FixedNames::new(list)),
            None => Box::new(RandomNames::new(params.config.seed)),
        };
        let simulation = Simulation::new(params.config, names.as_mut())?;
        Ok(Self {
            id,
            simulation,
            records: None,
        })
    }

    async fn handle_action(
        &mut self,
        action: SimulationAction,
        _ctx: &(),
    ) -> Result<SimulationActionResult, SimulationActorError> {
        match action {
            SimulationAction::Generate => {
                if let Some(records) = &self.records {
                    debug!(run = %self.id, "Returning cached records");
                    return Ok(SimulationActionResult::Generate(records.clone()));
                }
                let records = self.simulation.generate().inspect_err(|e| {
                    warn!(run = %self.id, error = %e, "Generation failed");
                })?;
                self.records = Some(records.clone());
                Ok(SimulationActionResult::Generate(records))
            }
            SimulationAction::Resolve(number) => {
                let numbers = self.simulation.numbers();
                let resolved = numbers.resolve(&number).and_then(|record| {
                    let identity_tag = numbers.identity_tag(&number, self.simulation.population())?;
                    Some(ResolvedNumber {
                        record: record.clone(),
                        identity_tag,
                    })
                });
                Ok(SimulationActionResult::Resolve(resolved))
            }
            SimulationAction::Summary => Ok(SimulationActionResult::Summary(self.summary())),
        }
    }
}
