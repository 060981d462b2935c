//! # Simulation Client
//!
//! High-level API for the simulation actor. Wraps a `ResourceClient<SimulationRun>` and turns
//! action results back into plain values.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::Cdr;
use crate::simulation_actor::{
    ResolvedNumber, RunId, RunSummary, SimulationAction, SimulationActionResult,
    SimulationActorError, SimulationCreate, SimulationRun,
};

/// Client for interacting with the simulation actor.
#[derive(Clone)]
pub struct SimulationClient {
    inner: ResourceClient<SimulationRun>,
}

impl SimulationClient {
    pub fn new(inner: ResourceClient<SimulationRun>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<SimulationRun> for SimulationClient {
    type Error = SimulationActorError;

    fn inner(&self) -> &ResourceClient<SimulationRun> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => SimulationActorError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<SimulationActorError>() {
                Ok(err) => *err,
                Err(other) => SimulationActorError::ActorCommunicationError(other.to_string()),
            },
            other => SimulationActorError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl SimulationClient {
    /// Creates a run. Validation and graph construction happen here; no records yet.
    #[instrument(skip(self, params), fields(seed = params.config.seed))]
    pub async fn create_run(&self, params: SimulationCreate) -> Result<RunId, SimulationActorError> {
        debug!(config = ?params.config, "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Generates (or returns the already generated) records of a run.
    #[instrument(skip(self))]
    pub async fn generate(&self, id: RunId) -> Result<Vec<Cdr>, SimulationActorError> {
        debug!("Sending request");
        match self.perform(id, SimulationAction::Generate).await? {
            SimulationActionResult::Generate(records) => Ok(records),
            other => Err(unexpected(&other)),
        }
    }

    /// Traces a number back to the actor and epoch it was issued to.
    #[instrument(skip(self))]
    pub async fn resolve_number(
        &self,
        id: RunId,
        number: String,
    ) -> Result<Option<ResolvedNumber>, SimulationActorError> {
        debug!("Sending request");
        match self.perform(id, SimulationAction::Resolve(number)).await? {
            SimulationActionResult::Resolve(resolved) => Ok(resolved),
            other => Err(unexpected(&other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn summary(&self, id: RunId) -> Result<RunSummary, SimulationActorError> {
        debug!("Sending request");
        match self.perform(id, SimulationAction::Summary).await? {
            SimulationActionResult::Summary(summary) => Ok(summary),
            other => Err(unexpected(&other)),
        }
    }

    async fn perform(
        &self,
        id: RunId,
        action: SimulationAction,
    ) -> Result<SimulationActionResult, SimulationActorError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: &SimulationActionResult) -> SimulationActorError {
    let kind = match result {
        SimulationActionResult::Generate(_) => "Generate",
        SimulationActionResult::Resolve(_) => "Resolve",
        SimulationActionResult::Summary(_) => "Summary",
    };
    SimulationActorError::UnexpectedResponse(kind.to_string())
}
