//! Error types for the simulation actor.

use thiserror::Error;

use crate::simulation::SimulationError;

/// Errors returned by [`SimulationClient`](crate::clients::SimulationClient).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationActorError {
    /// The requested run does not exist.
    #[error("Run not found: {0}")]
    NotFound(String),

    /// The run was created or executed and the simulation core refused.
    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    /// The actor answered with a result that does not belong to the request.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for SimulationActorError {
    fn from(msg: String) -> Self {
        SimulationActorError::ActorCommunicationError(msg)
    }
}
