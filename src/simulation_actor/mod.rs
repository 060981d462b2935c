//! # Simulation Actor
//!
//! Hosts simulation runs as resources. Each run is created from a
//! [`SimulationConfig`](crate::model::SimulationConfig) and owns its own allocator,
//! phonebooks and RNG, so runs never leak state into one another.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`SimulationRun`]
//! - [`actions`] - [`SimulationAction`] and its results
//! - [`error`] - [`SimulationActorError`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::*;
pub use error::*;

use crate::clients::SimulationClient;
use crate::framework::ResourceActor;

/// Creates a new simulation actor and its client.
pub fn new() -> (ResourceActor<SimulationRun>, SimulationClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, SimulationClient::new(generic_client))
}
