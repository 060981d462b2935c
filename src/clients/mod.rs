//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod actor_client;
pub mod simulation_client;

pub use actor_client::*;
pub use simulation_client::*;
