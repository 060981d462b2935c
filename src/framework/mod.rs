//! Generic actor framework for hosting resources.
//!
//! - [`ActorEntity`] - Trait that hosted resources implement
//! - [`ResourceActor`] - Generic actor that owns a store of entities
//! - [`ResourceClient`] - Type-safe handle for sending requests
//! - [`FrameworkError`] - Transport level errors
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning a full actor.

pub mod core;
pub mod mock;

pub use self::core::*;
