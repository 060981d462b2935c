//! The simulation core: identities, the social graph, number churn and phonebook staleness.
//!
//! Everything in here is synchronous and deterministic for a given seed. The pieces are
//! wired together by [`Simulation`], which owns all mutable state of a single run.
//!
//! - [`identity`] - population and name sources
//! - [`graph`] - friendship relation builders
//! - [`numbers`] - globally unique numbers and churn history
//! - [`phonebook`] - per-actor, possibly stale, views of friends' numbers
//! - [`generator`] - the tick loop that emits [`Cdr`](crate::model::Cdr)s

pub mod error;
pub mod generator;
pub mod graph;
pub mod identity;
pub mod numbers;
pub mod phonebook;

pub use error::*;
pub use generator::*;
pub use graph::*;
pub use identity::*;
pub use numbers::*;
pub use phonebook::*;
