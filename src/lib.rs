//! # CDR Synth
//!
//! Synthetic Call Detail Records for a closed population whose phone numbers change over
//! time. The output is test data for link-analysis and entity-resolution pipelines: who
//! called whom is known exactly, while the dialed numbers drift as actors change phones.
//!
//! ## How a run works
//!
//! 1. A population of actors is created, each with a display name.
//! 2. A symmetric friendship graph is drawn over the population.
//! 3. Every actor gets a globally unique number; every actor's phonebook is seeded with its
//!    friends' numbers.
//! 4. Each tick a random actor calls a random friend, dialing whatever its phonebook says,
//!    and then learns the friend's live number.
//! 5. At each epoch boundary a few actors switch numbers. Phonebooks are not told, so the
//!    next call to a switched actor dials the stale number.
//!
//! ## Module Tour
//!
//! ### 1. The Core ([`simulation`])
//! Synchronous and deterministic for a seed. [`Simulation`](simulation::Simulation) owns
//! the state of one run; [`run`](simulation::run) is the one-call entry point.
//!
//! ### 2. The Data ([`model`])
//! [`Actor`](model::Actor), [`Cdr`](model::Cdr) and [`SimulationConfig`](model::SimulationConfig).
//!
//! ### 3. The Engine ([`framework`])
//! The generic [`ResourceActor`](framework::ResourceActor) that hosts resources in a Tokio
//! task, plus its client and a mock for tests.
//!
//! ### 4. The Actor ([`simulation_actor`]) and its Interface ([`clients`])
//! Runs hosted as resources, driven through [`SimulationClient`](clients::SimulationClient).
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`CdrSystem`](lifecycle::CdrSystem) starts and stops the actor; tracing setup lives here.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run -- --seed 7 --epochs 3 > cdrs.csv
//! ```

pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod simulation;
pub mod simulation_actor;
