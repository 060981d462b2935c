//! # System Lifecycle
//!
//! Starts the simulation actor, hands out its client and shuts everything down again.
//!
//! ```rust,ignore
//! let system = CdrSystem::new();
//! let run = system.simulation_client.create_run(SimulationCreate::default()).await?;
//! let records = system.simulation_client.generate(run).await?;
//! system.shutdown().await?;
//! ```
//!
//! Shutdown works by dropping the client: the actor's receiver returns `None`, the event
//! loop ends and the task completes. Any clone of the client still alive elsewhere keeps the
//! actor running, so callers drop their clones before awaiting [`CdrSystem::shutdown`].
//!
//! [`setup_tracing`] initializes logging for binaries; see the [`tracing`] module.

pub mod cdr_system;
pub mod tracing;

pub use self::cdr_system::*;
pub use self::tracing::*;
