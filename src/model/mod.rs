//! Pure data structures shared by the simulation core and the actor layer.

pub mod actor;
pub mod cdr;
pub mod config;

pub use actor::*;
pub use cdr::*;
pub use config::*;
