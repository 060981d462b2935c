//! Error types for the simulation core.

use thiserror::Error;

use crate::model::{ActorId, ConfigError};

/// Conditions that abort a run. A failed run yields no records.
///
/// Number collisions are not listed: the allocator resamples them internally and only reports
/// [`SimulationError::NumberSpaceExhausted`] once its retry bound is spent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// A phonebook was queried for someone who is not the owner's friend.
    #[error("actor {owner} has no phonebook entry for actor {friend}")]
    MissingEntry { owner: ActorId, friend: ActorId },

    /// A caller was drawn whose friend set is empty.
    #[error("actor {actor} has no friends to call")]
    EmptyFriendSet { actor: ActorId },

    /// The run has no actors to draw a caller from.
    #[error("population is empty")]
    EmptyPopulation,

    /// An actor id outside the population was referenced.
    #[error("unknown actor {0}")]
    UnknownActor(ActorId),

    /// Fresh-number sampling kept colliding with already issued numbers.
    #[error("no unused number found after {attempts} attempts")]
    NumberSpaceExhausted { attempts: u32 },

    /// A tick or epoch boundary was requested after the last configured epoch.
    #[error("schedule of {epoch_count} epochs is already complete")]
    ScheduleComplete { epoch_count: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
