use serde::{Deserialize, Serialize};

/// Index of an actor within a population. Ids are dense: `0..population_size`.
pub type ActorId = usize;

/// A member of the simulated population.
///
/// Actors are created once when a run starts and never change afterwards.
/// Display names are not unique; everything downstream keys on [`Actor::id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub display_name: String,
}

impl Actor {
    /// Creates a new Actor instance.
    ///
    /// # Arguments
    /// * `id` - Position in the population
    /// * `display_name` - Human readable name, possibly shared with other actors
    pub fn new(id: ActorId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}
