//! Run configuration.
//!
//! [`SimulationConfig`] is plain data: it deserializes from JSON with every field optional and
//! is checked once by [`SimulationConfig::validate`] before a run is built. The core never
//! re-validates, it only reports the invariant violations it can observe while running.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the friendship relation is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphShape {
    /// Random degrees in `degree_range`, edges added reciprocally.
    #[default]
    Random,
    /// Actors `2k` and `2k + 1` are each other's only friend.
    Pairs,
}

/// Which number a caller dials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialMode {
    /// Dial what the caller's phonebook holds, then learn the live number.
    #[default]
    Phonebook,
    /// Always dial the callee's live number.
    Live,
}

/// Inclusive range of numeric values a phone number may take, rendered with a `+` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    pub low: u64,
    pub high: u64,
}

impl NumberRange {
    pub const fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    /// Number of distinct values in the range.
    pub fn capacity(&self) -> u64 {
        if self.high < self.low {
            0
        } else {
            self.high - self.low + 1
        }
    }
}

impl Default for NumberRange {
    fn default() -> Self {
        Self::new(3_160_000_000, 3_169_999_999)
    }
}

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub population_size: usize,
    /// Inclusive `(min, max)` bounds for the target degree of each actor.
    pub degree_range: (usize, usize),
    pub churn_per_epoch: usize,
    pub ticks_per_epoch: u64,
    pub epoch_count: u32,
    pub seed: u64,
    pub graph: GraphShape,
    pub dial_mode: DialMode,
    pub number_range: NumberRange,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            degree_range: (2, 4),
            churn_per_epoch: 2,
            ticks_per_epoch: 300,
            epoch_count: 10,
            seed: 42,
            graph: GraphShape::Random,
            dial_mode: DialMode::Phonebook,
            number_range: NumberRange::default(),
        }
    }
}

/// Configuration contract violations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("population must hold at least 2 actors, got {0}")]
    PopulationTooSmall(usize),

    #[error("degree_min must be at least 1")]
    ZeroMinDegree,

    #[error("degree range is inverted: min {min} > max {max}")]
    InvertedDegreeRange { min: usize, max: usize },

    #[error("degree_max {max} exceeds population_size - 2 ({limit})")]
    DegreeTooLarge { max: usize, limit: usize },

    #[error("pair graphs need an even population, got {0}")]
    OddPairPopulation(usize),

    #[error("number range holds {capacity} numbers, a full run may issue {required}")]
    NumberRangeTooSmall { capacity: u64, required: u64 },
}

impl SimulationConfig {
    /// Upper bound on the numbers a full run issues: one per actor plus one per churn draw.
    pub fn max_numbers_issued(&self) -> u64 {
        let churned = (self.churn_per_epoch as u64).saturating_mul(u64::from(self.epoch_count));
        (self.population_size as u64).saturating_add(churned)
    }

    /// Total number of records a successful run emits.
    pub fn total_records(&self) -> u64 {
        u64::from(self.epoch_count) * self.ticks_per_epoch
    }

    /// Checks the contract the graph builder and generator rely on.
    ///
    /// Zero ticks per epoch and zero epochs are both accepted and yield an empty stream.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.population_size;
        if n < 2 {
            return Err(ConfigError::PopulationTooSmall(n));
        }
        match self.graph {
            GraphShape::Random => {
                let (min, max) = self.degree_range;
                if min == 0 {
                    return Err(ConfigError::ZeroMinDegree);
                }
                if min > max {
                    return Err(ConfigError::InvertedDegreeRange { min, max });
                }
                // Rejection sampling needs a free candidate left for every actor.
                if max > n - 2 {
                    return Err(ConfigError::DegreeTooLarge { max, limit: n - 2 });
                }
            }
            GraphShape::Pairs => {
                if n % 2 != 0 {
                    return Err(ConfigError::OddPairPopulation(n));
                }
            }
        }
        let capacity = self.number_range.capacity();
        let required = self.max_numbers_issued();
        if capacity < required {
            return Err(ConfigError::NumberRangeTooSmall { capacity, required });
        }
        Ok(())
    }
}
