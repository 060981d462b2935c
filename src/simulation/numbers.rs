//! Number allocator.
//!
//! Every number ever handed out is kept in the history, keyed by the number itself, so a
//! retired number can never be issued again and any dialed number can be traced back to
//! "actor X as of epoch E". The current mapping is the only part that churn mutates.

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, trace};

use crate::model::{Actor, ActorId, NumberRange};

use super::error::SimulationError;

/// Fresh-number sampling gives up after this many consecutive collisions.
pub const MAX_ISSUE_ATTEMPTS: u32 = 1024;

/// One issuance: `number` was given to `holder_id` when `epoch` started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberRecord {
    pub number: String,
    pub holder_id: ActorId,
    pub epoch: u32,
}

/// Issues globally unique numbers and tracks who held what, and when.
///
/// One allocator belongs to exactly one run.
#[derive(Debug, Clone)]
pub struct NumberAllocator {
    range: NumberRange,
    issued: BTreeMap<String, NumberRecord>,
    current: BTreeMap<ActorId, String>,
    epoch: u32,
}

impl NumberAllocator {
    pub fn new(range: NumberRange) -> Self {
        Self {
            range,
            issued: BTreeMap::new(),
            current: BTreeMap::new(),
            epoch: 0,
        }
    }

    /// Epoch of the most recent issuance round. Initial numbers belong to epoch 0.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Gives every actor in `actor_ids` a fresh number and returns the current mapping.
    pub fn issue_initial<R: Rng + ?Sized>(
        &mut self,
        actor_ids: &[ActorId],
        rng: &mut R,
    ) -> Result<&BTreeMap<ActorId, String>, SimulationError> {
        for &actor in actor_ids {
            self.assign(actor, rng)?;
        }
        debug!(actors = actor_ids.len(), "Issued initial numbers");
        Ok(&self.current)
    }

    /// Draws `k` actors with replacement and gives each a new number.
    ///
    /// An actor drawn twice in the same call is reassigned once. Returns the reassigned ids.
    /// Every fresh number is drawn before anything is committed, so on error the allocator
    /// is left exactly as it was, epoch included.
    pub fn churn<R: Rng + ?Sized>(
        &mut self,
        k: usize,
        rng: &mut R,
    ) -> Result<BTreeSet<ActorId>, SimulationError> {
        let holders: Vec<ActorId> = self.current.keys().copied().collect();
        let mut reassigned = BTreeSet::new();
        for _ in 0..k {
            if let Some(&actor) = holders.choose(rng) {
                reassigned.insert(actor);
            }
        }

        let mut staged: BTreeMap<ActorId, String> = BTreeMap::new();
        let mut reserved = BTreeSet::new();
        for &actor in &reassigned {
            let number = self.fresh_number(rng, &reserved)?;
            reserved.insert(number.clone());
            staged.insert(actor, number);
        }

        self.epoch += 1;
        for (actor, number) in staged {
            self.commit(actor, number);
        }
        debug!(epoch = self.epoch, ?reassigned, "Churned numbers");
        Ok(reassigned)
    }

    /// Live number of `actor`.
    pub fn current_number(&self, actor: ActorId) -> Result<&str, SimulationError> {
        self.current
            .get(&actor)
            .map(String::as_str)
            .ok_or(SimulationError::UnknownActor(actor))
    }

    pub fn current_numbers(&self) -> &BTreeMap<ActorId, String> {
        &self.current
    }

    /// Who was given `number`, and in which epoch.
    pub fn resolve(&self, number: &str) -> Option<&NumberRecord> {
        self.issued.get(number)
    }

    /// Every number `actor` has held, oldest first.
    pub fn numbers_for(&self, actor: ActorId) -> Vec<&NumberRecord> {
        let mut held: Vec<_> = self.issued.values().filter(|r| r.holder_id == actor).collect();
        held.sort_by_key(|r| r.epoch);
        held
    }

    /// Historical identity behind `number`.
    ///
    /// Initial numbers carry the bare holder name. Numbers handed out by churn carry the name
    /// suffixed with the zero-based churn round, so the first churn (epoch 1) yields
    /// `"Alice0"`, the second `"Alice1"`, and so on.
    pub fn identity_tag(&self, number: &str, population: &[Actor]) -> Option<String> {
        let record = self.resolve(number)?;
        let name = &population.get(record.holder_id)?.display_name;
        Some(match record.epoch.checked_sub(1) {
            None => name.clone(),
            Some(round) => format!("{}{}", name, round),
        })
    }

    /// All issuances in number order.
    pub fn history(&self) -> impl Iterator<Item = &NumberRecord> {
        self.issued.values()
    }

    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    fn assign<R: Rng + ?Sized>(&mut self, actor: ActorId, rng: &mut R) -> Result<(), SimulationError> {
        let number = self.fresh_number(rng, &BTreeSet::new())?;
        self.commit(actor, number);
        Ok(())
    }

    fn commit(&mut self, actor: ActorId, number: String) {
        trace!(actor, %number, epoch = self.epoch, "Assigned number");
        self.issued.insert(
            number.clone(),
            NumberRecord {
                number: number.clone(),
                holder_id: actor,
                epoch: self.epoch,
            },
        );
        self.current.insert(actor, number);
    }

    /// Samples a number that is neither in the history nor in `reserved`.
    fn fresh_number<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        reserved: &BTreeSet<String>,
    ) -> Result<String, SimulationError> {
        if self.range.capacity() == 0 {
            return Err(SimulationError::NumberSpaceExhausted { attempts: 0 });
        }
        for _ in 0..MAX_ISSUE_ATTEMPTS {
            let candidate = format!("+{}", rng.gen_range(self.range.low..=self.range.high));
            if !self.issued.contains_key(&candidate) && !reserved.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(SimulationError::NumberSpaceExhausted {
            attempts: MAX_ISSUE_ATTEMPTS,
        })
    }
}
