//! Call stream generator.
//!
//! A [`Simulation`] owns every piece of mutable state for one run: the RNG, the number
//! allocator and the phonebooks. Nothing is shared between runs, so two simulations built
//! from the same config and seed produce the same stream.

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, info_span, warn};

use crate::model::{Actor, ActorId, Cdr, DialMode, GraphShape, SimulationConfig};

use super::error::SimulationError;
use super::graph::{build_friend_pairs, build_friendships, Friendships};
use super::identity::{create_population, NameSource};
use super::numbers::NumberAllocator;
use super::phonebook::Phonebooks;

/// State of one simulation run.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    rng: ChaCha8Rng,
    population: Vec<Actor>,
    friendships: Friendships,
    numbers: NumberAllocator,
    phonebooks: Phonebooks,
    next_sequence: u64,
    ticks_in_epoch: u64,
    failed: Option<SimulationError>,
}

impl Simulation {
    /// Validates `config`, then builds the population, the graph, the initial numbers and
    /// the phonebooks, in that order, from one RNG seeded with `config.seed`.
    pub fn new(config: SimulationConfig, names: &mut dyn NameSource) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let population = create_population(config.population_size, names);
        let ids: Vec<ActorId> = population.iter().map(|a| a.id).collect();
        let friendships = match config.graph {
            GraphShape::Random => {
                let (min, max) = config.degree_range;
                build_friendships(&ids, min, max, &mut rng)
            }
            GraphShape::Pairs => build_friend_pairs(&ids),
        };
        Self::from_parts(config, rng, population, friendships)
    }

    /// Assembles a run around an existing population and graph without validating them.
    ///
    /// Issues the initial numbers and seeds the phonebooks.
    pub fn from_parts(
        config: SimulationConfig,
        mut rng: ChaCha8Rng,
        population: Vec<Actor>,
        friendships: Friendships,
    ) -> Result<Self, SimulationError> {
        let ids: Vec<ActorId> = population.iter().map(|a| a.id).collect();
        let mut numbers = NumberAllocator::new(config.number_range);
        let current = numbers.issue_initial(&ids, &mut rng)?;
        let phonebooks = Phonebooks::seed(&friendships, current);
        debug!(
            actors = population.len(),
            edges = friendships.edge_count(),
            "Simulation assembled"
        );
        Ok(Self {
            config,
            rng,
            population,
            friendships,
            numbers,
            phonebooks,
            next_sequence: 0,
            ticks_in_epoch: 0,
            failed: None,
        })
    }

    /// Runs every remaining tick and epoch boundary and returns the records.
    ///
    /// Once the configured schedule is complete further calls return an empty list. Any
    /// error aborts the run and discards the records produced so far. A failed run stays
    /// failed: every later call returns the same error.
    pub fn generate(&mut self) -> Result<Vec<Cdr>, SimulationError> {
        let span = info_span!("simulation", seed = self.config.seed);
        let _enter = span.enter();
        if let Some(e) = &self.failed {
            return Err(e.clone());
        }

        let capacity = usize::try_from(self.config.total_records()).unwrap_or(0);
        let mut records = Vec::with_capacity(capacity);
        info!(
            actors = self.population.len(),
            epochs = self.config.epoch_count,
            ticks_per_epoch = self.config.ticks_per_epoch,
            "Run started"
        );

        match self.run_schedule(&mut records) {
            Ok(()) => {
                info!(records = records.len(), "Run finished");
                Ok(records)
            }
            Err(e) => {
                warn!(error = %e, emitted = records.len(), "Run aborted");
                Err(e)
            }
        }
    }

    fn run_schedule(&mut self, records: &mut Vec<Cdr>) -> Result<(), SimulationError> {
        while self.numbers.epoch() < self.config.epoch_count {
            while self.ticks_in_epoch < self.config.ticks_per_epoch {
                records.push(self.tick()?);
            }
            self.advance_epoch()?;
        }
        Ok(())
    }

    /// Places one call and returns its record.
    ///
    /// Fails with [`SimulationError::ScheduleComplete`] once every configured epoch has run,
    /// and with the original error after any earlier failure.
    pub fn tick(&mut self) -> Result<Cdr, SimulationError> {
        self.ensure_running()?;
        let result = self.place_call();
        self.record_failure(result)
    }

    /// Closes the current epoch by churning `churn_per_epoch` numbers.
    ///
    /// Phonebooks are left untouched. The same schedule and failure rules as
    /// [`Simulation::tick`] apply.
    pub fn advance_epoch(&mut self) -> Result<BTreeSet<ActorId>, SimulationError> {
        self.ensure_running()?;
        let result = self.numbers.churn(self.config.churn_per_epoch, &mut self.rng);
        let reassigned = self.record_failure(result)?;
        self.ticks_in_epoch = 0;
        Ok(reassigned)
    }

    fn ensure_running(&self) -> Result<(), SimulationError> {
        if let Some(e) = &self.failed {
            return Err(e.clone());
        }
        if self.is_finished() {
            return Err(SimulationError::ScheduleComplete {
                epoch_count: self.config.epoch_count,
            });
        }
        Ok(())
    }

    fn record_failure<T>(&mut self, result: Result<T, SimulationError>) -> Result<T, SimulationError> {
        if let Err(e) = &result {
            self.failed.get_or_insert_with(|| e.clone());
        }
        result
    }

    fn place_call(&mut self) -> Result<Cdr, SimulationError> {
        if self.population.is_empty() {
            return Err(SimulationError::EmptyPopulation);
        }
        let caller = self.population[self.rng.gen_range(0..self.population.len())].id;
        let friends = self
            .friendships
            .friends_of(caller)
            .filter(|friends| !friends.is_empty())
            .ok_or(SimulationError::EmptyFriendSet { actor: caller })?;
        let pick = self.rng.gen_range(0..friends.len());
        let callee = friends
            .iter()
            .nth(pick)
            .copied()
            .ok_or(SimulationError::EmptyFriendSet { actor: caller })?;

        let live = self.numbers.current_number(callee)?.to_string();
        let dialed_number = match self.config.dial_mode {
            DialMode::Phonebook => self.phonebooks.lookup(caller, callee)?.to_string(),
            DialMode::Live => live.clone(),
        };
        let record = Cdr {
            sequence: self.next_sequence,
            caller_name: self.actor(caller)?.display_name.clone(),
            callee_name: self.actor(callee)?.display_name.clone(),
            caller_number: self.numbers.current_number(caller)?.to_string(),
            dialed_number,
            caller_id: caller,
            callee_id: callee,
            epoch: self.numbers.epoch(),
        };
        self.phonebooks.observe(caller, callee, live);

        self.next_sequence += 1;
        self.ticks_in_epoch += 1;
        Ok(record)
    }

    fn actor(&self, id: ActorId) -> Result<&Actor, SimulationError> {
        self.population
            .iter()
            .find(|a| a.id == id)
            .ok_or(SimulationError::UnknownActor(id))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn population(&self) -> &[Actor] {
        &self.population
    }

    pub fn friendships(&self) -> &Friendships {
        &self.friendships
    }

    pub fn numbers(&self) -> &NumberAllocator {
        &self.numbers
    }

    pub fn phonebooks(&self) -> &Phonebooks {
        &self.phonebooks
    }

    /// Index of the epoch the next tick falls into.
    pub fn epoch(&self) -> u32 {
        self.numbers.epoch()
    }

    pub fn records_emitted(&self) -> u64 {
        self.next_sequence
    }

    pub fn is_finished(&self) -> bool {
        self.failed.is_none() && self.numbers.epoch() >= self.config.epoch_count
    }

    /// The error that aborted this run, if any.
    pub fn failure(&self) -> Option<&SimulationError> {
        self.failed.as_ref()
    }
}

/// Builds a fresh simulation for `config` and runs it to completion.
pub fn run(config: SimulationConfig, names: &mut dyn NameSource) -> Result<Vec<Cdr>, SimulationError> {
    Simulation::new(config, names)?.generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NumberRange;
    use crate::simulation::identity::{FixedNames, RandomNames};
    use crate::simulation::numbers::MAX_ISSUE_ATTEMPTS;

    fn pair_config() -> SimulationConfig {
        SimulationConfig {
            population_size: 2,
            graph: GraphShape::Pairs,
            churn_per_epoch: 2,
            ticks_per_epoch: 10,
            epoch_count: 3,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_sequence_is_dense_and_complete() {
        let config = SimulationConfig {
            population_size: 10,
            degree_range: (1, 3),
            ticks_per_epoch: 25,
            epoch_count: 4,
            ..SimulationConfig::default()
        };
        let records = run(config, &mut RandomNames::new(0)).unwrap();
        assert_eq!(records.len(), 100);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.sequence, i as u64);
            assert_eq!(record.epoch, (i / 25) as u32);
        }
    }

    #[test]
    fn test_calls_follow_friendships() {
        let mut sim = Simulation::new(SimulationConfig::default(), &mut RandomNames::new(1)).unwrap();
        let records = sim.generate().unwrap();
        for record in &records {
            assert!(sim.friendships().are_friends(record.caller_id, record.callee_id));
            assert_eq!(record.caller_name, sim.population()[record.caller_id].display_name);
        }
    }

    #[test]
    fn test_first_call_after_churn_is_stale_second_is_fresh() {
        let config = SimulationConfig {
            epoch_count: 64,
            ..pair_config()
        };
        let mut sim = Simulation::new(config, &mut FixedNames::new(["A", "B"])).unwrap();
        let old_number = sim.numbers().current_number(1).unwrap().to_string();

        while !sim.advance_epoch().unwrap().contains(&1) {}
        let new_number = sim.numbers().current_number(1).unwrap().to_string();
        assert_ne!(old_number, new_number);
        // The number changed at the epoch boundary; the phonebook did not.
        assert_eq!(sim.phonebooks().lookup(0, 1).unwrap(), old_number);

        let mut dialed = Vec::new();
        for _ in 0..200 {
            let record = sim.tick().unwrap();
            if record.caller_id == 0 {
                dialed.push(record.dialed_number);
            }
            if dialed.len() == 2 {
                break;
            }
        }
        assert_eq!(dialed, vec![old_number, new_number]);
    }

    #[test]
    fn test_live_mode_never_dials_stale_numbers() {
        let config = SimulationConfig {
            dial_mode: DialMode::Live,
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(config, &mut RandomNames::new(2)).unwrap();
        for _ in 0..5 {
            for _ in 0..50 {
                let record = sim.tick().unwrap();
                assert_eq!(
                    record.dialed_number,
                    sim.numbers().current_number(record.callee_id).unwrap()
                );
            }
            sim.advance_epoch().unwrap();
        }
    }

    #[test]
    fn test_phonebook_mode_produces_stale_dials() {
        let mut sim = Simulation::new(SimulationConfig::default(), &mut RandomNames::new(3)).unwrap();
        let mut stale = 0;
        for _ in 0..10 {
            for _ in 0..300 {
                let record = sim.tick().unwrap();
                if record.dialed_number != sim.numbers().current_number(record.callee_id).unwrap() {
                    // A stale number still resolves to the callee, just an older epoch.
                    let held = sim.numbers().resolve(&record.dialed_number).unwrap();
                    assert_eq!(held.holder_id, record.callee_id);
                    assert!(held.epoch < record.epoch);
                    stale += 1;
                }
            }
            sim.advance_epoch().unwrap();
        }
        assert!(stale > 0);
    }

    #[test]
    fn test_empty_friend_set_aborts() {
        let config = SimulationConfig {
            population_size: 3,
            ..pair_config()
        };
        let population = create_population(3, &mut FixedNames::new(["A", "B", "C"]));
        let friendships = build_friend_pairs(&[0, 1, 2]);
        let mut sim = Simulation::from_parts(config, ChaCha8Rng::seed_from_u64(4), population, friendships)
            .unwrap();
        assert_eq!(sim.generate(), Err(SimulationError::EmptyFriendSet { actor: 2 }));
    }

    #[test]
    fn test_invalid_config_is_rejected_before_running() {
        let config = SimulationConfig {
            population_size: 3,
            ..pair_config()
        };
        let err = Simulation::new(config, &mut FixedNames::new(["A"])).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }

    #[test]
    fn test_generate_twice_returns_nothing_new() {
        let mut sim = Simulation::new(pair_config(), &mut RandomNames::new(5)).unwrap();
        assert_eq!(sim.generate().unwrap().len(), 30);
        assert!(sim.is_finished());
        assert!(sim.generate().unwrap().is_empty());
        assert_eq!(sim.records_emitted(), 30);
    }

    /// Four actors, a four-number range and one churn: the churn can never find a free number.
    fn exhausting_simulation() -> Simulation {
        let config = SimulationConfig {
            population_size: 4,
            degree_range: (1, 2),
            churn_per_epoch: 1,
            ticks_per_epoch: 5,
            epoch_count: 1,
            number_range: NumberRange::new(10, 13),
            ..SimulationConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let population = create_population(4, &mut FixedNames::new(["A", "B", "C", "D"]));
        let friendships = build_friendships(&[0, 1, 2, 3], 1, 2, &mut rng);
        Simulation::from_parts(config, rng, population, friendships).unwrap()
    }

    #[test]
    fn test_failed_run_stays_failed() {
        let mut sim = exhausting_simulation();
        let exhausted = SimulationError::NumberSpaceExhausted {
            attempts: MAX_ISSUE_ATTEMPTS,
        };

        assert_eq!(sim.generate(), Err(exhausted.clone()));
        assert_eq!(sim.epoch(), 0);
        assert!(!sim.is_finished());
        assert_eq!(sim.failure(), Some(&exhausted));

        assert_eq!(sim.generate(), Err(exhausted.clone()));
        assert_eq!(sim.tick(), Err(exhausted.clone()));
        assert_eq!(sim.advance_epoch(), Err(exhausted));
        assert!(!sim.is_finished());
    }

    #[test]
    fn test_tick_after_schedule_is_rejected() {
        let mut sim = Simulation::new(pair_config(), &mut RandomNames::new(6)).unwrap();
        sim.generate().unwrap();
        let complete = SimulationError::ScheduleComplete { epoch_count: 3 };
        assert_eq!(sim.tick(), Err(complete.clone()));
        assert_eq!(sim.advance_epoch(), Err(complete));
        assert_eq!(sim.records_emitted(), 30);
        assert_eq!(sim.epoch(), 3);
        // Running past the schedule is not a failure.
        assert!(sim.failure().is_none());
        assert!(sim.generate().unwrap().is_empty());
    }

    #[test]
    fn test_empty_schedules_emit_nothing() {
        let zero_ticks = SimulationConfig {
            ticks_per_epoch: 0,
            ..pair_config()
        };
        let mut sim = Simulation::new(zero_ticks, &mut RandomNames::new(7)).unwrap();
        assert!(sim.generate().unwrap().is_empty());
        assert!(sim.is_finished());
        assert_eq!(sim.epoch(), 3);

        let zero_epochs = SimulationConfig {
            epoch_count: 0,
            ..pair_config()
        };
        let mut sim = Simulation::new(zero_epochs, &mut RandomNames::new(7)).unwrap();
        assert!(sim.generate().unwrap().is_empty());
        assert!(sim.is_finished());
        assert_eq!(sim.numbers().issued_count(), 2);
    }
}
