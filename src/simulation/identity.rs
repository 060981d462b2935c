//! Identity registry: the population of actors and where their names come from.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::model::Actor;

/// Supplies one display name per call. Names may repeat.
pub trait NameSource {
    fn next_name(&mut self) -> String;
}

/// Seeded source that pairs a first name with a surname.
pub struct RandomNames {
    rng: ChaCha8Rng,
}

const FIRST_NAMES: &[&str] = &[
    "Anna", "Bram", "Carlos", "Daan", "Eva", "Fatima", "Gerrit", "Hanna", "Ismail", "Joost",
    "Karin", "Lotte", "Mohamed", "Noah", "Olga", "Pieter", "Rosa", "Sem", "Tess", "Yusuf",
];

const SURNAMES: &[&str] = &[
    "Bakker", "de Boer", "Dekker", "Janssen", "de Jong", "Kramer", "Meijer", "Mulder", "Peters",
    "Smit", "de Vries", "Visser", "van Dijk", "van den Berg", "Vos", "de Wit",
];

impl RandomNames {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl NameSource for RandomNames {
    fn next_name(&mut self) -> String {
        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Anna");
        let last = SURNAMES.choose(&mut self.rng).copied().unwrap_or("Bakker");
        format!("{first} {last}")
    }
}

/// Cycles through a fixed list. Handy when a test wants to know every name up front.
pub struct FixedNames {
    names: Vec<String>,
    next: usize,
}

impl FixedNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl NameSource for FixedNames {
    fn next_name(&mut self) -> String {
        if self.names.is_empty() {
            return format!("Actor {}", self.next);
        }
        let name = self.names[self.next % self.names.len()].clone();
        self.next += 1;
        name
    }
}

/// Creates `n` actors with ids `0..n`, asking `names` once per actor.
pub fn create_population(n: usize, names: &mut dyn NameSource) -> Vec<Actor> {
    (0..n).map(|id| Actor::new(id, names.next_name())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_ids_are_dense() {
        let actors = create_population(5, &mut RandomNames::new(1));
        let ids: Vec<_> = actors.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert!(actors.iter().all(|a| !a.display_name.is_empty()));
    }

    #[test]
    fn test_random_names_are_seeded() {
        let a = create_population(10, &mut RandomNames::new(9));
        let b = create_population(10, &mut RandomNames::new(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_names_cycle() {
        let actors = create_population(3, &mut FixedNames::new(["Ann", "Ben"]));
        let names: Vec<_> = actors.iter().map(|a| a.display_name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Ben", "Ann"]);
    }
}
