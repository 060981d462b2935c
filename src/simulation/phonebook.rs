//! Per-actor phonebooks.
//!
//! Entries are only ever written at seed time and by [`Phonebooks::observe`] after a call,
//! so an entry goes stale whenever the friend churns and stays stale until the owner calls
//! that friend again.

use std::collections::BTreeMap;

use crate::model::ActorId;

use super::error::SimulationError;
use super::graph::Friendships;

/// Phonebooks of a whole population, one private book per owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Phonebooks {
    books: BTreeMap<ActorId, BTreeMap<ActorId, String>>,
}

impl Phonebooks {
    /// Gives every actor an entry for each friend, set to that friend's number right now.
    ///
    /// Friends without a current number are skipped; looking them up later reports
    /// [`SimulationError::MissingEntry`].
    pub fn seed(friendships: &Friendships, current_numbers: &BTreeMap<ActorId, String>) -> Self {
        let books = friendships
            .iter()
            .map(|(owner, friends)| {
                let book = friends
                    .iter()
                    .filter_map(|&friend| {
                        current_numbers.get(&friend).map(|number| (friend, number.clone()))
                    })
                    .collect();
                (owner, book)
            })
            .collect();
        Self { books }
    }

    /// The number `owner` has on file for `friend`.
    pub fn lookup(&self, owner: ActorId, friend: ActorId) -> Result<&str, SimulationError> {
        self.books
            .get(&owner)
            .and_then(|book| book.get(&friend))
            .map(String::as_str)
            .ok_or(SimulationError::MissingEntry { owner, friend })
    }

    /// Records that `owner` now knows `friend` is reachable at `number`.
    pub fn observe(&mut self, owner: ActorId, friend: ActorId, number: impl Into<String>) {
        self.books.entry(owner).or_default().insert(friend, number.into());
    }

    /// Read-only view of one owner's book.
    pub fn book(&self, owner: ActorId) -> Option<&BTreeMap<ActorId, String>> {
        self.books.get(&owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Friendships, BTreeMap<ActorId, String>) {
        let mut friendships = Friendships::empty(&[0, 1, 2]);
        friendships.connect(0, 1);
        friendships.connect(1, 2);
        let numbers = BTreeMap::from([
            (0, "+3160000000".to_string()),
            (1, "+3160000001".to_string()),
            (2, "+3160000002".to_string()),
        ]);
        (friendships, numbers)
    }

    #[test]
    fn test_seed_covers_every_friend() {
        let (friendships, numbers) = setup();
        let books = Phonebooks::seed(&friendships, &numbers);
        assert_eq!(books.lookup(0, 1).unwrap(), "+3160000001");
        assert_eq!(books.lookup(1, 0).unwrap(), "+3160000000");
        assert_eq!(books.lookup(1, 2).unwrap(), "+3160000002");
        assert_eq!(books.book(1).unwrap().len(), 2);
    }

    #[test]
    fn test_lookup_of_non_friend_is_missing_entry() {
        let (friendships, numbers) = setup();
        let books = Phonebooks::seed(&friendships, &numbers);
        assert_eq!(
            books.lookup(0, 2),
            Err(SimulationError::MissingEntry { owner: 0, friend: 2 })
        );
    }

    #[test]
    fn test_observe_overwrites_only_owner_entry() {
        let (friendships, numbers) = setup();
        let mut books = Phonebooks::seed(&friendships, &numbers);
        books.observe(0, 1, "+3169999999");
        assert_eq!(books.lookup(0, 1).unwrap(), "+3169999999");
        assert_eq!(books.lookup(2, 1).unwrap(), "+3160000001");
    }
}
