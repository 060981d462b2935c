//! Social graph builder.
//!
//! The relation is symmetric and irreflexive. With [`build_friendships`] every actor ends up
//! with at least `degree_min` friends, but an actor can carry more than `degree_max`: edges
//! are added to both endpoints as soon as they are drawn, so an actor visited late may
//! already hold inherited edges beyond its own target.

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::ActorId;

/// Symmetric friendship relation over actor ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Friendships {
    adjacency: BTreeMap<ActorId, BTreeSet<ActorId>>,
}

impl Friendships {
    /// An empty relation where every id in `actor_ids` has no friends yet.
    pub fn empty(actor_ids: &[ActorId]) -> Self {
        Self {
            adjacency: actor_ids.iter().map(|&id| (id, BTreeSet::new())).collect(),
        }
    }

    /// Adds the edge `a <-> b`. Returns false for self loops and existing edges.
    pub fn connect(&mut self, a: ActorId, b: ActorId) -> bool {
        if a == b || self.are_friends(a, b) {
            return false;
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        true
    }

    pub fn friends_of(&self, actor: ActorId) -> Option<&BTreeSet<ActorId>> {
        self.adjacency.get(&actor)
    }

    pub fn degree(&self, actor: ActorId) -> usize {
        self.adjacency.get(&actor).map_or(0, BTreeSet::len)
    }

    pub fn are_friends(&self, a: ActorId, b: ActorId) -> bool {
        self.adjacency.get(&a).is_some_and(|friends| friends.contains(&b))
    }

    /// Actors in ascending id order, each with its friend set.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &BTreeSet<ActorId>)> {
        self.adjacency.iter().map(|(&id, friends)| (id, friends))
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }
}

/// Builds a random relation with per-actor target degrees drawn from `[degree_min, degree_max]`.
///
/// The caller guarantees `degree_max <= actor_ids.len() - 2`, otherwise rejection sampling
/// may never find a free candidate. [`SimulationConfig::validate`] checks both bounds.
///
/// # Panics
///
/// Panics if `degree_min > degree_max`.
///
/// [`SimulationConfig::validate`]: crate::model::SimulationConfig::validate
pub fn build_friendships<R: Rng + ?Sized>(
    actor_ids: &[ActorId],
    degree_min: usize,
    degree_max: usize,
    rng: &mut R,
) -> Friendships {
    assert!(
        degree_min <= degree_max,
        "inverted degree range: {degree_min} > {degree_max}"
    );
    let mut ordered = actor_ids.to_vec();
    ordered.sort_unstable();

    let mut relation = Friendships::empty(&ordered);
    for &actor in &ordered {
        let target = rng.gen_range(degree_min..=degree_max);
        while relation.degree(actor) < target {
            let Some(&candidate) = ordered.choose(rng) else {
                break;
            };
            relation.connect(actor, candidate);
        }
    }
    relation
}

/// Pairs `2k` with `2k + 1`. A trailing odd actor is left without friends.
pub fn build_friend_pairs(actor_ids: &[ActorId]) -> Friendships {
    let mut ordered = actor_ids.to_vec();
    ordered.sort_unstable();

    let mut relation = Friendships::empty(&ordered);
    for pair in ordered.chunks_exact(2) {
        relation.connect(pair[0], pair[1]);
    }
    relation
}
