//! Immutable reference data: Secret cards, Event cards, Victory Conditions
//! and the zone adjacency graph, plus the deck-building utilities.

pub mod events;
pub mod secrets;
pub mod victory;
pub mod zones;

pub use events::{all_event_cards, EventCard};
pub use secrets::{cards_in_zone, secret_card, Rarity, SecretCardDef, SECRET_CARDS};
pub use victory::{all_victory_conditions, victory_condition, VictoryCondition};
pub use zones::ZoneName;

use rand::seq::SliceRandom;
use rand::Rng;

/// Fisher-Yates shuffle into a fresh `Vec`, leaving the source untouched.
pub fn shuffled<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Allocates card instance ids for one session's deck initialization.
///
/// Ids are unique within a session by construction: a session-scoped prefix
/// plus a monotonic serial. The allocator only lives for the duration of the
/// initialization call; no instance is ever minted after that.
#[derive(Debug)]
pub struct InstanceIdAllocator {
    prefix: String,
    next: u64,
}

impl InstanceIdAllocator {
    pub fn new(session_prefix: impl Into<String>) -> Self {
        Self {
            prefix: session_prefix.into(),
            next: 0,
        }
    }

    pub fn next_id(&mut self, base_id: &str) -> String {
        let serial = self.next;
        self.next += 1;
        format!("{base_id}@{prefix}:{serial}", prefix = self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shuffled_preserves_the_multiset() {
        let mut rng = StdRng::seed_from_u64(7);
        let source = vec![1, 2, 3, 4, 5, 6];
        let mut out = shuffled(&source, &mut rng);
        out.sort_unstable();
        assert_eq!(out, source);
    }

    #[test]
    fn instance_ids_never_repeat() {
        let mut alloc = InstanceIdAllocator::new("s1");
        let a = alloc.next_id("dg_common1");
        let b = alloc.next_id("dg_common1");
        assert_ne!(a, b);
        assert!(a.starts_with("dg_common1@s1:"));
    }

    #[test]
    fn allocators_with_distinct_prefixes_never_collide() {
        let mut left = InstanceIdAllocator::new("s1");
        let mut right = InstanceIdAllocator::new("s2");
        assert_ne!(left.next_id("cy_rare1"), right.next_id("cy_rare1"));
    }
}
