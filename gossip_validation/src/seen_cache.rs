use core::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::RwLock;
use types::phase0::primitives::{Slot, SubcommitteeIndex, ValidatorIndex};

/// Three 32-byte blocks holding the aggregator index, slot and subcommittee index.
/// Each number is stored little-endian in the first 8 bytes of its block.
pub type SeenKey = [u8; 96];

/// Remembers contributions that passed validation, keyed by
/// `(aggregator_index, slot, subcommittee_index)`.
pub struct SeenSyncContribution {
    cache: RwLock<LruCache<SeenKey, ()>>,
}

impl SeenSyncContribution {
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            cache: RwLock::new(LruCache::new(capacity)),
        }
    }

    #[must_use]
    pub fn key(
        aggregator_index: ValidatorIndex,
        slot: Slot,
        subcommittee_index: SubcommitteeIndex,
    ) -> SeenKey {
        let mut key = [0; 96];

        for (block, number) in key
            .chunks_exact_mut(32)
            .zip([aggregator_index, slot, subcommittee_index])
        {
            block[..8].copy_from_slice(&number.to_le_bytes());
        }

        key
    }

    // `LruCache::contains` does not update recency, so a read lock is enough.
    #[must_use]
    pub fn contains(&self, key: &SeenKey) -> bool {
        self.cache.read().contains(key)
    }

    pub fn insert(&self, key: SeenKey) {
        self.cache.write().put(key, ());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}
