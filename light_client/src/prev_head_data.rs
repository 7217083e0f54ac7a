use std::{collections::HashMap, sync::Arc};

use itertools::Itertools as _;
use parking_lot::RwLock;
use ssz_types::FixedVector;
use types::{
    altair::{
        consts::{FinalityBranchLength, SyncCommitteeBranchLength},
        containers::SyncCommittee,
    },
    phase0::{
        containers::{BeaconBlockHeader, Checkpoint},
        primitives::H256,
    },
    preset::Preset,
};

use crate::config::SubscriberConfig;

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum EvictionPolicy {
    /// Evict arbitrary entries.
    #[default]
    Unordered,
    /// Evict entries with the oldest attested headers first.
    LowestSlot,
}

/// What a later head needs to know about a block to build light client updates attested by it.
#[derive(Clone, PartialEq, Debug)]
pub struct SyncAttestedData<P: Preset> {
    pub header: BeaconBlockHeader,
    pub finalized_checkpoint: Checkpoint,
    pub finality_branch: FixedVector<H256, FinalityBranchLength>,
    pub next_sync_committee: Arc<SyncCommittee<P>>,
    pub next_sync_committee_branch: FixedVector<H256, SyncCommitteeBranchLength>,
}

pub struct PrevHeadData<P: Preset> {
    entries: RwLock<HashMap<H256, Arc<SyncAttestedData<P>>>>,
    max_size: usize,
    eviction: EvictionPolicy,
}

impl<P: Preset> PrevHeadData<P> {
    #[must_use]
    pub fn new(config: SubscriberConfig) -> Self {
        let SubscriberConfig {
            prev_data_max_size,
            eviction,
        } = config;

        Self {
            entries: RwLock::default(),
            max_size: prev_data_max_size,
            eviction,
        }
    }

    pub fn insert(&self, block_root: H256, data: SyncAttestedData<P>) {
        self.entries.write().insert(block_root, Arc::new(data));
    }

    #[must_use]
    pub fn get(&self, block_root: H256) -> Option<Arc<SyncAttestedData<P>>> {
        self.entries.read().get(&block_root).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Evicts entries until at most `prev_data_max_size` remain.
    ///
    /// Returns the number of evicted entries.
    pub fn prune(&self) -> usize {
        let mut entries = self.entries.write();
        let excess = entries.len().saturating_sub(self.max_size);

        if excess == 0 {
            return 0;
        }

        let evicted = match self.eviction {
            EvictionPolicy::Unordered => entries.keys().copied().take(excess).collect_vec(),
            EvictionPolicy::LowestSlot => entries
                .iter()
                .map(|(block_root, data)| (data.header.slot, *block_root))
                .sorted()
                .take(excess)
                .map(|(_, block_root)| block_root)
                .collect_vec(),
        };

        for block_root in &evicted {
            entries.remove(block_root);
        }

        evicted.len()
    }
}
