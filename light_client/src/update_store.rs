use std::collections::{btree_map::Entry, BTreeMap};

use anyhow::Result;
use helper_functions::misc;
use parking_lot::RwLock;
use ssz_types::FixedVector;
use types::{
    altair::{
        containers::{
            LightClientFinalityUpdate, LightClientHeader, LightClientOptimisticUpdate,
            LightClientUpdate,
        },
        primitives::SyncCommitteePeriod,
    },
    phase0::containers::BeaconBlockHeader,
    preset::Preset,
};

use crate::{
    error::Error,
    prev_head_data::SyncAttestedData,
    sync_update::SyncSignatureData,
    traits::{FinalizedHeaderSource, UpdatePersister},
};

/// Keeps the best updates of every sync committee period in memory.
///
/// An update is better than another if its sync aggregate has more participants.
pub struct LightClientUpdateStore<P: Preset, S> {
    header_source: S,
    best_finalized_updates: RwLock<BTreeMap<SyncCommitteePeriod, LightClientUpdate<P>>>,
    best_non_finalized_updates: RwLock<BTreeMap<SyncCommitteePeriod, LightClientUpdate<P>>>,
    latest_finalized_update: RwLock<Option<LightClientFinalityUpdate<P>>>,
    latest_optimistic_update: RwLock<Option<LightClientOptimisticUpdate<P>>>,
}

impl<P: Preset, S: FinalizedHeaderSource> LightClientUpdateStore<P, S> {
    #[must_use]
    pub fn new(header_source: S) -> Self {
        Self {
            header_source,
            best_finalized_updates: RwLock::default(),
            best_non_finalized_updates: RwLock::default(),
            latest_finalized_update: RwLock::default(),
            latest_optimistic_update: RwLock::default(),
        }
    }

    #[must_use]
    pub fn best_finalized_update(
        &self,
        period: SyncCommitteePeriod,
    ) -> Option<LightClientUpdate<P>> {
        self.best_finalized_updates.read().get(&period).cloned()
    }

    #[must_use]
    pub fn best_non_finalized_update(
        &self,
        period: SyncCommitteePeriod,
    ) -> Option<LightClientUpdate<P>> {
        self.best_non_finalized_updates.read().get(&period).cloned()
    }

    #[must_use]
    pub fn latest_finalized_update(&self) -> Option<LightClientFinalityUpdate<P>> {
        self.latest_finalized_update.read().clone()
    }

    #[must_use]
    pub fn latest_optimistic_update(&self) -> Option<LightClientOptimisticUpdate<P>> {
        self.latest_optimistic_update.read().clone()
    }
}

impl<P: Preset, S: FinalizedHeaderSource> UpdatePersister<P> for LightClientUpdateStore<P, S> {
    fn persist_best_finalized_update(
        &self,
        attested: &SyncAttestedData<P>,
        signature_data: &SyncSignatureData<P>,
    ) -> Result<Option<SyncCommitteePeriod>> {
        let finalized_root = attested.finalized_checkpoint.root;

        // Nothing is finalized before the first justification.
        if finalized_root.is_zero() {
            return Ok(None);
        }

        let finalized_header = self
            .header_source
            .block_header_by_root(finalized_root)?
            .ok_or(Error::MissingFinalizedHeader {
                root: finalized_root,
            })?;

        let update = LightClientUpdate {
            attested_header: LightClientHeader {
                beacon: attested.header,
            },
            next_sync_committee: attested.next_sync_committee.as_ref().clone(),
            next_sync_committee_branch: attested.next_sync_committee_branch.clone(),
            finalized_header: LightClientHeader {
                beacon: finalized_header,
            },
            finality_branch: attested.finality_branch.clone(),
            sync_aggregate: signature_data.sync_aggregate.clone(),
            signature_slot: signature_data.slot,
        };

        let period = attested_period(attested);

        *self.latest_finalized_update.write() = Some(LightClientFinalityUpdate {
            attested_header: update.attested_header.clone(),
            finalized_header: update.finalized_header.clone(),
            finality_branch: update.finality_branch.clone(),
            sync_aggregate: update.sync_aggregate.clone(),
            signature_slot: update.signature_slot,
        });

        insert_if_better(&mut self.best_finalized_updates.write(), period, update);

        Ok(Some(period))
    }

    fn persist_best_non_finalized_update(
        &self,
        attested: &SyncAttestedData<P>,
        signature_data: &SyncSignatureData<P>,
        finalized_period: Option<SyncCommitteePeriod>,
    ) -> Result<()> {
        let attested_header = LightClientHeader {
            beacon: attested.header,
        };

        *self.latest_optimistic_update.write() = Some(LightClientOptimisticUpdate {
            attested_header: attested_header.clone(),
            sync_aggregate: signature_data.sync_aggregate.clone(),
            signature_slot: signature_data.slot,
        });

        let period = attested_period(attested);

        if finalized_period == Some(period) {
            return Ok(());
        }

        let update = LightClientUpdate {
            attested_header,
            next_sync_committee: attested.next_sync_committee.as_ref().clone(),
            next_sync_committee_branch: attested.next_sync_committee_branch.clone(),
            finalized_header: LightClientHeader {
                beacon: BeaconBlockHeader::default(),
            },
            finality_branch: FixedVector::default(),
            sync_aggregate: signature_data.sync_aggregate.clone(),
            signature_slot: signature_data.slot,
        };

        insert_if_better(&mut self.best_non_finalized_updates.write(), period, update);

        Ok(())
    }
}

fn attested_period<P: Preset>(attested: &SyncAttestedData<P>) -> SyncCommitteePeriod {
    misc::sync_committee_period::<P>(misc::compute_epoch_at_slot::<P>(attested.header.slot))
}

fn insert_if_better<P: Preset>(
    updates: &mut BTreeMap<SyncCommitteePeriod, LightClientUpdate<P>>,
    period: SyncCommitteePeriod,
    update: LightClientUpdate<P>,
) {
    match updates.entry(period) {
        Entry::Vacant(vacant) => {
            vacant.insert(update);
        }
        Entry::Occupied(mut occupied) => {
            let new_participants = update.sync_aggregate.num_participants();
            let old_participants = occupied.get().sync_aggregate.num_participants();

            if new_participants > old_participants {
                occupied.insert(update);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Arc};

    use types::{
        altair::containers::SyncAggregate,
        phase0::{
            containers::Checkpoint,
            primitives::{Slot, H256},
        },
        preset::Minimal,
    };

    use super::*;

    #[derive(Default)]
    struct Headers(HashMap<H256, BeaconBlockHeader>);

    impl FinalizedHeaderSource for Headers {
        fn block_header_by_root(&self, root: H256) -> Result<Option<BeaconBlockHeader>> {
            Ok(self.0.get(&root).copied())
        }
    }

    #[test]
    fn genesis_checkpoint_stores_only_non_finalized_update() -> Result<()> {
        let store = LightClientUpdateStore::new(Headers::default());
        let attested = attested(20, H256::zero());
        let signature_data = signature_data(21, 3);

        let finalized_period = store.persist_best_finalized_update(&attested, &signature_data)?;
        store.persist_best_non_finalized_update(&attested, &signature_data, finalized_period)?;

        assert_eq!(finalized_period, None);
        assert!(store.best_finalized_update(0).is_none());
        assert!(store.latest_finalized_update().is_none());

        let update = store
            .best_non_finalized_update(0)
            .expect("update should be stored");

        assert_eq!(update.attested_header.beacon.slot, 20);
        assert_eq!(update.finalized_header.beacon, BeaconBlockHeader::default());
        assert!(update.finality_branch.iter().all(H256::is_zero));
        assert_eq!(update.signature_slot, 21);
        assert_eq!(
            store
                .latest_optimistic_update()
                .map(|update| update.signature_slot),
            Some(21),
        );

        Ok(())
    }

    #[test]
    fn finalized_update_suppresses_non_finalized_update_for_same_period() -> Result<()> {
        let finalized_root = H256::repeat_byte(0xf1);
        let finalized_header = BeaconBlockHeader {
            slot: 8,
            ..BeaconBlockHeader::default()
        };

        let store = LightClientUpdateStore::new(Headers(HashMap::from([(
            finalized_root,
            finalized_header,
        )])));

        let attested = attested(20, finalized_root);
        let signature_data = signature_data(21, 3);

        let finalized_period = store.persist_best_finalized_update(&attested, &signature_data)?;
        store.persist_best_non_finalized_update(&attested, &signature_data, finalized_period)?;

        assert_eq!(finalized_period, Some(0));
        assert_eq!(
            store
                .best_finalized_update(0)
                .map(|update| update.finalized_header.beacon),
            Some(finalized_header),
        );
        assert_eq!(
            store
                .latest_finalized_update()
                .map(|update| update.finalized_header.beacon.slot),
            Some(8),
        );
        assert!(store.best_non_finalized_update(0).is_none());
        assert!(store.latest_optimistic_update().is_some());

        Ok(())
    }

    #[test]
    fn missing_finalized_header_fails() {
        let store = LightClientUpdateStore::<Minimal, _>::new(Headers::default());
        let root = H256::repeat_byte(0xf2);

        let error = store
            .persist_best_finalized_update(&attested(20, root), &signature_data(21, 3))
            .expect_err("finalized header is unknown")
            .downcast::<Error>()
            .expect("error should come from light_client");

        assert!(matches!(
            error,
            Error::MissingFinalizedHeader { root: missing } if missing == root,
        ));
    }

    #[test]
    fn better_update_replaces_stored_one_and_equal_does_not() -> Result<()> {
        let store = LightClientUpdateStore::new(Headers::default());

        let persist = |attested_slot, participants| {
            store.persist_best_non_finalized_update(
                &attested(attested_slot, H256::zero()),
                &signature_data(attested_slot + 1, participants),
                None,
            )
        };

        let best_signature_slot = |period| {
            store
                .best_non_finalized_update(period)
                .map(|update| update.signature_slot)
        };

        persist(20, 3)?;
        persist(30, 3)?;

        assert_eq!(best_signature_slot(0), Some(21));

        persist(40, 4)?;

        assert_eq!(best_signature_slot(0), Some(41));

        // Minimal sync committee periods are 64 slots long.
        persist(70, 1)?;

        assert_eq!(best_signature_slot(1), Some(71));
        assert_eq!(best_signature_slot(0), Some(41));

        Ok(())
    }

    fn attested(slot: Slot, finalized_root: H256) -> SyncAttestedData<Minimal> {
        SyncAttestedData {
            header: BeaconBlockHeader {
                slot,
                ..BeaconBlockHeader::default()
            },
            finalized_checkpoint: Checkpoint {
                epoch: 1,
                root: finalized_root,
            },
            finality_branch: FixedVector::from(vec![H256::repeat_byte(1); 6]),
            next_sync_committee: Arc::default(),
            next_sync_committee_branch: FixedVector::default(),
        }
    }

    fn signature_data(slot: Slot, participants: usize) -> SyncSignatureData<Minimal> {
        let mut sync_aggregate = SyncAggregate::empty();

        for index in 0..participants {
            sync_aggregate
                .sync_committee_bits
                .set(index, true)
                .expect("participant index should be within the sync committee");
        }

        SyncSignatureData {
            slot,
            fork_version: [1, 0, 0, 1],
            sync_aggregate,
        }
    }
}
