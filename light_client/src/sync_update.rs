use std::sync::Arc;

use anyhow::{bail, Result};
use helper_functions::{accessors, merkle, misc};
use types::{
    altair::containers::SyncAggregate,
    combined::{BeaconState, SignedBeaconBlock},
    config::Config,
    phase0::primitives::{Slot, Version},
    preset::Preset,
    traits::{BeaconState as _, PostAltairBeaconState, SignedBeaconBlock as _},
};

use crate::{
    config::SubscriberConfig,
    error::Error,
    prev_head_data::{PrevHeadData, SyncAttestedData},
    traits::UpdatePersister,
};

/// The sync aggregate of a head block and the context it was signed in.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SyncSignatureData<P: Preset> {
    pub slot: Slot,
    pub fork_version: Version,
    pub sync_aggregate: SyncAggregate<P>,
}

pub struct SyncUpdateBuilder<P: Preset, U> {
    config: Arc<Config>,
    prev_head_data: PrevHeadData<P>,
    persister: U,
}

impl<P: Preset, U: UpdatePersister<P>> SyncUpdateBuilder<P, U> {
    #[must_use]
    pub fn new(config: Arc<Config>, subscriber_config: SubscriberConfig, persister: U) -> Self {
        Self {
            config,
            prev_head_data: PrevHeadData::new(subscriber_config),
            persister,
        }
    }

    #[must_use]
    pub const fn prev_head_data(&self) -> &PrevHeadData<P> {
        &self.prev_head_data
    }

    #[must_use]
    pub const fn persister(&self) -> &U {
        &self.persister
    }

    /// Records `block` as a potential attested block and builds updates for the block its
    /// sync aggregate attests to.
    ///
    /// `state` must be the post-state of `block`.
    pub fn on_head(&self, block: &SignedBeaconBlock<P>, state: &BeaconState<P>) -> Result<()> {
        let Some(post_altair_state) = state.post_altair() else {
            bail!(Error::WrongStateVersion {
                phase: state.phase(),
            });
        };

        let message = block.message();
        let header = message.to_header();
        let finality_branch = merkle::finality_branch(post_altair_state)?;
        let next_sync_committee_branch = merkle::next_sync_committee_branch(post_altair_state)?;
        let block_root = message.hash_tree_root();

        self.prev_head_data.insert(
            block_root,
            SyncAttestedData {
                header,
                finalized_checkpoint: post_altair_state.finalized_checkpoint(),
                finality_branch,
                next_sync_committee: Arc::new(post_altair_state.next_sync_committee().clone()),
                next_sync_committee_branch,
            },
        );

        // The record above counts against the bound even when no update can be built.
        let result = self.persist_updates(block, post_altair_state);

        self.prev_head_data.prune();

        result
    }

    fn persist_updates(
        &self,
        block: &SignedBeaconBlock<P>,
        post_altair_state: &dyn PostAltairBeaconState<P>,
    ) -> Result<()> {
        // Sync aggregates in a block are signatures over the root of its parent slot.
        let sync_attested_slot = post_altair_state.slot().saturating_sub(1);
        let sync_attested_root =
            accessors::get_block_root_at_slot(post_altair_state, sync_attested_slot)?;

        let slot = block.message().slot();
        let fork_version = self
            .config
            .version_at_epoch(misc::compute_epoch_at_slot::<P>(slot));

        let signature_data = SyncSignatureData {
            slot,
            fork_version,
            sync_aggregate: block.sync_aggregate()?.clone(),
        };

        let attested = self
            .prev_head_data
            .get(sync_attested_root)
            .ok_or(Error::NoCorrelatedHeadData {
                root: sync_attested_root,
            })?;

        let finalized_period = self
            .persister
            .persist_best_finalized_update(&attested, &signature_data)?;

        self.persister
            .persist_best_non_finalized_update(&attested, &signature_data, finalized_period)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use types::{
        nonstandard::Phase,
        phase0::{
            beacon_state::BeaconState as Phase0BeaconState,
            containers::{
                BeaconBlock as Phase0BeaconBlock, SignedBeaconBlock as Phase0SignedBeaconBlock,
            },
            primitives::H256,
        },
        preset::Minimal,
    };

    use crate::prev_head_data::EvictionPolicy;

    use crate::test_utils::{altair_block, altair_state_after, RecordingPersister};

    use super::*;

    #[test]
    fn on_head_without_previous_record_fails_without_persisting() {
        let builder = builder(SubscriberConfig::default());
        let block = altair_block(1, H256::zero(), 0);
        let state = altair_state_after(&block, H256::repeat_byte(0xee));

        let error = builder
            .on_head(&block, &state)
            .expect_err("nothing is known about the parent slot")
            .downcast::<Error>()
            .expect("error should come from light_client");

        assert!(matches!(
            error,
            Error::NoCorrelatedHeadData { root } if root == H256::repeat_byte(0xee),
        ));
        assert_eq!(builder.prev_head_data().len(), 1);
        assert!(builder.persister().calls().is_empty());
    }

    #[test]
    fn on_head_correlates_with_parent_head() -> Result<()> {
        let builder = builder(SubscriberConfig::default());

        let parent = altair_block(1, H256::zero(), 0);
        let parent_state = altair_state_after(&parent, H256::zero());
        let parent_root = parent.message().hash_tree_root();

        let child = altair_block(2, parent_root, 5);
        let child_state = altair_state_after(&child, parent_root);

        assert!(builder.on_head(&parent, &parent_state).is_err());
        builder.on_head(&child, &child_state)?;

        let calls = builder.persister().calls();

        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|(attested_slot, signature_data)| {
            *attested_slot == 1
                && signature_data.slot == 2
                && signature_data.fork_version == config().altair_fork_version
                && signature_data.sync_aggregate.num_participants() == 5
        }));

        Ok(())
    }

    #[test]
    fn on_head_keeps_prev_head_data_bounded() -> Result<()> {
        // Unordered eviction could drop the record the next head correlates with.
        let builder = builder(SubscriberConfig {
            prev_data_max_size: 2,
            eviction: EvictionPolicy::LowestSlot,
        });

        let first = altair_block(1, H256::zero(), 0);
        let mut parent_root = first.message().hash_tree_root();

        assert!(builder
            .on_head(&first, &altair_state_after(&first, H256::zero()))
            .is_err());

        for slot in 2..8 {
            let block = altair_block(slot, parent_root, 1);
            builder.on_head(&block, &altair_state_after(&block, parent_root))?;
            parent_root = block.message().hash_tree_root();
        }

        assert_eq!(builder.prev_head_data().len(), 2);

        Ok(())
    }

    #[test]
    fn on_head_keeps_prev_head_data_bounded_when_heads_do_not_correlate() {
        let builder = builder(SubscriberConfig {
            prev_data_max_size: 2,
            ..SubscriberConfig::default()
        });

        for slot in 1..=10 {
            let block = altair_block(slot, H256::repeat_byte(0xaa), 1);
            let state = altair_state_after(&block, H256::repeat_byte(0xee));

            let error = builder
                .on_head(&block, &state)
                .expect_err("no head was recorded at the previous slot")
                .downcast::<Error>()
                .expect("error should come from light_client");

            assert!(matches!(error, Error::NoCorrelatedHeadData { .. }));
            assert!(builder.prev_head_data().len() <= 2);
        }

        assert_eq!(builder.prev_head_data().len(), 2);
        assert!(builder.persister().calls().is_empty());
    }

    #[test]
    fn on_head_rejects_phase0_state() {
        let builder = builder(SubscriberConfig::default());

        let block = SignedBeaconBlock::from(Phase0SignedBeaconBlock {
            message: Phase0BeaconBlock {
                slot: 1,
                ..Phase0BeaconBlock::default()
            },
            ..Phase0SignedBeaconBlock::default()
        });
        let state = BeaconState::from(Phase0BeaconState::<Minimal> {
            slot: 1,
            ..Phase0BeaconState::default()
        });

        let error = builder
            .on_head(&block, &state)
            .expect_err("Phase 0 states have no sync committees")
            .downcast::<Error>()
            .expect("error should come from light_client");

        assert!(matches!(
            error,
            Error::WrongStateVersion {
                phase: Phase::Phase0,
            },
        ));
        assert!(builder.prev_head_data().is_empty());
    }

    fn config() -> Config {
        Config::minimal().start_and_stay_in(Phase::Altair)
    }

    fn builder(
        subscriber_config: SubscriberConfig,
    ) -> SyncUpdateBuilder<Minimal, RecordingPersister> {
        SyncUpdateBuilder::new(
            Arc::new(config()),
            subscriber_config,
            RecordingPersister::default(),
        )
    }
}
