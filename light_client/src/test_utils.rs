use anyhow::Result;
use parking_lot::Mutex;
use ssz_types::BitVector;
use types::{
    altair::{
        beacon_state::BeaconState as AltairBeaconState,
        containers::{
            BeaconBlock as AltairBeaconBlock, BeaconBlockBody as AltairBeaconBlockBody,
            SignedBeaconBlock as AltairSignedBeaconBlock, SyncAggregate,
        },
        primitives::SyncCommitteePeriod,
    },
    combined::{BeaconState, SignedBeaconBlock},
    phase0::primitives::{Slot, H256},
    preset::Minimal,
    traits::SignedBeaconBlock as _,
};

use crate::{
    prev_head_data::SyncAttestedData, sync_update::SyncSignatureData, traits::UpdatePersister,
};

pub fn altair_block(
    slot: Slot,
    parent_root: H256,
    participants: usize,
) -> SignedBeaconBlock<Minimal> {
    let mut sync_committee_bits = BitVector::new();

    for index in 0..participants {
        sync_committee_bits
            .set(index, true)
            .expect("participant index should be within the sync committee");
    }

    AltairSignedBeaconBlock {
        message: AltairBeaconBlock {
            slot,
            parent_root,
            body: AltairBeaconBlockBody {
                sync_aggregate: SyncAggregate {
                    sync_committee_bits,
                    ..SyncAggregate::empty()
                },
                ..AltairBeaconBlockBody::default()
            },
            ..AltairBeaconBlock::default()
        },
        ..AltairSignedBeaconBlock::default()
    }
    .into()
}

/// Builds a post-state for `block` whose history records `previous_root` at the previous slot.
pub fn altair_state_after(
    block: &SignedBeaconBlock<Minimal>,
    previous_root: H256,
) -> BeaconState<Minimal> {
    let slot = block.message().slot();
    let mut state = AltairBeaconState::<Minimal> {
        slot,
        ..AltairBeaconState::default()
    };

    let index = usize::try_from((slot - 1) % 64).expect("index should fit in usize");
    state.block_roots[index] = previous_root;

    state.into()
}

/// Records the attested slot and signature data of every call.
#[derive(Default)]
pub struct RecordingPersister {
    calls: Mutex<Vec<(Slot, SyncSignatureData<Minimal>)>>,
}

impl RecordingPersister {
    pub fn calls(&self) -> Vec<(Slot, SyncSignatureData<Minimal>)> {
        self.calls.lock().clone()
    }
}

impl UpdatePersister<Minimal> for RecordingPersister {
    fn persist_best_finalized_update(
        &self,
        attested: &SyncAttestedData<Minimal>,
        signature_data: &SyncSignatureData<Minimal>,
    ) -> Result<Option<SyncCommitteePeriod>> {
        self.calls
            .lock()
            .push((attested.header.slot, signature_data.clone()));

        Ok(None)
    }

    fn persist_best_non_finalized_update(
        &self,
        attested: &SyncAttestedData<Minimal>,
        signature_data: &SyncSignatureData<Minimal>,
        _finalized_period: Option<SyncCommitteePeriod>,
    ) -> Result<()> {
        self.calls
            .lock()
            .push((attested.header.slot, signature_data.clone()));

        Ok(())
    }
}
