use std::sync::Arc;

use anyhow::Result;
use types::{
    altair::primitives::SyncCommitteePeriod,
    combined::{BeaconState, SignedBeaconBlock},
    phase0::{containers::BeaconBlockHeader, primitives::H256},
    preset::Preset,
};

use crate::{prev_head_data::SyncAttestedData, sync_update::SyncSignatureData};

pub trait HeadFetcher<P: Preset>: Send + Sync {
    fn head_block(&self) -> Result<Option<Arc<SignedBeaconBlock<P>>>>;
    fn head_state(&self) -> Result<Option<Arc<BeaconState<P>>>>;
}

pub trait UpdatePersister<P: Preset>: Send + Sync {
    /// Returns the sync committee period a finalized update was stored for, if any.
    fn persist_best_finalized_update(
        &self,
        attested: &SyncAttestedData<P>,
        signature_data: &SyncSignatureData<P>,
    ) -> Result<Option<SyncCommitteePeriod>>;

    fn persist_best_non_finalized_update(
        &self,
        attested: &SyncAttestedData<P>,
        signature_data: &SyncSignatureData<P>,
        finalized_period: Option<SyncCommitteePeriod>,
    ) -> Result<()>;
}

impl<P: Preset, U: UpdatePersister<P>> UpdatePersister<P> for Arc<U> {
    fn persist_best_finalized_update(
        &self,
        attested: &SyncAttestedData<P>,
        signature_data: &SyncSignatureData<P>,
    ) -> Result<Option<SyncCommitteePeriod>> {
        self.as_ref()
            .persist_best_finalized_update(attested, signature_data)
    }

    fn persist_best_non_finalized_update(
        &self,
        attested: &SyncAttestedData<P>,
        signature_data: &SyncSignatureData<P>,
        finalized_period: Option<SyncCommitteePeriod>,
    ) -> Result<()> {
        self.as_ref()
            .persist_best_non_finalized_update(attested, signature_data, finalized_period)
    }
}

pub trait FinalizedHeaderSource: Send + Sync {
    fn block_header_by_root(&self, root: H256) -> Result<Option<BeaconBlockHeader>>;
}
