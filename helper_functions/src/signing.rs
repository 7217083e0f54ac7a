use anyhow::{ensure, Result};
use bls::{PublicKey, SecretKey, Signature, SignatureBytes};
use tree_hash::TreeHash;
use types::{
    altair::{
        consts::{DOMAIN_CONTRIBUTION_AND_PROOF, DOMAIN_SYNC_COMMITTEE_SELECTION_PROOF},
        containers::{ContributionAndProof, SyncAggregatorSelectionData},
    },
    config::Config,
    phase0::primitives::{DomainType, Epoch, H256},
    preset::Preset,
    traits::BeaconState,
};

use crate::{
    accessors,
    error::{Error, SignatureKind},
    misc,
};

pub trait SignForSingleFork<P: Preset>: TreeHash {
    const DOMAIN_TYPE: DomainType;
    const SIGNATURE_KIND: SignatureKind;

    fn epoch(&self) -> Epoch;

    fn signing_root(&self, config: &Config, beacon_state: &(impl BeaconState<P> + ?Sized)) -> H256 {
        let domain =
            accessors::get_domain(config, beacon_state, Self::DOMAIN_TYPE, Some(self.epoch()));

        misc::compute_signing_root(self, domain)
    }

    /// Like [`SignForSingleFork::signing_root`], but with the domain taken at the current epoch
    /// of `beacon_state`. Gossip validation resolves domains this way.
    fn signing_root_at_state_epoch(
        &self,
        config: &Config,
        beacon_state: &(impl BeaconState<P> + ?Sized),
    ) -> H256 {
        let domain = accessors::get_domain(config, beacon_state, Self::DOMAIN_TYPE, None);

        misc::compute_signing_root(self, domain)
    }

    fn sign(
        &self,
        config: &Config,
        beacon_state: &(impl BeaconState<P> + ?Sized),
        secret_key: &SecretKey,
    ) -> Signature {
        secret_key.sign(self.signing_root(config, beacon_state))
    }

    fn verify_at_state_epoch(
        &self,
        config: &Config,
        beacon_state: &(impl BeaconState<P> + ?Sized),
        signature_bytes: SignatureBytes,
        public_key: &PublicKey,
    ) -> Result<()> {
        verify_signature(
            self.signing_root_at_state_epoch(config, beacon_state),
            signature_bytes,
            public_key,
            Self::SIGNATURE_KIND,
        )
    }
}

impl<P: Preset> SignForSingleFork<P> for SyncAggregatorSelectionData {
    const DOMAIN_TYPE: DomainType = DOMAIN_SYNC_COMMITTEE_SELECTION_PROOF;
    const SIGNATURE_KIND: SignatureKind = SignatureKind::SyncCommitteeSelectionProof;

    fn epoch(&self) -> Epoch {
        misc::compute_epoch_at_slot::<P>(self.slot)
    }
}

impl<P: Preset> SignForSingleFork<P> for ContributionAndProof<P> {
    const DOMAIN_TYPE: DomainType = DOMAIN_CONTRIBUTION_AND_PROOF;
    const SIGNATURE_KIND: SignatureKind = SignatureKind::ContributionAndProof;

    fn epoch(&self) -> Epoch {
        misc::compute_epoch_at_slot::<P>(self.contribution.slot)
    }
}

pub fn verify_signature(
    signing_root: H256,
    signature_bytes: SignatureBytes,
    public_key: &PublicKey,
    signature_kind: SignatureKind,
) -> Result<()> {
    let signature = Signature::try_from(signature_bytes)?;

    ensure!(
        signature.verify(signing_root, public_key),
        Error::SignatureInvalid(signature_kind),
    );

    Ok(())
}
