use std::sync::Arc;

use bls::{AggregateSignature, PublicKey};
use helper_functions::{accessors, misc, predicates, signing::SignForSingleFork};
use log::debug;
use snap::raw::Decoder;
use ssz::Decode as _;
use strum::Display;
use typenum::Unsigned as _;
use types::{
    altair::{
        consts::{SyncCommitteeSubnetCount, DOMAIN_SYNC_COMMITTEE},
        containers::{SignedContributionAndProof, SyncAggregatorSelectionData},
    },
    config::Config,
    preset::Preset,
    traits::BeaconState as _,
};

use crate::{
    config::ValidatorConfig,
    events::{OperationEvent, OperationNotifier},
    message::{GossipMessage, MessageAcceptance, PeerId},
    seen_cache::SeenSyncContribution,
    traits::{ChainInfo, StateGen, SyncStatus, TimeSource},
};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Ignored {
    Syncing,
    SlotOutsideClockDisparity,
    BlockOrStateUnavailable,
    AlreadySeen,
    StateUnavailable,
    SubcommitteeUnavailable,
    UnknownAggregator,
    InvalidParticipantPublicKey,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Rejection {
    PayloadTooLarge,
    Undecodable,
    SubcommitteeIndexOutOfRange,
    NotAggregator,
    PreAltairState,
    AggregatorNotInSubcommittee,
    InvalidSelectionProof,
    InvalidContributionAndProofSignature,
    MalformedAggregateSignature,
    InvalidAggregateSignature,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ValidationFailure {
    Ignore(Ignored),
    Reject(Rejection),
}

impl From<Ignored> for ValidationFailure {
    fn from(reason: Ignored) -> Self {
        Self::Ignore(reason)
    }
}

impl From<Rejection> for ValidationFailure {
    fn from(reason: Rejection) -> Self {
        Self::Reject(reason)
    }
}

pub struct Collaborators<P: Preset> {
    pub state_gen: Arc<dyn StateGen<P>>,
    pub sync_status: Arc<dyn SyncStatus>,
    pub chain_info: Arc<dyn ChainInfo>,
    pub time_source: Arc<dyn TimeSource>,
    pub operation_notifier: OperationNotifier<P>,
}

/// Gossip validator for the `sync_committee_contribution_and_proof` topic.
pub struct ContributionValidator<P: Preset> {
    config: Arc<Config>,
    validator_config: ValidatorConfig,
    local_peer_id: PeerId,
    collaborators: Collaborators<P>,
    seen: SeenSyncContribution,
}

impl<P: Preset> ContributionValidator<P> {
    #[must_use]
    pub fn new(
        config: Arc<Config>,
        validator_config: ValidatorConfig,
        local_peer_id: PeerId,
        collaborators: Collaborators<P>,
    ) -> Self {
        Self {
            config,
            validator_config,
            local_peer_id,
            collaborators,
            seen: SeenSyncContribution::new(validator_config.seen_cache_size),
        }
    }

    #[must_use]
    pub const fn seen(&self) -> &SeenSyncContribution {
        &self.seen
    }

    pub fn validate(&self, source: PeerId, message: &mut GossipMessage<P>) -> MessageAcceptance {
        match self.validate_with_reason(source, message) {
            Ok(()) => MessageAcceptance::Accept,
            Err(ValidationFailure::Ignore(reason)) => {
                debug!(
                    "sync committee contribution ignored (reason: {reason}, source: {source:?})",
                );
                MessageAcceptance::Ignore
            }
            Err(ValidationFailure::Reject(reason)) => {
                debug!(
                    "sync committee contribution rejected (reason: {reason}, source: {source:?})",
                );
                MessageAcceptance::Reject
            }
        }
    }

    /// Runs the checks in order and stops at the first one that fails.
    ///
    /// On success `message.validated` holds the decoded contribution, unless the message was
    /// published by the local node, which is accepted without being decoded.
    pub fn validate_with_reason(
        &self,
        source: PeerId,
        message: &mut GossipMessage<P>,
    ) -> Result<(), ValidationFailure> {
        if source == self.local_peer_id {
            return Ok(());
        }

        let Collaborators {
            state_gen,
            sync_status,
            chain_info,
            time_source,
            operation_notifier,
        } = &self.collaborators;

        if sync_status.is_syncing() {
            return Err(Ignored::Syncing.into());
        }

        let signed_contribution_and_proof = self.decode(&message.data)?;

        let SignedContributionAndProof {
            message: contribution_and_proof,
            signature,
        } = &signed_contribution_and_proof;

        let contribution = &contribution_and_proof.contribution;
        let aggregator_index = contribution_and_proof.aggregator_index;
        let slot = contribution.slot;
        let subcommittee_index = contribution.subcommittee_index;

        // Subscribers receive the contribution even if a later check fails.
        operation_notifier
            .send(OperationEvent::SyncContributionReceived {
                contribution_and_proof: Arc::new(contribution_and_proof.clone()),
            })
            .ok();

        if !misc::is_slot_within_gossip_clock_disparity(
            &self.config,
            chain_info.genesis_time(),
            slot,
            time_source.now(),
        ) {
            return Err(Ignored::SlotOutsideClockDisparity.into());
        }

        if !chain_info.has_block_and_state(contribution.beacon_block_root) {
            return Err(Ignored::BlockOrStateUnavailable.into());
        }

        if subcommittee_index >= SyncCommitteeSubnetCount::U64 {
            return Err(Rejection::SubcommitteeIndexOutOfRange.into());
        }

        let seen_key = SeenSyncContribution::key(aggregator_index, slot, subcommittee_index);

        if self.seen.contains(&seen_key) {
            return Err(Ignored::AlreadySeen.into());
        }

        if !predicates::is_sync_committee_aggregator::<P>(contribution_and_proof.selection_proof) {
            return Err(Rejection::NotAggregator.into());
        }

        let state = state_gen
            .state_by_root(contribution.beacon_block_root)
            .map_err(|_| Ignored::StateUnavailable)?;

        let state = state.post_altair().ok_or(Rejection::PreAltairState)?;

        let subcommittee_pubkeys =
            accessors::get_sync_subcommittee_pubkeys(state, subcommittee_index)
                .map_err(|_| Ignored::SubcommitteeUnavailable)?;

        let aggregator_pubkey = usize::try_from(aggregator_index)
            .ok()
            .and_then(|index| state.validators().get(index))
            .map(|validator| validator.pubkey)
            .ok_or(Ignored::UnknownAggregator)?;

        if !subcommittee_pubkeys.contains(&aggregator_pubkey) {
            return Err(Rejection::AggregatorNotInSubcommittee.into());
        }

        let aggregator_public_key =
            PublicKey::try_from(aggregator_pubkey).map_err(|_| Rejection::InvalidSelectionProof)?;

        let selection_data = SyncAggregatorSelectionData {
            slot,
            subcommittee_index,
        };

        SignForSingleFork::<P>::verify_at_state_epoch(
            &selection_data,
            &self.config,
            state,
            contribution_and_proof.selection_proof,
            &aggregator_public_key,
        )
        .map_err(|_| Rejection::InvalidSelectionProof)?;

        contribution_and_proof
            .verify_at_state_epoch(&self.config, state, *signature, &aggregator_public_key)
            .map_err(|_| Rejection::InvalidContributionAndProofSignature)?;

        let participant_public_keys = subcommittee_pubkeys
            .iter()
            .zip(contribution.aggregation_bits.iter())
            .filter(|(_, participated)| *participated)
            .map(|(pubkey, _)| PublicKey::try_from(*pubkey))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Ignored::InvalidParticipantPublicKey)?;

        let aggregate_signature = AggregateSignature::try_from(contribution.signature)
            .map_err(|_| Rejection::MalformedAggregateSignature)?;

        let domain = accessors::get_domain(&self.config, state, DOMAIN_SYNC_COMMITTEE, None);
        let signing_root = misc::compute_signing_root(&contribution.beacon_block_root, domain);

        if !aggregate_signature.fast_aggregate_verify(signing_root, &participant_public_keys) {
            return Err(Rejection::InvalidAggregateSignature.into());
        }

        self.seen.insert(seen_key);
        message.validated = Some(Arc::new(signed_contribution_and_proof));

        Ok(())
    }

    fn decode(&self, data: &[u8]) -> Result<SignedContributionAndProof<P>, Rejection> {
        let length = snap::raw::decompress_len(data).map_err(|_| Rejection::Undecodable)?;

        if length > self.validator_config.max_gossip_size {
            return Err(Rejection::PayloadTooLarge);
        }

        let bytes = Decoder::new()
            .decompress_vec(data)
            .map_err(|_| Rejection::Undecodable)?;

        SignedContributionAndProof::from_ssz_bytes(&bytes).map_err(|_| Rejection::Undecodable)
    }
}
