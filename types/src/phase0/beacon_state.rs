use ssz_derive::{Decode, Encode};
use ssz_types::{BitVector, FixedVector, VariableList};
use tree_hash::TreeHash as _;
use tree_hash_derive::TreeHash;

use crate::{
    phase0::{
        consts::JustificationBitsLength,
        containers::{
            BeaconBlockHeader, Checkpoint, Eth1Data, Fork, PendingAttestation, Validator,
        },
        primitives::{DepositIndex, Gwei, Slot, UnixSeconds, H256},
    },
    preset::Preset,
};

#[derive(Clone, PartialEq, Default, Debug, Encode, Decode, TreeHash)]
pub struct BeaconState<P: Preset> {
    // > Versioning
    pub genesis_time: UnixSeconds,
    pub genesis_validators_root: H256,
    pub slot: Slot,
    pub fork: Fork,

    // > History
    pub latest_block_header: BeaconBlockHeader,
    pub block_roots: FixedVector<H256, P::SlotsPerHistoricalRoot>,
    pub state_roots: FixedVector<H256, P::SlotsPerHistoricalRoot>,
    pub historical_roots: VariableList<H256, P::HistoricalRootsLimit>,

    // > Eth1
    pub eth1_data: Eth1Data,
    pub eth1_data_votes: VariableList<Eth1Data, P::SlotsPerEth1VotingPeriod>,
    pub eth1_deposit_index: DepositIndex,

    // > Registry
    pub validators: VariableList<Validator, P::ValidatorRegistryLimit>,
    pub balances: VariableList<Gwei, P::ValidatorRegistryLimit>,

    // > Randomness
    pub randao_mixes: FixedVector<H256, P::EpochsPerHistoricalVector>,

    // > Slashings
    pub slashings: FixedVector<Gwei, P::EpochsPerSlashingsVector>,

    // > Attestations
    pub previous_epoch_attestations:
        VariableList<PendingAttestation<P>, P::PendingAttestationsLimit>,
    pub current_epoch_attestations:
        VariableList<PendingAttestation<P>, P::PendingAttestationsLimit>,

    // > Finality
    pub justification_bits: BitVector<JustificationBitsLength>,
    pub previous_justified_checkpoint: Checkpoint,
    pub current_justified_checkpoint: Checkpoint,
    pub finalized_checkpoint: Checkpoint,
}

impl<P: Preset> BeaconState<P> {
    /// Roots of the top-level fields in declaration order.
    #[must_use]
    pub(crate) fn merkle_leaves(&self) -> Vec<H256> {
        vec![
            self.genesis_time.tree_hash_root(),
            self.genesis_validators_root.tree_hash_root(),
            self.slot.tree_hash_root(),
            self.fork.tree_hash_root(),
            self.latest_block_header.tree_hash_root(),
            self.block_roots.tree_hash_root(),
            self.state_roots.tree_hash_root(),
            self.historical_roots.tree_hash_root(),
            self.eth1_data.tree_hash_root(),
            self.eth1_data_votes.tree_hash_root(),
            self.eth1_deposit_index.tree_hash_root(),
            self.validators.tree_hash_root(),
            self.balances.tree_hash_root(),
            self.randao_mixes.tree_hash_root(),
            self.slashings.tree_hash_root(),
            self.previous_epoch_attestations.tree_hash_root(),
            self.current_epoch_attestations.tree_hash_root(),
            self.justification_bits.tree_hash_root(),
            self.previous_justified_checkpoint.tree_hash_root(),
            self.current_justified_checkpoint.tree_hash_root(),
            self.finalized_checkpoint.tree_hash_root(),
        ]
    }
}
