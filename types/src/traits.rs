use core::fmt::Debug;
use std::sync::Arc;

use bls::SignatureBytes;
use duplicate::duplicate_item;
use ssz_types::{FixedVector, VariableList};
use tree_hash::TreeHash as _;

use crate::{
    altair::{
        beacon_state::BeaconState as AltairBeaconState,
        containers::{
            BeaconBlock as AltairBeaconBlock, BeaconBlockBody as AltairBeaconBlockBody,
            SyncAggregate, SyncCommittee,
        },
    },
    bellatrix::{
        beacon_state::BeaconState as BellatrixBeaconState,
        containers::{
            BeaconBlock as BellatrixBeaconBlock, BeaconBlockBody as BellatrixBeaconBlockBody,
            BlindedBeaconBlock as BellatrixBlindedBeaconBlock,
            BlindedBeaconBlockBody as BellatrixBlindedBeaconBlockBody, ExecutionPayload,
            ExecutionPayloadHeader,
        },
    },
    combined::{
        BeaconBlock as CombinedBeaconBlock, BeaconState as CombinedBeaconState,
        SignedBeaconBlock as CombinedSignedBeaconBlock,
    },
    phase0::{
        beacon_state::BeaconState as Phase0BeaconState,
        containers::{
            Attestation, AttesterSlashing, BeaconBlock as Phase0BeaconBlock,
            BeaconBlockBody as Phase0BeaconBlockBody, BeaconBlockHeader, Checkpoint, Deposit,
            Eth1Data, Fork, ProposerSlashing, SignedVoluntaryExit, Validator,
        },
        primitives::{Slot, UnixSeconds, ValidatorIndex, H256},
    },
    preset::Preset,
};

pub trait BeaconState<P: Preset>: Debug + Send + Sync {
    fn genesis_time(&self) -> UnixSeconds;
    fn genesis_validators_root(&self) -> H256;
    fn slot(&self) -> Slot;
    fn fork(&self) -> Fork;
    fn latest_block_header(&self) -> BeaconBlockHeader;
    fn block_roots(&self) -> &FixedVector<H256, P::SlotsPerHistoricalRoot>;
    fn validators(&self) -> &VariableList<Validator, P::ValidatorRegistryLimit>;
    fn finalized_checkpoint(&self) -> Checkpoint;

    /// Roots of the top-level fields, i.e. the leaves of the tree whose root is
    /// [`BeaconState::hash_tree_root`].
    fn field_roots(&self) -> Vec<H256>;
    fn hash_tree_root(&self) -> H256;

    fn post_altair(&self) -> Option<&dyn PostAltairBeaconState<P>>;
}

#[duplicate_item(
    parameters
    implementor
    get_copy(field)
    get_ref(field)
    field_roots_body
    hash_tree_root_body
    post_altair_body;

    [P: Preset, S: BeaconState<P>]
    [Arc<S>]
    [self.as_ref().field()]
    [self.as_ref().field()]
    [self.as_ref().field_roots()]
    [self.as_ref().hash_tree_root()]
    [self.as_ref().post_altair()];

    [P: Preset]
    [Phase0BeaconState<P>]
    [self.field]
    [&self.field]
    [self.merkle_leaves()]
    [self.tree_hash_root()]
    [None];

    [P: Preset]
    [AltairBeaconState<P>]
    [self.field]
    [&self.field]
    [self.merkle_leaves()]
    [self.tree_hash_root()]
    [Some(self)];

    [P: Preset]
    [BellatrixBeaconState<P>]
    [self.field]
    [&self.field]
    [self.merkle_leaves()]
    [self.tree_hash_root()]
    [Some(self)];

    [P: Preset]
    [CombinedBeaconState<P>]
    [
        match self {
            Self::Phase0(state) => state.field,
            Self::Altair(state) => state.field,
            Self::Bellatrix(state) => state.field,
        }
    ]
    [
        match self {
            Self::Phase0(state) => &state.field,
            Self::Altair(state) => &state.field,
            Self::Bellatrix(state) => &state.field,
        }
    ]
    [
        match self {
            Self::Phase0(state) => state.merkle_leaves(),
            Self::Altair(state) => state.merkle_leaves(),
            Self::Bellatrix(state) => state.merkle_leaves(),
        }
    ]
    [
        match self {
            Self::Phase0(state) => state.tree_hash_root(),
            Self::Altair(state) => state.tree_hash_root(),
            Self::Bellatrix(state) => state.tree_hash_root(),
        }
    ]
    [
        match self {
            Self::Phase0(_) => None,
            Self::Altair(state) => Some(state),
            Self::Bellatrix(state) => Some(state),
        }
    ];
)]
impl<parameters> BeaconState<P> for implementor {
    #[duplicate_item(
        field                     return_type;
        [genesis_time]            [UnixSeconds];
        [genesis_validators_root] [H256];
        [slot]                    [Slot];
        [fork]                    [Fork];
        [latest_block_header]     [BeaconBlockHeader];
        [finalized_checkpoint]    [Checkpoint];
    )]
    fn field(&self) -> return_type {
        get_copy([field])
    }

    #[duplicate_item(
        field         return_type;
        [block_roots] [FixedVector<H256, P::SlotsPerHistoricalRoot>];
        [validators]  [VariableList<Validator, P::ValidatorRegistryLimit>];
    )]
    fn field(&self) -> &return_type {
        get_ref([field])
    }

    fn field_roots(&self) -> Vec<H256> {
        field_roots_body
    }

    fn hash_tree_root(&self) -> H256 {
        hash_tree_root_body
    }

    fn post_altair(&self) -> Option<&dyn PostAltairBeaconState<P>> {
        post_altair_body
    }
}

pub trait PostAltairBeaconState<P: Preset>: BeaconState<P> {
    fn current_sync_committee(&self) -> &SyncCommittee<P>;
    fn next_sync_committee(&self) -> &SyncCommittee<P>;
}

#[duplicate_item(
    implementor;
    [AltairBeaconState<P>];
    [BellatrixBeaconState<P>];
)]
impl<P: Preset> PostAltairBeaconState<P> for implementor {
    fn current_sync_committee(&self) -> &SyncCommittee<P> {
        &self.current_sync_committee
    }

    fn next_sync_committee(&self) -> &SyncCommittee<P> {
        &self.next_sync_committee
    }
}

pub trait SignedBeaconBlock<P: Preset>: Debug + Send + Sync {
    type Message: BeaconBlock<P> + ?Sized;

    fn message(&self) -> &Self::Message;
    fn signature(&self) -> SignatureBytes;
}

impl<P: Preset, B: SignedBeaconBlock<P>> SignedBeaconBlock<P> for Arc<B> {
    type Message = B::Message;

    fn message(&self) -> &Self::Message {
        self.as_ref().message()
    }

    fn signature(&self) -> SignatureBytes {
        self.as_ref().signature()
    }
}

impl<P: Preset> SignedBeaconBlock<P> for CombinedSignedBeaconBlock<P> {
    type Message = dyn BeaconBlock<P>;

    fn message(&self) -> &Self::Message {
        match self {
            Self::Phase0(block) => &block.message,
            Self::Altair(block) => &block.message,
            Self::Bellatrix(block) => &block.message,
            Self::BellatrixBlinded(block) => &block.message,
        }
    }

    fn signature(&self) -> SignatureBytes {
        match self {
            Self::Phase0(block) => block.signature,
            Self::Altair(block) => block.signature,
            Self::Bellatrix(block) => block.signature,
            Self::BellatrixBlinded(block) => block.signature,
        }
    }
}

pub trait BeaconBlock<P: Preset>: Debug + Send + Sync {
    fn slot(&self) -> Slot;
    fn proposer_index(&self) -> ValidatorIndex;
    fn parent_root(&self) -> H256;
    fn state_root(&self) -> H256;
    fn body(&self) -> &dyn BeaconBlockBody<P>;
    fn hash_tree_root(&self) -> H256;

    fn to_header(&self) -> BeaconBlockHeader {
        BeaconBlockHeader {
            slot: self.slot(),
            proposer_index: self.proposer_index(),
            parent_root: self.parent_root(),
            state_root: self.state_root(),
            body_root: self.body().hash_tree_root(),
        }
    }
}

#[duplicate_item(
    implementor                      get_copy(field) get_ref(field) hash_tree_root_body;

    [Phase0BeaconBlock<P>]           [self.field]    [&self.field]  [self.tree_hash_root()];
    [AltairBeaconBlock<P>]           [self.field]    [&self.field]  [self.tree_hash_root()];
    [BellatrixBeaconBlock<P>]        [self.field]    [&self.field]  [self.tree_hash_root()];
    [BellatrixBlindedBeaconBlock<P>] [self.field]    [&self.field]  [self.tree_hash_root()];

    [CombinedBeaconBlock<P>]
    [
        match self {
            Self::Phase0(block) => block.field,
            Self::Altair(block) => block.field,
            Self::Bellatrix(block) => block.field,
            Self::BellatrixBlinded(block) => block.field,
        }
    ]
    [
        match self {
            Self::Phase0(block) => &block.field,
            Self::Altair(block) => &block.field,
            Self::Bellatrix(block) => &block.field,
            Self::BellatrixBlinded(block) => &block.field,
        }
    ]
    [
        match self {
            Self::Phase0(block) => block.tree_hash_root(),
            Self::Altair(block) => block.tree_hash_root(),
            Self::Bellatrix(block) => block.tree_hash_root(),
            Self::BellatrixBlinded(block) => block.tree_hash_root(),
        }
    ];
)]
impl<P: Preset> BeaconBlock<P> for implementor {
    fn slot(&self) -> Slot {
        get_copy([slot])
    }

    fn proposer_index(&self) -> ValidatorIndex {
        get_copy([proposer_index])
    }

    fn parent_root(&self) -> H256 {
        get_copy([parent_root])
    }

    fn state_root(&self) -> H256 {
        get_copy([state_root])
    }

    fn body(&self) -> &dyn BeaconBlockBody<P> {
        get_ref([body])
    }

    fn hash_tree_root(&self) -> H256 {
        hash_tree_root_body
    }
}

pub trait BeaconBlockBody<P: Preset>: Debug + Send + Sync {
    fn randao_reveal(&self) -> SignatureBytes;
    fn eth1_data(&self) -> Eth1Data;
    fn graffiti(&self) -> H256;
    fn proposer_slashings(&self) -> &VariableList<ProposerSlashing, P::MaxProposerSlashings>;
    fn attester_slashings(&self) -> &VariableList<AttesterSlashing<P>, P::MaxAttesterSlashings>;
    fn attestations(&self) -> &VariableList<Attestation<P>, P::MaxAttestations>;
    fn deposits(&self) -> &VariableList<Deposit, P::MaxDeposits>;
    fn voluntary_exits(&self) -> &VariableList<SignedVoluntaryExit, P::MaxVoluntaryExits>;
    fn hash_tree_root(&self) -> H256;

    fn post_altair(&self) -> Option<&dyn PostAltairBeaconBlockBody<P>>;
    fn post_bellatrix(&self) -> Option<&dyn PostBellatrixBeaconBlockBody<P>>;
    fn post_bellatrix_blinded(&self) -> Option<&dyn PostBellatrixBlindedBeaconBlockBody<P>>;
}

#[duplicate_item(
    implementor                          post_altair_body post_bellatrix_body post_bellatrix_blinded_body;

    [Phase0BeaconBlockBody<P>]           [None]           [None]              [None];
    [AltairBeaconBlockBody<P>]           [Some(self)]     [None]              [None];
    [BellatrixBeaconBlockBody<P>]        [Some(self)]     [Some(self)]        [None];

    // `BlindedBeaconBlockBody` does not implement `PostBellatrixBeaconBlockBody`
    // because it does not have an `execution_payload` field.
    [BellatrixBlindedBeaconBlockBody<P>] [Some(self)]     [None]              [Some(self)];
)]
impl<P: Preset> BeaconBlockBody<P> for implementor {
    fn randao_reveal(&self) -> SignatureBytes {
        self.randao_reveal
    }

    fn eth1_data(&self) -> Eth1Data {
        self.eth1_data
    }

    fn graffiti(&self) -> H256 {
        self.graffiti
    }

    fn proposer_slashings(&self) -> &VariableList<ProposerSlashing, P::MaxProposerSlashings> {
        &self.proposer_slashings
    }

    fn attester_slashings(&self) -> &VariableList<AttesterSlashing<P>, P::MaxAttesterSlashings> {
        &self.attester_slashings
    }

    fn attestations(&self) -> &VariableList<Attestation<P>, P::MaxAttestations> {
        &self.attestations
    }

    fn deposits(&self) -> &VariableList<Deposit, P::MaxDeposits> {
        &self.deposits
    }

    fn voluntary_exits(&self) -> &VariableList<SignedVoluntaryExit, P::MaxVoluntaryExits> {
        &self.voluntary_exits
    }

    fn hash_tree_root(&self) -> H256 {
        self.tree_hash_root()
    }

    fn post_altair(&self) -> Option<&dyn PostAltairBeaconBlockBody<P>> {
        post_altair_body
    }

    fn post_bellatrix(&self) -> Option<&dyn PostBellatrixBeaconBlockBody<P>> {
        post_bellatrix_body
    }

    fn post_bellatrix_blinded(&self) -> Option<&dyn PostBellatrixBlindedBeaconBlockBody<P>> {
        post_bellatrix_blinded_body
    }
}

pub trait PostAltairBeaconBlockBody<P: Preset>: BeaconBlockBody<P> {
    fn sync_aggregate(&self) -> &SyncAggregate<P>;
}

#[duplicate_item(
    implementor;
    [AltairBeaconBlockBody<P>];
    [BellatrixBeaconBlockBody<P>];
    [BellatrixBlindedBeaconBlockBody<P>];
)]
impl<P: Preset> PostAltairBeaconBlockBody<P> for implementor {
    fn sync_aggregate(&self) -> &SyncAggregate<P> {
        &self.sync_aggregate
    }
}

pub trait PostBellatrixBeaconBlockBody<P: Preset>: PostAltairBeaconBlockBody<P> {
    fn execution_payload(&self) -> &ExecutionPayload<P>;
}

impl<P: Preset> PostBellatrixBeaconBlockBody<P> for BellatrixBeaconBlockBody<P> {
    fn execution_payload(&self) -> &ExecutionPayload<P> {
        &self.execution_payload
    }
}

pub trait PostBellatrixBlindedBeaconBlockBody<P: Preset>: PostAltairBeaconBlockBody<P> {
    fn execution_payload_header(&self) -> &ExecutionPayloadHeader<P>;
}

impl<P: Preset> PostBellatrixBlindedBeaconBlockBody<P> for BellatrixBlindedBeaconBlockBody<P> {
    fn execution_payload_header(&self) -> &ExecutionPayloadHeader<P> {
        &self.execution_payload_header
    }
}
