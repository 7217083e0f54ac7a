use derive_more::From;
use duplicate::duplicate_item;
use enum_iterator::Sequence;
use serde::Serialize;
use ssz::{Decode as _, Encode};
use static_assertions::const_assert_eq;
use strum::Display;
use tree_hash::TreeHash as _;
use variant_count::VariantCount;

use crate::{
    altair::{
        beacon_state::BeaconState as AltairBeaconState,
        containers::{
            BeaconBlock as AltairBeaconBlock, SignedBeaconBlock as AltairSignedBeaconBlock,
            SyncAggregate,
        },
    },
    bellatrix::{
        beacon_state::BeaconState as BellatrixBeaconState,
        containers::{
            BeaconBlock as BellatrixBeaconBlock, BlindedBeaconBlock as BellatrixBlindedBeaconBlock,
            ExecutionPayload, ExecutionPayloadHeader,
            SignedBeaconBlock as BellatrixSignedBeaconBlock,
            SignedBlindedBeaconBlock as BellatrixSignedBlindedBeaconBlock,
        },
    },
    error::Error,
    nonstandard::Phase,
    phase0::{
        beacon_state::BeaconState as Phase0BeaconState,
        containers::{
            BeaconBlock as Phase0BeaconBlock, BeaconBlockHeader, SignedBeaconBlockHeader,
            SignedBeaconBlock as Phase0SignedBeaconBlock,
        },
        primitives::H256,
    },
    preset::{Mainnet, Preset},
    traits::{BeaconBlock as _, SignedBeaconBlock as _},
};

/// Block version as carried on the wire next to SSZ payloads.
///
/// The blinded Bellatrix version is separate from [`Phase`] because it changes the body
/// without changing the fork.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Sequence, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Version {
    Phase0,
    Altair,
    Bellatrix,
    BellatrixBlind,
}

impl TryFrom<u8> for Version {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Phase0),
            1 => Ok(Self::Altair),
            2 => Ok(Self::Bellatrix),
            3 => Ok(Self::BellatrixBlind),
            _ => Err(Error::UnknownVersionTag { tag }),
        }
    }
}

impl Version {
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Phase0 => 0,
            Self::Altair => 1,
            Self::Bellatrix => 2,
            Self::BellatrixBlind => 3,
        }
    }

    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            Self::Phase0 => Phase::Phase0,
            Self::Altair => Phase::Altair,
            Self::Bellatrix | Self::BellatrixBlind => Phase::Bellatrix,
        }
    }

    #[must_use]
    pub const fn is_blinded(self) -> bool {
        matches!(self, Self::BellatrixBlind)
    }
}

#[derive(Clone, PartialEq, Debug, From, VariantCount)]
pub enum BeaconState<P: Preset> {
    Phase0(Phase0BeaconState<P>),
    Altair(AltairBeaconState<P>),
    Bellatrix(BellatrixBeaconState<P>),
}

const_assert_eq!(BeaconState::<Mainnet>::VARIANT_COUNT, Phase::CARDINALITY);

impl<P: Preset> BeaconState<P> {
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Phase0(_) => Phase::Phase0,
            Self::Altair(_) => Phase::Altair,
            Self::Bellatrix(_) => Phase::Bellatrix,
        }
    }
}

#[derive(Clone, PartialEq, Debug, From, VariantCount, Serialize)]
#[serde(bound = "", untagged)]
pub enum SignedBeaconBlock<P: Preset> {
    Phase0(Phase0SignedBeaconBlock<P>),
    Altair(AltairSignedBeaconBlock<P>),
    Bellatrix(BellatrixSignedBeaconBlock<P>),
    BellatrixBlinded(BellatrixSignedBlindedBeaconBlock<P>),
}

const_assert_eq!(
    SignedBeaconBlock::<Mainnet>::VARIANT_COUNT,
    Version::CARDINALITY,
);

impl<P: Preset> SignedBeaconBlock<P> {
    /// Decodes a block whose version is known out of band.
    ///
    /// `blinded` may only be set for Bellatrix. [`Version::BellatrixBlind`] is blinded
    /// regardless of the flag.
    pub fn from_ssz_with_version(
        version: Version,
        blinded: bool,
        bytes: &[u8],
    ) -> Result<Self, Error> {
        let block = match (version, blinded) {
            (Version::Phase0, false) => {
                Self::Phase0(Phase0SignedBeaconBlock::from_ssz_bytes(bytes)?)
            }
            (Version::Altair, false) => {
                Self::Altair(AltairSignedBeaconBlock::from_ssz_bytes(bytes)?)
            }
            (Version::Bellatrix, false) => {
                Self::Bellatrix(BellatrixSignedBeaconBlock::from_ssz_bytes(bytes)?)
            }
            (Version::Bellatrix, true) | (Version::BellatrixBlind, _) => {
                Self::BellatrixBlinded(BellatrixSignedBlindedBeaconBlock::from_ssz_bytes(bytes)?)
            }
            (Version::Phase0 | Version::Altair, true) => {
                return Err(Error::IncorrectVersion { version, blinded })
            }
        };

        Ok(block)
    }

    #[must_use]
    pub const fn version(&self) -> Version {
        match self {
            Self::Phase0(_) => Version::Phase0,
            Self::Altair(_) => Version::Altair,
            Self::Bellatrix(_) => Version::Bellatrix,
            Self::BellatrixBlinded(_) => Version::BellatrixBlind,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.version().phase()
    }

    #[must_use]
    pub const fn is_blinded(&self) -> bool {
        self.version().is_blinded()
    }

    /// Always `false`. Missing blocks are represented with [`Option`].
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        false
    }

    #[must_use]
    pub fn hash_tree_root(&self) -> H256 {
        match self {
            Self::Phase0(block) => block.tree_hash_root(),
            Self::Altair(block) => block.tree_hash_root(),
            Self::Bellatrix(block) => block.tree_hash_root(),
            Self::BellatrixBlinded(block) => block.tree_hash_root(),
        }
    }

    #[must_use]
    pub fn to_header(&self) -> SignedBeaconBlockHeader {
        self.message().to_header().with_signature(self.signature())
    }

    #[must_use]
    pub fn split(self) -> (BeaconBlock<P>, bls::SignatureBytes) {
        match self {
            Self::Phase0(block) => (block.message.into(), block.signature),
            Self::Altair(block) => (block.message.into(), block.signature),
            Self::Bellatrix(block) => (block.message.into(), block.signature),
            Self::BellatrixBlinded(block) => (block.message.into(), block.signature),
        }
    }

    /// Builds the block part of a remote signing request.
    #[must_use]
    pub fn sign_request_object(&self) -> SigningBlock<'_, P> {
        match self {
            Self::Phase0(block) => SigningBlock::Phase0 {
                block: &block.message,
            },
            Self::Altair(block) => SigningBlock::Altair {
                block: &block.message,
            },
            Self::Bellatrix(block) => SigningBlock::Bellatrix {
                block_header: block.message.to_header(),
            },
            Self::BellatrixBlinded(block) => SigningBlock::Bellatrix {
                block_header: block.message.to_header(),
            },
        }
    }

    pub fn phase0(&self) -> Result<&Phase0SignedBeaconBlock<P>, Error> {
        match self {
            Self::Phase0(block) => Ok(block),
            _ => Err(self.not_supported("phase0 block")),
        }
    }

    pub fn altair(&self) -> Result<&AltairSignedBeaconBlock<P>, Error> {
        match self {
            Self::Altair(block) => Ok(block),
            _ => Err(self.not_supported("altair block")),
        }
    }

    pub fn bellatrix(&self) -> Result<&BellatrixSignedBeaconBlock<P>, Error> {
        match self {
            Self::Bellatrix(block) => Ok(block),
            _ => Err(self.not_supported("bellatrix block")),
        }
    }

    pub fn blinded_bellatrix(&self) -> Result<&BellatrixSignedBlindedBeaconBlock<P>, Error> {
        match self {
            Self::BellatrixBlinded(block) => Ok(block),
            _ => Err(self.not_supported("blinded bellatrix block")),
        }
    }

    pub fn sync_aggregate(&self) -> Result<&SyncAggregate<P>, Error> {
        self.message()
            .body()
            .post_altair()
            .map(|body| body.sync_aggregate())
            .ok_or_else(|| self.not_supported("sync_aggregate"))
    }

    pub fn execution_payload(&self) -> Result<&ExecutionPayload<P>, Error> {
        self.message()
            .body()
            .post_bellatrix()
            .map(|body| body.execution_payload())
            .ok_or_else(|| self.not_supported("execution_payload"))
    }

    pub fn execution_payload_header(&self) -> Result<&ExecutionPayloadHeader<P>, Error> {
        self.message()
            .body()
            .post_bellatrix_blinded()
            .map(|body| body.execution_payload_header())
            .ok_or_else(|| self.not_supported("execution_payload_header"))
    }

    const fn not_supported(&self, field: &'static str) -> Error {
        Error::NotSupportedForVersion {
            field,
            version: self.version(),
        }
    }
}

#[derive(Clone, PartialEq, Debug, From, VariantCount, Serialize)]
#[serde(bound = "", untagged)]
pub enum BeaconBlock<P: Preset> {
    Phase0(Phase0BeaconBlock<P>),
    Altair(AltairBeaconBlock<P>),
    Bellatrix(BellatrixBeaconBlock<P>),
    BellatrixBlinded(BellatrixBlindedBeaconBlock<P>),
}

const_assert_eq!(BeaconBlock::<Mainnet>::VARIANT_COUNT, Version::CARDINALITY);

impl<P: Preset> BeaconBlock<P> {
    /// Same version handling as [`SignedBeaconBlock::from_ssz_with_version`].
    pub fn from_ssz_with_version(
        version: Version,
        blinded: bool,
        bytes: &[u8],
    ) -> Result<Self, Error> {
        let block = match (version, blinded) {
            (Version::Phase0, false) => Self::Phase0(Phase0BeaconBlock::from_ssz_bytes(bytes)?),
            (Version::Altair, false) => Self::Altair(AltairBeaconBlock::from_ssz_bytes(bytes)?),
            (Version::Bellatrix, false) => {
                Self::Bellatrix(BellatrixBeaconBlock::from_ssz_bytes(bytes)?)
            }
            (Version::Bellatrix, true) | (Version::BellatrixBlind, _) => {
                Self::BellatrixBlinded(BellatrixBlindedBeaconBlock::from_ssz_bytes(bytes)?)
            }
            (Version::Phase0 | Version::Altair, true) => {
                return Err(Error::IncorrectVersion { version, blinded })
            }
        };

        Ok(block)
    }

    #[must_use]
    pub const fn version(&self) -> Version {
        match self {
            Self::Phase0(_) => Version::Phase0,
            Self::Altair(_) => Version::Altair,
            Self::Bellatrix(_) => Version::Bellatrix,
            Self::BellatrixBlinded(_) => Version::BellatrixBlind,
        }
    }

    #[must_use]
    pub const fn is_blinded(&self) -> bool {
        self.version().is_blinded()
    }

    #[must_use]
    pub fn with_signature(self, signature: bls::SignatureBytes) -> SignedBeaconBlock<P> {
        match self {
            Self::Phase0(message) => Phase0SignedBeaconBlock { message, signature }.into(),
            Self::Altair(message) => AltairSignedBeaconBlock { message, signature }.into(),
            Self::Bellatrix(message) => BellatrixSignedBeaconBlock { message, signature }.into(),
            Self::BellatrixBlinded(message) => {
                BellatrixSignedBlindedBeaconBlock { message, signature }.into()
            }
        }
    }
}

#[duplicate_item(
    implementor;
    [SignedBeaconBlock<P>];
    [BeaconBlock<P>];
)]
impl<P: Preset> Encode for implementor {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        match self {
            Self::Phase0(block) => block.ssz_append(buf),
            Self::Altair(block) => block.ssz_append(buf),
            Self::Bellatrix(block) => block.ssz_append(buf),
            Self::BellatrixBlinded(block) => block.ssz_append(buf),
        }
    }

    fn ssz_bytes_len(&self) -> usize {
        match self {
            Self::Phase0(block) => block.ssz_bytes_len(),
            Self::Altair(block) => block.ssz_bytes_len(),
            Self::Bellatrix(block) => block.ssz_bytes_len(),
            Self::BellatrixBlinded(block) => block.ssz_bytes_len(),
        }
    }
}

// Web3Signer expects signing requests for Bellatrix and later phases to contain a `block_header`
// field instead of `block`. See:
// - <https://github.com/ConsenSys/web3signer/pull/547>
// - <https://consensys.github.io/web3signer/web3signer-eth2.html#tag/Signing/operation/ETH2_SIGN>
#[derive(Debug, Serialize)]
#[serde(bound = "", rename_all = "UPPERCASE", tag = "version")]
pub enum SigningBlock<'block, P: Preset> {
    Phase0 { block: &'block Phase0BeaconBlock<P> },
    Altair { block: &'block AltairBeaconBlock<P> },
    Bellatrix { block_header: BeaconBlockHeader },
}

#[cfg(test)]
mod tests {
    use bls::SignatureBytes;
    use serde_json::json;
    use ssz_types::VariableList;
    use test_case::test_case;

    use crate::{
        bellatrix::{containers::BlindedBeaconBlockBody, primitives::Transaction},
        preset::Minimal,
        traits::SignedBeaconBlock as _,
    };

    use super::*;

    fn phase0_block() -> SignedBeaconBlock<Minimal> {
        Phase0SignedBeaconBlock {
            message: Phase0BeaconBlock {
                slot: 3,
                proposer_index: 7,
                parent_root: H256::repeat_byte(1),
                state_root: H256::repeat_byte(2),
                ..Phase0BeaconBlock::default()
            },
            signature: SignatureBytes::repeat_byte(3),
        }
        .into()
    }

    fn altair_block() -> SignedBeaconBlock<Minimal> {
        let mut block = AltairSignedBeaconBlock::<Minimal>::default();
        block.message.slot = 11;
        block.message.body.graffiti = H256::repeat_byte(4);
        block
            .message
            .body
            .sync_aggregate
            .sync_committee_bits
            .set(5, true)
            .expect("index 5 is within the sync committee");
        block.signature = SignatureBytes::repeat_byte(5);
        block.into()
    }

    fn bellatrix_block() -> SignedBeaconBlock<Minimal> {
        let mut block = BellatrixSignedBeaconBlock::<Minimal>::default();
        block.message.slot = 21;
        block.message.body.execution_payload.block_number = 99;
        let transaction = Transaction::<Minimal>::from(vec![1, 2, 3]);
        block.message.body.execution_payload.transactions = VariableList::from(vec![transaction]);
        block.signature = SignatureBytes::repeat_byte(6);
        block.into()
    }

    fn blinded_counterpart(
        block: &BellatrixSignedBeaconBlock<Minimal>,
    ) -> SignedBeaconBlock<Minimal> {
        let payload = &block.message.body.execution_payload;
        let body = &block.message.body;

        let execution_payload_header = ExecutionPayloadHeader {
            parent_hash: payload.parent_hash,
            fee_recipient: payload.fee_recipient,
            state_root: payload.state_root,
            receipts_root: payload.receipts_root,
            logs_bloom: payload.logs_bloom.clone(),
            prev_randao: payload.prev_randao,
            block_number: payload.block_number,
            gas_limit: payload.gas_limit,
            gas_used: payload.gas_used,
            timestamp: payload.timestamp,
            extra_data: payload.extra_data.clone(),
            base_fee_per_gas: payload.base_fee_per_gas,
            block_hash: payload.block_hash,
            transactions_root: payload.transactions.tree_hash_root(),
        };

        BellatrixSignedBlindedBeaconBlock {
            message: BellatrixBlindedBeaconBlock {
                slot: block.message.slot,
                proposer_index: block.message.proposer_index,
                parent_root: block.message.parent_root,
                state_root: block.message.state_root,
                body: BlindedBeaconBlockBody {
                    randao_reveal: body.randao_reveal,
                    eth1_data: body.eth1_data,
                    graffiti: body.graffiti,
                    proposer_slashings: body.proposer_slashings.clone(),
                    attester_slashings: body.attester_slashings.clone(),
                    attestations: body.attestations.clone(),
                    deposits: body.deposits.clone(),
                    voluntary_exits: body.voluntary_exits.clone(),
                    sync_aggregate: body.sync_aggregate.clone(),
                    execution_payload_header,
                },
            },
            signature: block.signature,
        }
        .into()
    }

    fn all_blocks() -> Vec<SignedBeaconBlock<Minimal>> {
        let bellatrix = bellatrix_block();
        let blinded = bellatrix
            .bellatrix()
            .map(blinded_counterpart)
            .expect("block is a Bellatrix block");

        vec![phase0_block(), altair_block(), bellatrix, blinded]
    }

    #[test]
    fn ssz_round_trips_for_every_version() -> Result<(), Error> {
        for block in all_blocks() {
            let bytes = block.as_ssz_bytes();

            assert_eq!(block.ssz_bytes_len(), bytes.len());

            let decoded = SignedBeaconBlock::from_ssz_with_version(
                block.version(),
                block.is_blinded(),
                &bytes,
            )?;

            assert_eq!(decoded, block);

            let (message, _) = block.split();
            let bytes = message.as_ssz_bytes();

            assert_eq!(message.ssz_bytes_len(), bytes.len());

            let decoded = BeaconBlock::from_ssz_with_version(
                message.version(),
                message.is_blinded(),
                &bytes,
            )?;

            assert_eq!(decoded, message);
        }

        Ok(())
    }

    #[test]
    fn bellatrix_with_blinded_flag_decodes_blinded_body() -> Result<(), Error> {
        let blinded = all_blocks().pop().expect("blinded block is last");
        let bytes = blinded.as_ssz_bytes();

        let decoded = SignedBeaconBlock::<Minimal>::from_ssz_with_version(
            Version::Bellatrix,
            true,
            &bytes,
        )?;

        assert_eq!(decoded.version(), Version::BellatrixBlind);
        assert_eq!(decoded, blinded);

        Ok(())
    }

    #[test_case(Version::Phase0)]
    #[test_case(Version::Altair)]
    fn pre_bellatrix_versions_cannot_be_blinded(version: Version) {
        let bytes = phase0_block().as_ssz_bytes();

        assert_eq!(
            SignedBeaconBlock::<Minimal>::from_ssz_with_version(version, true, &bytes),
            Err(Error::IncorrectVersion {
                version,
                blinded: true,
            }),
        );

        let (message, _) = phase0_block().split();

        assert_eq!(
            BeaconBlock::<Minimal>::from_ssz_with_version(version, true, &message.as_ssz_bytes()),
            Err(Error::IncorrectVersion {
                version,
                blinded: true,
            }),
        );
    }

    #[test]
    fn truncated_bytes_fail_to_decode() {
        let bytes = altair_block().as_ssz_bytes();

        let result = SignedBeaconBlock::<Minimal>::from_ssz_with_version(
            Version::Altair,
            false,
            &bytes[..bytes.len() / 2],
        );

        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test_case(0, Ok(Version::Phase0))]
    #[test_case(3, Ok(Version::BellatrixBlind))]
    #[test_case(4, Err(Error::UnknownVersionTag { tag: 4 }))]
    fn version_from_tag(tag: u8, expected: Result<Version, Error>) {
        assert_eq!(Version::try_from(tag), expected);
    }

    #[test]
    fn version_tags_round_trip() -> Result<(), Error> {
        for version in enum_iterator::all::<Version>() {
            assert_eq!(Version::try_from(version.tag())?, version);
        }

        Ok(())
    }

    #[test]
    fn clone_is_independent_of_original() {
        let original = altair_block();
        let mut copy = original.clone();

        if let SignedBeaconBlock::Altair(block) = &mut copy {
            block.message.slot += 1;
            block.message.body.graffiti = H256::zero();
        }

        assert_ne!(copy, original);
        assert_eq!(original.message().slot(), 11);
        assert_eq!(original.message().body().graffiti(), H256::repeat_byte(4));
    }

    #[test]
    fn typed_accessors_reject_other_versions() {
        let block = phase0_block();

        assert!(block.phase0().is_ok());
        assert_eq!(
            block.altair(),
            Err(Error::NotSupportedForVersion {
                field: "altair block",
                version: Version::Phase0,
            }),
        );
        assert_eq!(
            block.sync_aggregate(),
            Err(Error::NotSupportedForVersion {
                field: "sync_aggregate",
                version: Version::Phase0,
            }),
        );
    }

    #[test]
    fn body_accessors_follow_blinding() {
        let blocks = all_blocks();
        let full = &blocks[2];
        let blinded = &blocks[3];

        assert_eq!(
            full.execution_payload().map(|payload| payload.block_number),
            Ok(99),
        );
        assert!(full.execution_payload_header().is_err());
        assert!(blinded.execution_payload().is_err());
        assert_eq!(
            blinded.execution_payload_header().map(|header| header.block_number),
            Ok(99),
        );
        assert!(blinded.sync_aggregate().is_ok());
        assert!(blinded.blinded_bellatrix().is_ok());
        assert!(blinded.bellatrix().is_err());
    }

    #[test]
    fn altair_sync_aggregate_is_exposed() -> Result<(), Error> {
        assert_eq!(altair_block().sync_aggregate()?.num_participants(), 1);
        Ok(())
    }

    #[test]
    fn blinded_header_matches_full_header() {
        let blocks = all_blocks();

        assert_eq!(blocks[2].to_header(), blocks[3].to_header());
        assert_eq!(blocks[2].hash_tree_root(), blocks[3].hash_tree_root());
    }

    #[test]
    fn header_commits_to_body_and_keeps_signature() {
        for block in all_blocks() {
            let header = block.to_header();
            let message = block.message();

            assert_eq!(header.message.slot, message.slot());
            assert_eq!(header.message.proposer_index, message.proposer_index());
            assert_eq!(header.message.parent_root, message.parent_root());
            assert_eq!(header.message.state_root, message.state_root());
            assert_eq!(header.message.body_root, message.body().hash_tree_root());
            assert_eq!(header.message.tree_hash_root(), message.hash_tree_root());
            assert_eq!(header.signature, block.signature());
        }
    }

    #[derive(Clone, Copy, Debug)]
    enum Field {
        Slot,
        ProposerIndex,
        ParentRoot,
        StateRoot,
        Body,
        Signature,
    }

    macro_rules! change_message_field {
        ($message:ident, $field:expr, $change_body:expr) => {
            match $field {
                Field::Slot => $message.slot += 1,
                Field::ProposerIndex => $message.proposer_index += 1,
                Field::ParentRoot => $message.parent_root = H256::repeat_byte(0xf0),
                Field::StateRoot => $message.state_root = H256::repeat_byte(0xf1),
                Field::Body => $change_body,
                Field::Signature => {}
            }
        };
    }

    fn with_changed_field(
        block: SignedBeaconBlock<Minimal>,
        field: Field,
    ) -> SignedBeaconBlock<Minimal> {
        let (mut message, mut signature) = block.split();

        match &mut message {
            BeaconBlock::Phase0(message) => {
                change_message_field!(message, field, {
                    message.body.graffiti = H256::repeat_byte(0xf2);
                });
            }
            BeaconBlock::Altair(message) => {
                change_message_field!(message, field, {
                    message
                        .body
                        .sync_aggregate
                        .sync_committee_bits
                        .set(6, true)
                        .expect("index 6 is within the sync committee");
                });
            }
            BeaconBlock::Bellatrix(message) => {
                change_message_field!(message, field, {
                    message.body.execution_payload.gas_used += 1;
                });
            }
            BeaconBlock::BellatrixBlinded(message) => {
                change_message_field!(message, field, {
                    message.body.execution_payload_header.gas_used += 1;
                });
            }
        }

        if matches!(field, Field::Signature) {
            signature = SignatureBytes::zero();
        }

        message.with_signature(signature)
    }

    #[test_case(Field::Slot)]
    #[test_case(Field::ProposerIndex)]
    #[test_case(Field::ParentRoot)]
    #[test_case(Field::StateRoot)]
    #[test_case(Field::Body)]
    #[test_case(Field::Signature)]
    fn hash_tree_root_is_stable_and_field_sensitive(field: Field) {
        for block in all_blocks() {
            let version = block.version();
            let root = block.hash_tree_root();

            assert_eq!(block.clone().hash_tree_root(), root);

            let changed = with_changed_field(block, field);

            assert_eq!(changed.version(), version);
            assert_ne!(changed.hash_tree_root(), root, "{field:?} of {version}");
        }
    }

    #[test]
    fn beacon_states_compare_by_value() {
        let state = BeaconState::from(AltairBeaconState::<Minimal>::default());
        let mut changed = state.clone();

        assert_eq!(changed, state);

        if let BeaconState::Altair(inner) = &mut changed {
            inner.block_roots[1] = H256::repeat_byte(1);
        }

        assert_ne!(changed, state);
        assert_eq!(changed.phase(), Phase::Altair);
    }

    #[test]
    fn unsigned_block_encodes_like_its_variant() {
        let (message, _) = altair_block().split();

        let BeaconBlock::Altair(inner) = &message else {
            panic!("split should preserve the version");
        };

        assert_eq!(message.as_ssz_bytes(), inner.as_ssz_bytes());
        assert_eq!(message.ssz_bytes_len(), inner.ssz_bytes_len());
        assert_eq!(message.version(), Version::Altair);
    }

    #[test]
    fn is_nil_is_false_for_constructed_blocks() {
        assert!(all_blocks().iter().all(|block| !block.is_nil()));
    }

    #[test]
    fn sign_request_object_for_phase0_carries_full_block() -> serde_json::Result<()> {
        let block = phase0_block();

        let json = serde_json::to_value(block.sign_request_object())?;

        assert_eq!(json["version"], "PHASE0");
        assert_eq!(json["block"]["slot"], "3");
        assert_eq!(json["block"]["proposer_index"], "7");
        assert!(json.get("block_header").is_none());

        Ok(())
    }

    #[test]
    fn sign_request_object_for_bellatrix_carries_header() -> serde_json::Result<()> {
        let block = SignedBeaconBlock::from(BellatrixSignedBeaconBlock::<Minimal>::default());

        assert_eq!(
            serde_json::to_value(block.sign_request_object())?,
            json!({
                "version": "BELLATRIX",
                "block_header": {
                    "slot": "0",
                    "proposer_index": "0",
                    "parent_root": "0x0000000000000000000000000000000000000000000000000000000000000000",
                    "state_root": "0x0000000000000000000000000000000000000000000000000000000000000000",
                    "body_root": "0x75851d2575738753ff630d9d443e725e1229ff5f21c2052bbc6cee3585bad895",
                },
            }),
        );

        Ok(())
    }
}
