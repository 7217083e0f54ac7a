use core::{fmt::Debug, hash::Hash};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use typenum::{
    Prod, Quot, Unsigned, U1048576, U1073741824, U1099511627776, U128, U16, U16777216, U2,
    U2048, U256, U32, U4, U512, U64, U65536, U8, U8192,
};

use crate::altair::consts::SyncCommitteeSubnetCount;

/// Bounds shared by every type-level length in a preset.
///
/// `ssz_types` derives its trait impls without bounds on the length parameter,
/// so the lengths have to satisfy the same traits as the containers holding them.
pub trait Length: Unsigned + Copy + Eq + Ord + Hash + Default + Debug + Send + Sync + 'static {}

impl<N: Unsigned + Copy + Eq + Ord + Hash + Default + Debug + Send + Sync + 'static> Length for N {}

/// Compile-time configuration variables.
///
/// See [presets in `consensus-specs`](https://github.com/ethereum/consensus-specs/tree/v1.2.0/presets).
pub trait Preset: Copy + Eq + Ord + Hash + Default + Debug + Send + Sync + 'static {
    // Phase 0
    type EpochsPerEth1VotingPeriod: Length;
    type EpochsPerHistoricalVector: Length;
    type EpochsPerSlashingsVector: Length;
    type HistoricalRootsLimit: Length;
    type MaxAttestations: Length;
    type MaxAttesterSlashings: Length;
    type MaxDeposits: Length;
    type MaxProposerSlashings: Length;
    type MaxValidatorsPerCommittee: Length;
    type MaxVoluntaryExits: Length;
    type SlotsPerEpoch: Length;
    type SlotsPerHistoricalRoot: Length;
    type ValidatorRegistryLimit: Length;

    // Altair
    type SyncCommitteeSize: Length;

    // Bellatrix
    type BytesPerLogsBloom: Length;
    type MaxBytesPerTransaction: Length;
    type MaxExtraDataBytes: Length;
    type MaxTransactionsPerPayload: Length;

    // Derived type-level variables
    type PendingAttestationsLimit: Length;
    type SlotsPerEth1VotingPeriod: Length;
    type SyncSubcommitteeSize: Length;

    // Altair
    const EPOCHS_PER_SYNC_COMMITTEE_PERIOD: u64;

    // Meta
    const NAME: PresetName;
}

/// [Mainnet preset](https://github.com/ethereum/consensus-specs/tree/v1.2.0/presets/mainnet).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Mainnet;

impl Preset for Mainnet {
    // Phase 0
    type EpochsPerEth1VotingPeriod = U64;
    type EpochsPerHistoricalVector = U65536;
    type EpochsPerSlashingsVector = U8192;
    type HistoricalRootsLimit = U16777216;
    type MaxAttestations = U128;
    type MaxAttesterSlashings = U2;
    type MaxDeposits = U16;
    type MaxProposerSlashings = U16;
    type MaxValidatorsPerCommittee = U2048;
    type MaxVoluntaryExits = U16;
    type SlotsPerEpoch = U32;
    type SlotsPerHistoricalRoot = U8192;
    type ValidatorRegistryLimit = U1099511627776;

    // Altair
    type SyncCommitteeSize = U512;

    // Bellatrix
    type BytesPerLogsBloom = U256;
    type MaxBytesPerTransaction = U1073741824;
    type MaxExtraDataBytes = U32;
    type MaxTransactionsPerPayload = U1048576;

    // Derived type-level variables
    type PendingAttestationsLimit = Prod<Self::MaxAttestations, Self::SlotsPerEpoch>;
    type SlotsPerEth1VotingPeriod = Prod<Self::EpochsPerEth1VotingPeriod, Self::SlotsPerEpoch>;
    type SyncSubcommitteeSize = Quot<Self::SyncCommitteeSize, SyncCommitteeSubnetCount>;

    const EPOCHS_PER_SYNC_COMMITTEE_PERIOD: u64 = 256;

    const NAME: PresetName = PresetName::Mainnet;
}

/// [Minimal preset](https://github.com/ethereum/consensus-specs/tree/v1.2.0/presets/minimal).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Minimal;

impl Preset for Minimal {
    // Phase 0
    type EpochsPerEth1VotingPeriod = U4;
    type EpochsPerHistoricalVector = U64;
    type EpochsPerSlashingsVector = U64;
    type HistoricalRootsLimit = U16777216;
    type MaxAttestations = U128;
    type MaxAttesterSlashings = U2;
    type MaxDeposits = U16;
    type MaxProposerSlashings = U16;
    type MaxValidatorsPerCommittee = U2048;
    type MaxVoluntaryExits = U16;
    type SlotsPerEpoch = U8;
    type SlotsPerHistoricalRoot = U64;
    type ValidatorRegistryLimit = U1099511627776;

    // Altair
    type SyncCommitteeSize = U32;

    // Bellatrix
    type BytesPerLogsBloom = U256;
    type MaxBytesPerTransaction = U1073741824;
    type MaxExtraDataBytes = U32;
    type MaxTransactionsPerPayload = U1048576;

    // Derived type-level variables
    type PendingAttestationsLimit = Prod<Self::MaxAttestations, Self::SlotsPerEpoch>;
    type SlotsPerEth1VotingPeriod = Prod<Self::EpochsPerEth1VotingPeriod, Self::SlotsPerEpoch>;
    type SyncSubcommitteeSize = Quot<Self::SyncCommitteeSize, SyncCommitteeSubnetCount>;

    const EPOCHS_PER_SYNC_COMMITTEE_PERIOD: u64 = 8;

    const NAME: PresetName = PresetName::Minimal;
}

#[derive(
    Clone, Copy, PartialEq, Eq, Default, Debug, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PresetName {
    #[default]
    Mainnet,
    Minimal,
}
