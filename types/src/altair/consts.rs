use core::num::NonZeroU64;

use hex_literal::hex;
use nonzero_ext::nonzero;
use typenum::{U4, U5, U6};

use crate::phase0::primitives::DomainType;

pub const DOMAIN_SYNC_COMMITTEE: DomainType = hex!("07000000");
pub const DOMAIN_SYNC_COMMITTEE_SELECTION_PROOF: DomainType = hex!("08000000");
pub const DOMAIN_CONTRIBUTION_AND_PROOF: DomainType = hex!("09000000");

pub const TARGET_AGGREGATORS_PER_SYNC_SUBCOMMITTEE: NonZeroU64 = nonzero!(16_u64);

pub type SyncCommitteeSubnetCount = U4;

/// [`FINALIZED_ROOT_INDEX`](https://github.com/ethereum/consensus-specs/blob/v1.2.0/specs/altair/light-client/sync-protocol.md#constants)
///
/// ```text
/// 52 BeaconState.finalized_checkpoint┬104 Checkpoint.epoch
///                                    └105 Checkpoint.root
/// ```
pub const FINALIZED_ROOT_INDEX: u64 = 105;

/// [`NEXT_SYNC_COMMITTEE_INDEX`](https://github.com/ethereum/consensus-specs/blob/v1.2.0/specs/altair/light-client/sync-protocol.md#constants)
pub const NEXT_SYNC_COMMITTEE_INDEX: u64 = 55;

pub const CURRENT_SYNC_COMMITTEE_INDEX: u64 = 54;

pub type FinalityBranchLength = U6;
pub type SyncCommitteeBranchLength = U5;
