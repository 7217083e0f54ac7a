use hex_literal::hex;
use typenum::{U33, U4};

use crate::phase0::primitives::{DomainType, Epoch, Slot};

pub const DOMAIN_BEACON_PROPOSER: DomainType = hex!("00000000");
pub const DOMAIN_BEACON_ATTESTER: DomainType = hex!("01000000");
pub const DOMAIN_RANDAO: DomainType = hex!("02000000");
pub const DOMAIN_DEPOSIT: DomainType = hex!("03000000");
pub const DOMAIN_VOLUNTARY_EXIT: DomainType = hex!("04000000");
pub const DOMAIN_SELECTION_PROOF: DomainType = hex!("05000000");
pub const DOMAIN_AGGREGATE_AND_PROOF: DomainType = hex!("06000000");

pub const FAR_FUTURE_EPOCH: Epoch = Epoch::MAX;
pub const GENESIS_EPOCH: Epoch = 0;
pub const GENESIS_SLOT: Slot = 0;

/// `DEPOSIT_CONTRACT_TREE_DEPTH + 1` to account for the mixed in length.
pub type DepositProofLength = U33;
pub type JustificationBitsLength = U4;
