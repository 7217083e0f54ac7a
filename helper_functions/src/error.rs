use parse_display::Display;
use thiserror::Error;
use types::phase0::primitives::SubcommitteeIndex;

#[derive(PartialEq, Eq, Debug, Error)]
pub enum Error {
    #[error("generalized index {generalized_index} is not supported")]
    GeneralizedIndexNotSupported { generalized_index: u64 },
    #[error("{0} is invalid")]
    SignatureInvalid(SignatureKind),
    #[error("slot is out of range")]
    SlotOutOfRange,
    #[error("subcommittee index {index} is out of bounds")]
    SubcommitteeIndexOutOfBounds { index: SubcommitteeIndex },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum SignatureKind {
    #[display("sync committee contribution and proof signature")]
    ContributionAndProof,
    #[display("sync committee selection proof")]
    SyncCommitteeSelectionProof,
    #[display("sync committee contribution signature")]
    SyncCommitteeContribution,
}
