use thiserror::Error;
use types::{nonstandard::Phase, phase0::primitives::H256};

#[derive(Debug, Error)]
pub enum Error {
    #[error("head block is not available")]
    HeadBlockMissing,
    #[error("head state is not available")]
    HeadStateMissing,
    #[error("finalized block header is not available (root: {root:?})")]
    MissingFinalizedHeader { root: H256 },
    #[error("no previous head data for sync attested block (root: {root:?})")]
    NoCorrelatedHeadData { root: H256 },
    #[error("expected a post-Altair head state, got a {phase} state")]
    WrongStateVersion { phase: Phase },
}
