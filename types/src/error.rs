use thiserror::Error;

use crate::combined::Version;

#[derive(PartialEq, Debug, Error)]
pub enum Error {
    #[error("{version} blocks cannot be blinded (blinded: {blinded})")]
    IncorrectVersion { version: Version, blinded: bool },
    #[error("unknown block version tag: {tag}")]
    UnknownVersionTag { tag: u8 },
    #[error("{field} is not supported for {version} blocks")]
    NotSupportedForVersion {
        field: &'static str,
        version: Version,
    },
    #[error("failed to decode SSZ: {0:?}")]
    Decode(ssz::DecodeError),
}

impl From<ssz::DecodeError> for Error {
    fn from(error: ssz::DecodeError) -> Self {
        Self::Decode(error)
    }
}
