use std::sync::Arc;

use types::{
    altair::containers::SignedContributionAndProof, phase0::primitives::H256, preset::Preset,
};

/// Outcome of [extended validation] as reported back to gossipsub.
///
/// [extended validation]: https://github.com/libp2p/specs/blob/master/pubsub/gossipsub/gossipsub-v1.1.md
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageAcceptance {
    Accept,
    Reject,
    Ignore,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PeerId(pub H256);

pub struct GossipMessage<P: Preset> {
    /// Snappy-compressed SSZ bytes as received from the network.
    pub data: Vec<u8>,
    pub validated: Option<Arc<SignedContributionAndProof<P>>>,
}

impl<P: Preset> GossipMessage<P> {
    #[must_use]
    pub const fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            validated: None,
        }
    }
}
