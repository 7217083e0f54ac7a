use std::sync::Arc;

use tokio::sync::broadcast::Sender;
use types::{altair::containers::ContributionAndProof, preset::Preset};

pub type OperationNotifier<P> = Sender<OperationEvent<P>>;

#[derive(Clone, Debug)]
pub enum OperationEvent<P: Preset> {
    /// Published for every decodable contribution, before it is fully validated.
    SyncContributionReceived {
        contribution_and_proof: Arc<ContributionAndProof<P>>,
    },
}
