pub use crate::{
    config::ValidatorConfig,
    events::{OperationEvent, OperationNotifier},
    message::{GossipMessage, MessageAcceptance, PeerId},
    seen_cache::{SeenKey, SeenSyncContribution},
    sync_contribution::{
        Collaborators, ContributionValidator, Ignored, Rejection, ValidationFailure,
    },
    traits::{ChainInfo, StateGen, SyncStatus, SystemTimeSource, TimeSource},
};

mod config;
mod events;
mod message;
mod seen_cache;
mod sync_contribution;
mod traits;
