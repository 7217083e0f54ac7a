pub use crate::{
    config::SubscriberConfig,
    error::Error,
    events::{StateEvent, StateNotifier},
    prev_head_data::{EvictionPolicy, PrevHeadData, SyncAttestedData},
    subscriber::HeadEventSubscriber,
    sync_update::{SyncSignatureData, SyncUpdateBuilder},
    traits::{FinalizedHeaderSource, HeadFetcher, UpdatePersister},
    update_store::LightClientUpdateStore,
};

mod config;
mod error;
mod events;
mod prev_head_data;
mod subscriber;
mod sync_update;
mod traits;
mod update_store;

#[cfg(test)]
mod test_utils;
