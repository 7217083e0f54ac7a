use core::time::Duration;
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Result;
use types::{
    combined::BeaconState,
    phase0::primitives::{UnixSeconds, H256},
    preset::Preset,
};

pub trait StateGen<P: Preset>: Send + Sync {
    /// Returns the post-state of the block with root `block_root`.
    fn state_by_root(&self, block_root: H256) -> Result<Arc<BeaconState<P>>>;
}

pub trait SyncStatus: Send + Sync {
    fn is_syncing(&self) -> bool;
}

pub trait ChainInfo: Send + Sync {
    fn genesis_time(&self) -> UnixSeconds;

    fn has_block_and_state(&self, block_root: H256) -> bool;
}

pub trait TimeSource: Send + Sync {
    /// Time elapsed since the Unix epoch.
    fn now(&self) -> Duration;
}

#[derive(Clone, Copy, Default, Debug)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }
}
