use std::sync::Arc;

use tokio::sync::broadcast::Sender;
use types::{
    combined::SignedBeaconBlock,
    phase0::{
        containers::Checkpoint,
        primitives::{Slot, H256},
    },
    preset::Preset,
};

pub type StateNotifier<P> = Sender<StateEvent<P>>;

#[derive(Clone, Debug)]
pub enum StateEvent<P: Preset> {
    NewHead { block_root: H256, slot: Slot },
    BlockProcessed { block: Arc<SignedBeaconBlock<P>> },
    Finalized { checkpoint: Checkpoint },
}
