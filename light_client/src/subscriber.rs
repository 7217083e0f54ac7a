use std::sync::Arc;

use anyhow::Result;
use log::{debug, info, warn};
use tokio::{
    select,
    sync::broadcast::{error::RecvError, Receiver},
};
use tokio_util::sync::CancellationToken;
use types::{
    combined::{BeaconState, SignedBeaconBlock},
    preset::Preset,
    traits::SignedBeaconBlock as _,
};

use crate::{
    error::Error,
    events::StateEvent,
    sync_update::SyncUpdateBuilder,
    traits::{HeadFetcher, UpdatePersister},
};

/// Builds light client updates for every new head until cancelled.
pub struct HeadEventSubscriber<P: Preset, F, U> {
    head_fetcher: F,
    builder: SyncUpdateBuilder<P, U>,
    events: Receiver<StateEvent<P>>,
    cancellation_token: CancellationToken,
}

impl<P: Preset, F: HeadFetcher<P>, U: UpdatePersister<P>> HeadEventSubscriber<P, F, U> {
    #[must_use]
    pub const fn new(
        head_fetcher: F,
        builder: SyncUpdateBuilder<P, U>,
        events: Receiver<StateEvent<P>>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            head_fetcher,
            builder,
            events,
            cancellation_token,
        }
    }

    /// Runs until the token is cancelled or the event channel is closed.
    ///
    /// Returns the builder so that its state can be inspected after shutdown.
    pub async fn run(mut self) -> SyncUpdateBuilder<P, U> {
        info!("light client head event subscriber started");

        loop {
            let event = select! {
                biased;

                () = self.cancellation_token.cancelled() => break,

                event = self.events.recv() => event,
            };

            match event {
                Ok(StateEvent::NewHead { block_root, slot }) => {
                    debug!("processing new head (block_root: {block_root:?}, slot: {slot})");
                    self.handle_new_head();
                }
                Ok(StateEvent::BlockProcessed { .. } | StateEvent::Finalized { .. }) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!("light client head event subscriber lagged (skipped events: {skipped})");
                }
                Err(RecvError::Closed) => {
                    warn!("state event channel closed");
                    break;
                }
            }
        }

        info!("light client head event subscriber stopped");

        self.builder
    }

    fn handle_new_head(&self) {
        let (block, state) = match self.fetch_head() {
            Ok(head) => head,
            Err(error) => {
                warn!("failed to fetch chain head: {error:?}");
                return;
            }
        };

        let Err(error) = self.builder.on_head(&block, &state) else {
            return;
        };

        if let Some(Error::NoCorrelatedHeadData { root }) = error.downcast_ref() {
            debug!("skipping light client updates (sync attested block root: {root:?})");
        } else {
            warn!(
                "failed to build light client updates (slot: {}): {error:?}",
                block.message().slot(),
            );
        }
    }

    fn fetch_head(&self) -> Result<(Arc<SignedBeaconBlock<P>>, Arc<BeaconState<P>>)> {
        let block = self
            .head_fetcher
            .head_block()?
            .ok_or(Error::HeadBlockMissing)?;

        let state = self
            .head_fetcher
            .head_state()?
            .ok_or(Error::HeadStateMissing)?;

        Ok((block, state))
    }
}
