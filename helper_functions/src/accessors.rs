use anyhow::{ensure, Result};
use bls::PublicKeyBytes;
use typenum::Unsigned as _;
use types::{
    altair::consts::SyncCommitteeSubnetCount,
    config::Config,
    phase0::primitives::{Domain, DomainType, Epoch, Slot, SubcommitteeIndex, H256},
    preset::Preset,
    traits::{BeaconState, PostAltairBeaconState},
};

use crate::{error::Error, misc};

#[must_use]
pub fn get_current_epoch<P: Preset>(state: &(impl BeaconState<P> + ?Sized)) -> Epoch {
    misc::compute_epoch_at_slot::<P>(state.slot())
}

pub fn get_block_root_at_slot<P: Preset>(
    state: &(impl BeaconState<P> + ?Sized),
    slot: Slot,
) -> Result<H256> {
    let historical_limit = P::SlotsPerHistoricalRoot::U64;

    ensure!(
        slot < state.slot() && state.slot() <= slot.saturating_add(historical_limit),
        Error::SlotOutOfRange,
    );

    let index = usize::try_from(slot % historical_limit)?;

    Ok(state.block_roots()[index])
}

/// Computes the domain of `domain_type` at `epoch`, or at the current epoch of `state` if
/// `epoch` is `None`.
#[must_use]
pub fn get_domain<P: Preset>(
    config: &Config,
    state: &(impl BeaconState<P> + ?Sized),
    domain_type: DomainType,
    epoch: Option<Epoch>,
) -> Domain {
    let epoch = epoch.unwrap_or_else(|| get_current_epoch(state));
    let fork = state.fork();

    let fork_version = if epoch < fork.epoch {
        fork.previous_version
    } else {
        fork.current_version
    };

    misc::compute_domain(
        config,
        domain_type,
        Some(fork_version),
        Some(state.genesis_validators_root()),
    )
}

// The committee that signs blocks at the next slot is the one messages are checked against.
// It is the next sync committee when the next slot starts a new sync committee period.
pub fn get_sync_subcommittee_pubkeys<P: Preset>(
    state: &(impl PostAltairBeaconState<P> + ?Sized),
    subcommittee_index: SubcommitteeIndex,
) -> Result<&[PublicKeyBytes]> {
    ensure!(
        subcommittee_index < SyncCommitteeSubnetCount::U64,
        Error::SubcommitteeIndexOutOfBounds {
            index: subcommittee_index,
        },
    );

    let current_period = misc::sync_committee_period::<P>(get_current_epoch(state));
    let next_slot_epoch = misc::compute_epoch_at_slot::<P>(state.slot().saturating_add(1));
    let next_slot_period = misc::sync_committee_period::<P>(next_slot_epoch);

    let sync_committee = if current_period == next_slot_period {
        state.current_sync_committee()
    } else {
        state.next_sync_committee()
    };

    let size = P::SyncSubcommitteeSize::USIZE;
    let start = usize::try_from(subcommittee_index)? * size;

    Ok(&sync_committee.pubkeys[start..start + size])
}
