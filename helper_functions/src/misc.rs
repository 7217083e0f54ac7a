use core::time::Duration;

use tree_hash::TreeHash;
use typenum::Unsigned as _;
use types::{
    altair::primitives::SyncCommitteePeriod,
    config::Config,
    phase0::{
        consts::GENESIS_SLOT,
        containers::{ForkData, SigningData},
        primitives::{Domain, DomainType, Epoch, Slot, UnixSeconds, Version, H256},
    },
    preset::Preset,
};

#[must_use]
pub fn compute_epoch_at_slot<P: Preset>(slot: Slot) -> Epoch {
    slot / P::SlotsPerEpoch::U64
}

#[must_use]
pub const fn sync_committee_period<P: Preset>(epoch: Epoch) -> SyncCommitteePeriod {
    epoch / P::EPOCHS_PER_SYNC_COMMITTEE_PERIOD
}

// > Return the 32-byte fork data root for the ``current_version`` and ``genesis_validators_root``.
// > This is used primarily in signature domains to avoid collisions across forks/chains.
fn compute_fork_data_root(current_version: Version, genesis_validators_root: H256) -> H256 {
    ForkData {
        current_version,
        genesis_validators_root,
    }
    .tree_hash_root()
}

#[must_use]
pub fn compute_domain(
    config: &Config,
    domain_type: DomainType,
    fork_version: Option<Version>,
    genesis_validators_root: Option<H256>,
) -> Domain {
    let fork_version = fork_version.unwrap_or(config.genesis_fork_version);
    let genesis_validators_root = genesis_validators_root.unwrap_or_else(H256::zero);
    let fork_data_root = compute_fork_data_root(fork_version, genesis_validators_root);

    let mut domain = Domain::zero();
    domain[..domain_type.len()].copy_from_slice(&domain_type);
    domain[domain_type.len()..].copy_from_slice(&fork_data_root[..28]);
    domain
}

pub fn compute_signing_root(object: &(impl TreeHash + ?Sized), domain: Domain) -> H256 {
    SigningData {
        object_root: object.tree_hash_root(),
        domain,
    }
    .tree_hash_root()
}

#[must_use]
pub fn compute_timestamp_at_slot(
    config: &Config,
    genesis_time: UnixSeconds,
    slot: Slot,
) -> UnixSeconds {
    let slots_since_genesis = slot.saturating_sub(GENESIS_SLOT);

    genesis_time.saturating_add(slots_since_genesis.saturating_mul(config.seconds_per_slot.get()))
}

/// Checks that `now` falls within the duration of `slot` widened by
/// `MAXIMUM_GOSSIP_CLOCK_DISPARITY` on both ends.
///
/// `now` is measured from the Unix epoch.
#[must_use]
pub fn is_slot_within_gossip_clock_disparity(
    config: &Config,
    genesis_time: UnixSeconds,
    slot: Slot,
    now: Duration,
) -> bool {
    let disparity = config.maximum_gossip_clock_disparity();
    let slot_start = Duration::from_secs(compute_timestamp_at_slot(config, genesis_time, slot));
    let slot_end = slot_start.saturating_add(Duration::from_secs(config.seconds_per_slot.get()));

    slot_start.saturating_sub(disparity) <= now && now <= slot_end.saturating_add(disparity)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use test_case::test_case;
    use types::{
        phase0::consts::DOMAIN_DEPOSIT,
        preset::{Mainnet, Minimal},
    };

    use super::*;

    #[test_case(0 => 0)]
    #[test_case(7 => 0)]
    #[test_case(8 => 1)]
    #[test_case(8191 => 1023)]
    fn compute_epoch_at_slot_on_minimal(slot: Slot) -> Epoch {
        compute_epoch_at_slot::<Minimal>(slot)
    }

    #[test_case(0 => 0)]
    #[test_case(255 => 0)]
    #[test_case(256 => 1)]
    fn sync_committee_period_on_mainnet(epoch: Epoch) -> SyncCommitteePeriod {
        sync_committee_period::<Mainnet>(epoch)
    }

    #[test]
    fn compute_domain_matches_mainnet_deposit_domain() {
        let domain = compute_domain(&Config::mainnet(), DOMAIN_DEPOSIT, None, None);

        assert_eq!(
            domain,
            H256(hex!(
                "03000000f5a5fd42d16a20302798ef6ed309979b43003d2320d9f0e8ea9831a9"
            )),
        );
    }

    #[test]
    fn compute_signing_root_depends_on_domain() {
        let config = Config::mainnet();
        let object = H256::repeat_byte(1);
        let genesis_domain = compute_domain(&config, DOMAIN_DEPOSIT, None, None);
        let altair_domain = compute_domain(
            &config,
            DOMAIN_DEPOSIT,
            Some(config.altair_fork_version),
            None,
        );

        assert_ne!(
            compute_signing_root(&object, genesis_domain),
            compute_signing_root(&object, altair_domain),
        );
    }

    #[test_case(0, 100 => 100)]
    #[test_case(3, 100 => 118)]
    #[test_case(Slot::MAX, 100 => UnixSeconds::MAX)]
    fn compute_timestamp_at_slot_on_minimal(slot: Slot, genesis_time: UnixSeconds) -> UnixSeconds {
        compute_timestamp_at_slot(&Config::minimal(), genesis_time, slot)
    }

    // Minimal slots are 6 seconds long. The disparity is 500 milliseconds.
    #[test_case(10, 1000, 1_059_000 => false; "too early")]
    #[test_case(10, 1000, 1_059_499 => false; "just before the window")]
    #[test_case(10, 1000, 1_059_500 => true; "at the lower bound")]
    #[test_case(10, 1000, 1_060_000 => true; "at slot start")]
    #[test_case(10, 1000, 1_066_500 => true; "at the upper bound")]
    #[test_case(10, 1000, 1_066_501 => false; "after the window")]
    fn is_slot_within_gossip_clock_disparity_on_minimal(
        slot: Slot,
        genesis_time: UnixSeconds,
        now_millis: u64,
    ) -> bool {
        is_slot_within_gossip_clock_disparity(
            &Config::minimal(),
            genesis_time,
            slot,
            Duration::from_millis(now_millis),
        )
    }
}
