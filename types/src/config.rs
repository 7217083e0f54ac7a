use core::{num::NonZeroU64, time::Duration};
use std::borrow::Cow;

use enum_iterator::Sequence as _;
use hex_literal::hex;
use nonzero_ext::nonzero;
use serde::{Deserialize, Serialize};

use crate::{
    nonstandard::Phase,
    phase0::{
        consts::{FAR_FUTURE_EPOCH, GENESIS_EPOCH},
        containers::Fork,
        primitives::{Epoch, Version},
    },
    preset::PresetName,
};

/// Configuration variables customizable at runtime.
///
/// See [configurations in `consensus-specs`](https://github.com/ethereum/consensus-specs/tree/v1.2.0/configs).
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    // Meta
    pub config_name: Cow<'static, str>,
    pub preset_base: PresetName,

    // Genesis
    #[serde(with = "serde_utils::bytes_4_hex")]
    pub genesis_fork_version: Version,

    // Forking
    #[serde(with = "serde_utils::quoted_u64")]
    pub altair_fork_epoch: Epoch,
    #[serde(with = "serde_utils::bytes_4_hex")]
    pub altair_fork_version: Version,
    #[serde(with = "serde_utils::quoted_u64")]
    pub bellatrix_fork_epoch: Epoch,
    #[serde(with = "serde_utils::bytes_4_hex")]
    pub bellatrix_fork_version: Version,

    // Time parameters
    pub seconds_per_slot: NonZeroU64,

    // Networking
    #[serde(rename = "MAXIMUM_GOSSIP_CLOCK_DISPARITY")]
    pub maximum_gossip_clock_disparity_millis: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Meta
            config_name: Cow::Borrowed(""),
            preset_base: PresetName::Mainnet,

            // Genesis
            genesis_fork_version: hex!("00000000"),

            // Forking
            altair_fork_epoch: FAR_FUTURE_EPOCH,
            altair_fork_version: hex!("01000000"),
            bellatrix_fork_epoch: FAR_FUTURE_EPOCH,
            bellatrix_fork_version: hex!("02000000"),

            // Time parameters
            seconds_per_slot: nonzero!(12_u64),

            // Networking
            maximum_gossip_clock_disparity_millis: 500,
        }
    }
}

impl Config {
    /// [Mainnet configuration](https://github.com/eth-clients/mainnet/blob/main/metadata/config.yaml).
    #[must_use]
    pub fn mainnet() -> Self {
        Self {
            config_name: Cow::Borrowed("mainnet"),
            altair_fork_epoch: 74240,
            bellatrix_fork_epoch: 144_896,
            ..Self::default()
        }
    }

    /// [Minimal configuration](https://github.com/ethereum/consensus-specs/blob/v1.2.0/configs/minimal.yaml).
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            config_name: Cow::Borrowed("minimal"),
            preset_base: PresetName::Minimal,
            genesis_fork_version: hex!("00000001"),
            altair_fork_version: hex!("01000001"),
            bellatrix_fork_version: hex!("02000001"),
            seconds_per_slot: nonzero!(6_u64),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn start_and_stay_in(mut self, phase: Phase) -> Self {
        for (fork_phase, fork_epoch) in self.fork_epochs_mut() {
            *fork_epoch = if fork_phase <= phase {
                GENESIS_EPOCH
            } else {
                FAR_FUTURE_EPOCH
            };
        }

        self
    }

    #[inline]
    #[must_use]
    pub const fn version(&self, phase: Phase) -> Version {
        match phase {
            Phase::Phase0 => self.genesis_fork_version,
            Phase::Altair => self.altair_fork_version,
            Phase::Bellatrix => self.bellatrix_fork_version,
        }
    }

    #[must_use]
    pub fn version_at_epoch(&self, epoch: Epoch) -> Version {
        self.version(self.phase_at_epoch(epoch))
    }

    #[inline]
    #[must_use]
    pub const fn fork_epoch(&self, phase: Phase) -> Epoch {
        match phase {
            Phase::Phase0 => GENESIS_EPOCH,
            Phase::Altair => self.altair_fork_epoch,
            Phase::Bellatrix => self.bellatrix_fork_epoch,
        }
    }

    #[must_use]
    pub fn phase_at_epoch(&self, epoch: Epoch) -> Phase {
        self.fork_epochs()
            .take_while(|(_, fork_epoch)| *fork_epoch <= epoch)
            .map(|(phase, _)| phase)
            .last()
            .unwrap_or(Phase::Phase0)
    }

    /// The [`Fork`] a state at `epoch` would carry.
    #[must_use]
    pub fn fork_at_epoch(&self, epoch: Epoch) -> Fork {
        let current_phase = self.phase_at_epoch(epoch);
        let previous_phase = current_phase.previous().unwrap_or(current_phase);

        Fork {
            previous_version: self.version(previous_phase),
            current_version: self.version(current_phase),
            epoch: self.fork_epoch(current_phase),
        }
    }

    #[must_use]
    pub const fn maximum_gossip_clock_disparity(&self) -> Duration {
        Duration::from_millis(self.maximum_gossip_clock_disparity_millis)
    }

    fn fork_epochs(&self) -> impl Iterator<Item = (Phase, Epoch)> {
        // Do not remove the type annotation.
        // It keeps this method in sync with `Phase`.
        let fields: [_; Phase::CARDINALITY - 1] =
            [self.altair_fork_epoch, self.bellatrix_fork_epoch];

        enum_iterator::all().skip(1).zip(fields)
    }

    fn fork_epochs_mut(&mut self) -> impl Iterator<Item = (Phase, &mut Epoch)> {
        let fields: [_; Phase::CARDINALITY - 1] =
            [&mut self.altair_fork_epoch, &mut self.bellatrix_fork_epoch];

        enum_iterator::all().skip(1).zip(fields)
    }
}
