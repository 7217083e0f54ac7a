use core::num::NonZeroUsize;

use nonzero_ext::nonzero;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ValidatorConfig {
    pub seen_cache_size: NonZeroUsize,
    /// Maximum size of a decompressed gossip payload in bytes.
    pub max_gossip_size: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            seen_cache_size: nonzero!(256_usize),
            max_gossip_size: 10 * 1024 * 1024,
        }
    }
}
