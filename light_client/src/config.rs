use crate::prev_head_data::EvictionPolicy;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SubscriberConfig {
    /// Maximum number of head records kept for correlation with later heads.
    pub prev_data_max_size: usize,
    pub eviction: EvictionPolicy,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            prev_data_max_size: 64,
            eviction: EvictionPolicy::default(),
        }
    }
}
