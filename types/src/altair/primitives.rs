pub type ParticipationFlags = u8;
pub type SyncCommitteePeriod = u64;
