use std::default::Default;

/// Contains Config properties which will be used by the authority when
/// emitting snapshots
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplicationConfig {
    /// Upper bound on the snapshot bytes emitted per pass. Entities that
    /// don't fit are deferred to the next pass. None means unlimited.
    pub snapshot_budget_bytes: Option<usize>,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            snapshot_budget_bytes: None,
        }
    }
}
