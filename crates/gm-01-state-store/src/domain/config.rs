use serde::{Deserialize, Serialize};

/// Store tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Committed versions retained for rollback. Older ones are pruned on commit.
    pub keep_recent_versions: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            keep_recent_versions: 100,
        }
    }
}
