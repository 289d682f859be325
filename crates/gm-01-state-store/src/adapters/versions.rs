//! # Committed Versions
//!
//! Height-indexed registry of committed trees. Because trees share structure,
//! retaining a version costs only the nodes it does not share with its
//! neighbours.

use crate::domain::{MerkleTree, StoreConfig, StoreError};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

pub struct CommittedVersions {
    versions: RwLock<BTreeMap<u64, MerkleTree>>,
    keep_recent: u64,
}

impl CommittedVersions {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            versions: RwLock::new(BTreeMap::new()),
            keep_recent: config.keep_recent_versions.max(1),
        }
    }

    /// Record the tree committed at `version` and prune versions that fall out
    /// of the retention window. Returns the number of pruned versions.
    pub fn record(&self, version: u64, tree: MerkleTree) -> u64 {
        let mut versions = self.versions.write();
        versions.insert(version, tree);

        let excess = (versions.len() as u64).saturating_sub(self.keep_recent);
        for _ in 0..excess {
            versions.pop_first();
        }
        if excess > 0 {
            debug!(version, pruned = excess, "pruned committed versions");
        }
        excess
    }

    /// Tree committed at exactly `version`.
    pub fn load(&self, version: u64) -> Result<MerkleTree, StoreError> {
        self.versions
            .read()
            .get(&version)
            .cloned()
            .ok_or(StoreError::VersionNotFound { version })
    }

    /// Drop every version above `version`.
    pub fn truncate_after(&self, version: u64) -> u64 {
        let Some(first_dropped) = version.checked_add(1) else {
            return 0;
        };
        let mut versions = self.versions.write();
        let dropped = versions.split_off(&first_dropped);
        dropped.len() as u64
    }

    pub fn versions(&self) -> Vec<u64> {
        self.versions.read().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.versions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.read().is_empty()
    }
}

impl Default for CommittedVersions {
    fn default() -> Self {
        Self::new(&StoreConfig::default())
    }
}
