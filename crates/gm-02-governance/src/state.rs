//! # Governance Store Adapter
//!
//! Typed access to governance objects over any [`KvStore`].
//!
//! - `get_*` returns `Ok(None)` for a missing key. A value that is present but
//!   does not decode is `Err(StoreError::Corrupted)`, never a validation outcome.
//! - `set_*` overwrites unconditionally. The adapter performs no validation.

use crate::domain::keys::{
    entity_key, group_key, proposal_key, resolution_key, ENTITY_PREFIX, GROUP_PREFIX, META_KEY,
    PROPOSAL_PREFIX, RESOLUTION_PREFIX,
};
use gm_01_state_store::{Hash, KvStore, MerkleTree, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{
    decode_store, encode_store, ActiveProposal, Entity, GovMeta, Group, Resolution,
};

/// Governance view of an authenticated store. Cloning clones the store,
/// which for [`MerkleTree`] is an O(1) snapshot.
#[derive(Clone, Debug, Default)]
pub struct GovStore<S = MerkleTree> {
    kv: S,
}

impl<S: KvStore> GovStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn inner(&self) -> &S {
        &self.kv
    }

    pub fn into_inner(self) -> S {
        self.kv
    }

    pub fn root_hash(&self) -> Hash {
        self.kv.root_hash()
    }

    // =========================================================================
    // RAW OBJECT ACCESS
    // =========================================================================

    fn get_object<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, StoreError> {
        match self.kv.get(key)? {
            None => Ok(None),
            Some(bytes) => decode_store(&bytes)
                .map(Some)
                .map_err(|e| StoreError::corrupted(key, e)),
        }
    }

    fn set_object<T: Serialize>(&mut self, key: &[u8], value: &T) -> Result<(), StoreError> {
        let bytes = encode_store(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.kv.set(key, bytes)
    }

    // =========================================================================
    // ENTITIES & GROUPS
    // =========================================================================

    pub fn get_entity(&self, id: &str) -> Result<Option<Entity>, StoreError> {
        self.get_object(&entity_key(id))
    }

    pub fn set_entity(&mut self, entity: &Entity) -> Result<(), StoreError> {
        self.set_object(&entity_key(&entity.id), entity)
    }

    pub fn get_group(&self, id: &str) -> Result<Option<Group>, StoreError> {
        self.get_object(&group_key(id))
    }

    pub fn set_group(&mut self, group: &Group) -> Result<(), StoreError> {
        self.set_object(&group_key(&group.id), group)
    }

    // =========================================================================
    // PROPOSALS & RESOLUTIONS
    // =========================================================================

    pub fn get_active_proposal(&self, id: &str) -> Result<Option<ActiveProposal>, StoreError> {
        self.get_object(&proposal_key(id))
    }

    pub fn set_active_proposal(&mut self, active: &ActiveProposal) -> Result<(), StoreError> {
        self.set_object(&proposal_key(&active.proposal.id), active)
    }

    pub fn remove_active_proposal(&mut self, id: &str) -> Result<(), StoreError> {
        self.kv.remove(&proposal_key(id))?;
        Ok(())
    }

    pub fn get_resolution(&self, id: &str) -> Result<Option<Resolution>, StoreError> {
        self.get_object(&resolution_key(id))
    }

    pub fn set_resolution(&mut self, resolution: &Resolution) -> Result<(), StoreError> {
        self.set_object(&resolution_key(&resolution.proposal.id), resolution)
    }

    /// Whether `id` is taken by an active proposal or a resolution.
    pub fn proposal_id_used(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.kv.get(&proposal_key(id))?.is_some() || self.kv.get(&resolution_key(id))?.is_some())
    }

    // =========================================================================
    // META
    // =========================================================================

    pub fn get_meta(&self) -> Result<Option<GovMeta>, StoreError> {
        self.get_object(META_KEY)
    }

    pub fn set_meta(&mut self, meta: &GovMeta) -> Result<(), StoreError> {
        self.set_object(META_KEY, meta)
    }

    // =========================================================================
    // STATISTICS
    // =========================================================================

    pub fn count_entities(&self) -> u64 {
        self.kv.count_prefix(ENTITY_PREFIX)
    }

    pub fn count_groups(&self) -> u64 {
        self.kv.count_prefix(GROUP_PREFIX)
    }

    pub fn count_active_proposals(&self) -> u64 {
        self.kv.count_prefix(PROPOSAL_PREFIX)
    }

    pub fn count_resolutions(&self) -> u64 {
        self.kv.count_prefix(RESOLUTION_PREFIX)
    }
}
