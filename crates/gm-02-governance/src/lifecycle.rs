//! # Lifecycle Hooks
//!
//! Chain bootstrap and per-block bookkeeping around the transaction engine.
//!
//! ```text
//! [SetOption]* → InitChain → ( BeginBlock → DeliverTx* → EndBlock → Commit )*
//! ```

use crate::engine::Governmint;
use crate::genesis::{Genesis, GenesisError};
use crate::ports::outbound::SignatureVerifier;
use crate::state::GovStore;
use gm_01_state_store::{KvStore, StoreError};
use shared_types::{
    decode_json, Entity, Group, Member, Validator, ValidatorUpdate, MAX_VOTING_POWER,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error, info, warn};

/// Option key that registers an entity and gives it a one-member admin group.
pub const OPTION_ADMIN: &str = "admin";

/// Option key that registers a bare entity.
pub const OPTION_ENTITY: &str = "entity";

impl<V: SignatureVerifier> Governmint<V> {
    /// Register one entity per validator and assemble the validators group.
    ///
    /// Validators with power 0 are registered but not made members. Powers
    /// above the bound are clamped. A repeated key is ignored.
    ///
    /// The validators group is replaced, not merged: members added earlier by
    /// [`Governmint::apply_genesis`] are dropped unless they are also listed
    /// here.
    pub fn init_chain<S: KvStore>(
        &mut self,
        store: &mut GovStore<S>,
        validators: &[Validator],
    ) -> Result<(), StoreError> {
        let mut group = Group {
            id: self.config.validators_group_id.clone(),
            parent_id: None,
            version: 0,
            members: Vec::with_capacity(validators.len()),
        };

        let mut seen = BTreeSet::new();
        for validator in validators {
            let entity = Entity::from_pub_key(validator.pub_key);
            if !seen.insert(entity.id.clone()) {
                warn!(entity = %entity.id, "duplicate validator ignored");
                continue;
            }
            store.set_entity(&entity)?;

            if validator.power == 0 {
                debug!(entity = %entity.id, "validator with zero power registered without membership");
                continue;
            }
            let power = if validator.power > MAX_VOTING_POWER {
                warn!(
                    entity = %entity.id,
                    power = validator.power,
                    "validator power clamped to maximum"
                );
                MAX_VOTING_POWER
            } else {
                validator.power
            };
            group.members.push(Member::new(entity.id, power));
        }

        store.set_group(&group)?;
        info!(
            group = %group.id,
            validators = validators.len(),
            members = group.members.len(),
            "chain initialized"
        );
        Ok(())
    }

    /// Out-of-band bootstrap before consensus starts. Returns a log line.
    ///
    /// Never part of the signed-transaction trust model.
    pub fn set_option<S: KvStore>(
        &mut self,
        store: &mut GovStore<S>,
        key: &str,
        value: &str,
    ) -> Result<String, StoreError> {
        match key {
            OPTION_ADMIN => {
                let entity: Entity = match decode_json(value) {
                    Ok(entity) => entity,
                    Err(e) => return Ok(format!("Error decoding admin entity: {e}")),
                };
                store.set_entity(&entity)?;
                let group = Group {
                    id: self.config.admin_group_id.clone(),
                    parent_id: None,
                    version: 0,
                    members: vec![Member::new(entity.id.clone(), 1)],
                };
                store.set_group(&group)?;
                info!(entity = %entity.id, group = %group.id, "admin bootstrapped");
                Ok("Success".to_string())
            }
            OPTION_ENTITY => {
                let entity: Entity = match decode_json(value) {
                    Ok(entity) => entity,
                    Err(e) => return Ok(format!("Error decoding entity: {e}")),
                };
                store.set_entity(&entity)?;
                info!(entity = %entity.id, "entity registered");
                Ok("Success".to_string())
            }
            _ => Ok(format!("Unrecognized governmint option key {key}")),
        }
    }

    /// Register genesis entities and assemble them into the validators group
    /// at equal power 1.
    ///
    /// An entity listed twice, or already registered, with the same key is
    /// skipped. A different key for a known ID fails the whole document
    /// before anything is written.
    pub fn apply_genesis<S: KvStore>(
        &mut self,
        store: &mut GovStore<S>,
        genesis: &Genesis,
    ) -> Result<(), GenesisError> {
        let mut fresh: BTreeMap<&str, &Entity> = BTreeMap::new();
        for entity in genesis.entities() {
            let known = match fresh.get(entity.id.as_str()) {
                Some(listed) => Some(listed.pub_key),
                None => store.get_entity(&entity.id)?.map(|stored| stored.pub_key),
            };
            match known {
                Some(key) if key != entity.pub_key => {
                    error!(entity = %entity.id, "genesis entity conflicts with registered key");
                    return Err(GenesisError::ConflictingEntity {
                        id: entity.id.clone(),
                    });
                }
                Some(_) => warn!(entity = %entity.id, "genesis entity already known, skipped"),
                None => {
                    fresh.insert(&entity.id, entity);
                }
            }
        }

        let mut group = store
            .get_group(&self.config.validators_group_id)?
            .unwrap_or_else(|| Group {
                id: self.config.validators_group_id.clone(),
                parent_id: None,
                version: 0,
                members: Vec::new(),
            });

        for entity in genesis.entities() {
            if fresh.remove(entity.id.as_str()).is_some() {
                store.set_entity(entity)?;
            }
            if !group.is_member(&entity.id) {
                group.members.push(Member::new(entity.id.clone(), 1));
            }
        }

        store.set_group(&group)?;
        info!(
            group = %group.id,
            entities = genesis.entities().len(),
            members = group.members.len(),
            "genesis applied"
        );
        Ok(())
    }

    /// Adopt the persisted height record and start a new block.
    pub fn begin_block<S: KvStore>(
        &mut self,
        store: &GovStore<S>,
        height: u64,
    ) -> Result<(), StoreError> {
        if let Some(meta) = store.get_meta()? {
            self.meta = meta;
        }
        self.meta.height = height;
        self.validator_updates.clear();
        debug!(height, "begin block");
        Ok(())
    }

    /// Persist the height record and hand back queued validator-set changes.
    pub fn end_block<S: KvStore>(
        &mut self,
        store: &mut GovStore<S>,
        height: u64,
    ) -> Result<Vec<ValidatorUpdate>, StoreError> {
        self.meta.height = height;
        store.set_meta(&self.meta)?;
        let updates = std::mem::take(&mut self.validator_updates);
        debug!(height, validator_updates = updates.len(), "end block");
        Ok(updates)
    }

    /// Reload the height record from the store, dropping queued updates.
    pub fn reload<S: KvStore>(&mut self, store: &GovStore<S>) -> Result<(), StoreError> {
        self.meta = store.get_meta()?.unwrap_or_default();
        self.validator_updates.clear();
        Ok(())
    }
}
