//! # Genesis
//!
//! A genesis document is a JSON list of entities:
//!
//! ```json
//! [
//!   { "id": "alice", "pub_key": "3b6a27bc..." },
//!   { "id": "bob",   "pub_key": "8a88e3dd..." }
//! ]
//! ```

use gm_01_state_store::StoreError;
use serde::{Deserialize, Serialize};
use shared_types::{decode_json, CodecError, Entity};
use thiserror::Error;

/// Failures while seeding a session from a genesis document.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// Entity ID already bound to a different public key
    #[error("Genesis entity {id} conflicts with a registered key")]
    ConflictingEntity { id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genesis(Vec<Entity>);

impl Genesis {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self(entities)
    }

    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        decode_json(json)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.0
    }
}
