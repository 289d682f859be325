//! # Inbound Ports (Driving Ports / API)
//!
//! Lifecycle verbs the consensus host drives. One implementor per open
//! session; see [`AppContext`](crate::AppContext).

use gm_01_state_store::{Hash, StoreError};
use shared_types::{TxResult, Validator, ValidatorUpdate};
use std::fmt;

/// Summary returned from `Info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovInfo {
    pub height: u64,
    pub entities: u64,
    pub groups: u64,
    pub active_proposals: u64,
    pub resolutions: u64,
    pub root_hash: Hash,
}

impl fmt::Display for GovInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "height:{}, entities:{}, groups:{}, proposals:{}, resolutions:{}, hash:{}",
            self.height,
            self.entities,
            self.groups,
            self.active_proposals,
            self.resolutions,
            hex::encode(self.root_hash)
        )
    }
}

/// Host-facing API of a governance session.
///
/// `Err(StoreError)` from any verb is a fatal fault: the host must stop
/// rather than continue with possibly diverged state.
pub trait GovernanceApi {
    fn info(&self) -> GovInfo;

    /// Genesis-only bootstrap. Returns a human-readable log line.
    fn set_option(&mut self, key: &str, value: &str) -> Result<String, StoreError>;

    /// Validate without mutating the session.
    fn check_tx(&self, tx_bytes: &[u8]) -> Result<TxResult, StoreError>;

    /// Validate and apply.
    fn deliver_tx(&mut self, tx_bytes: &[u8]) -> Result<TxResult, StoreError>;

    fn get_hash(&self) -> Hash;

    /// Publish the session's state as the committed state.
    fn commit(&mut self) -> Result<Hash, StoreError>;

    /// Discard the session's uncommitted work.
    fn rollback(&mut self) -> Result<(), StoreError>;

    fn init_chain(&mut self, validators: &[Validator]) -> Result<(), StoreError>;

    fn begin_block(&mut self, height: u64) -> Result<(), StoreError>;

    /// Persist height bookkeeping and return validator-set changes.
    fn end_block(&mut self, height: u64) -> Result<Vec<ValidatorUpdate>, StoreError>;

    fn query(&self, query: &[u8]) -> TxResult;
}
