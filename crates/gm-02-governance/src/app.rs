//! # Application & Sessions
//!
//! One [`Application`] owns the committed tree. Every connection opens an
//! [`AppContext`] holding a private copy of it:
//!
//! ```text
//!            ┌──────────── Application ────────────┐
//!            │  committed: Mutex<MerkleTree>       │
//!            │  versions:  CommittedVersions       │
//!            └───┬──────────────────────▲──────────┘
//!          open  │ clone (O(1))         │ commit (swap)
//!                ▼                      │
//!            AppContext: GovStore + Governmint
//! ```
//!
//! Nothing ever writes to the committed tree directly. A session's work is
//! published only by `commit` and discarded by `rollback`.

use crate::adapters::Ed25519Verifier;
use crate::config::GovConfig;
use crate::engine::Governmint;
use crate::genesis::{Genesis, GenesisError};
use crate::ports::inbound::{GovInfo, GovernanceApi};
use crate::ports::outbound::SignatureVerifier;
use crate::state::GovStore;
use gm_01_state_store::{CommittedVersions, Hash, InclusionProof, MerkleTree, StoreError};
use parking_lot::Mutex;
use shared_types::{ResultCode, TxResult, Validator, ValidatorUpdate};
use std::sync::Arc;
use tracing::info;

struct Shared {
    committed: Mutex<MerkleTree>,
    versions: CommittedVersions,
    config: GovConfig,
}

/// Owner of the committed governance state. Cloning shares it.
#[derive(Clone)]
pub struct Application<V = Ed25519Verifier> {
    shared: Arc<Shared>,
    verifier: V,
}

impl Application<Ed25519Verifier> {
    pub fn new(config: GovConfig) -> Self {
        Self::with_verifier(config, Ed25519Verifier)
    }
}

impl<V: SignatureVerifier + Clone> Application<V> {
    pub fn with_verifier(config: GovConfig, verifier: V) -> Self {
        Self {
            shared: Arc::new(Shared {
                committed: Mutex::new(MerkleTree::new()),
                versions: CommittedVersions::new(&config.store),
                config,
            }),
            verifier,
        }
    }

    pub fn config(&self) -> &GovConfig {
        &self.shared.config
    }

    /// Open a session over a private copy of the committed state.
    pub fn open(&self) -> Result<AppContext<V>, StoreError> {
        let store = GovStore::new(self.shared.committed.lock().clone());
        let mut gov = Governmint::new(self.shared.config.clone(), self.verifier.clone());
        gov.reload(&store)?;
        Ok(AppContext {
            shared: Arc::clone(&self.shared),
            store,
            gov,
        })
    }

    pub fn committed_hash(&self) -> Hash {
        self.shared.committed.lock().root_hash()
    }

    /// Heights with a retained committed version, ascending.
    pub fn committed_versions(&self) -> Vec<u64> {
        self.shared.versions.versions()
    }

    /// Make the version committed at `height` current again and forget every
    /// later version. Open sessions keep their copies until they roll back.
    pub fn rollback_to(&self, height: u64) -> Result<Hash, StoreError> {
        let mut committed = self.shared.committed.lock();
        let tree = self.shared.versions.load(height)?;
        let dropped = self.shared.versions.truncate_after(height);
        let hash = tree.root_hash();
        *committed = tree;
        info!(height, dropped, hash = %hex::encode(hash), "rolled back to committed version");
        Ok(hash)
    }
}

/// A session: private working state plus the engine driving it.
pub struct AppContext<V = Ed25519Verifier> {
    shared: Arc<Shared>,
    store: GovStore<MerkleTree>,
    gov: Governmint<V>,
}

impl<V: SignatureVerifier + Clone> AppContext<V> {
    pub fn store(&self) -> &GovStore<MerkleTree> {
        &self.store
    }

    pub fn governmint(&self) -> &Governmint<V> {
        &self.gov
    }

    /// Register genesis entities in this session. Not part of the host protocol.
    pub fn apply_genesis(&mut self, genesis: &Genesis) -> Result<(), GenesisError> {
        self.gov.apply_genesis(&mut self.store, genesis)
    }

    /// Inclusion proof of a raw key against the session's current root.
    pub fn prove(&self, key: &[u8]) -> Option<InclusionProof> {
        self.store.inner().prove(key)
    }
}

impl<V: SignatureVerifier + Clone> GovernanceApi for AppContext<V> {
    fn info(&self) -> GovInfo {
        GovInfo {
            height: self.gov.height(),
            entities: self.store.count_entities(),
            groups: self.store.count_groups(),
            active_proposals: self.store.count_active_proposals(),
            resolutions: self.store.count_resolutions(),
            root_hash: self.store.root_hash(),
        }
    }

    fn set_option(&mut self, key: &str, value: &str) -> Result<String, StoreError> {
        self.gov.set_option(&mut self.store, key, value)
    }

    fn check_tx(&self, tx_bytes: &[u8]) -> Result<TxResult, StoreError> {
        let mut scratch = self.store.clone();
        let mut gov = self.gov.clone();
        gov.run_tx_bytes(&mut scratch, tx_bytes)
    }

    fn deliver_tx(&mut self, tx_bytes: &[u8]) -> Result<TxResult, StoreError> {
        self.gov.run_tx_bytes(&mut self.store, tx_bytes)
    }

    fn get_hash(&self) -> Hash {
        self.store.root_hash()
    }

    fn commit(&mut self) -> Result<Hash, StoreError> {
        let height = self.gov.height();
        let tree = self.store.inner().clone();
        let hash = tree.root_hash();

        let mut committed = self.shared.committed.lock();
        *committed = tree.clone();
        let pruned = self.shared.versions.record(height, tree);
        drop(committed);

        info!(height, pruned, hash = %hex::encode(hash), "committed");
        Ok(hash)
    }

    fn rollback(&mut self) -> Result<(), StoreError> {
        self.store = GovStore::new(self.shared.committed.lock().clone());
        self.gov.reload(&self.store)?;
        info!(
            height = self.gov.height(),
            hash = %hex::encode(self.store.root_hash()),
            "session rolled back"
        );
        Ok(())
    }

    fn init_chain(&mut self, validators: &[Validator]) -> Result<(), StoreError> {
        self.gov.init_chain(&mut self.store, validators)
    }

    fn begin_block(&mut self, height: u64) -> Result<(), StoreError> {
        self.gov.begin_block(&self.store, height)
    }

    fn end_block(&mut self, height: u64) -> Result<Vec<ValidatorUpdate>, StoreError> {
        self.gov.end_block(&mut self.store, height)
    }

    fn query(&self, _query: &[u8]) -> TxResult {
        TxResult::error(ResultCode::UnknownRequest, "query not supported")
    }
}
