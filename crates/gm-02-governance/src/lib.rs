//! # gm-02-governance
//!
//! Replicated governance state machine for Governmint.
//!
//! ## Role in System
//!
//! - **Identity**: entities hold the keys that sign every transaction
//! - **Constituencies**: versioned groups of weighted members vote on proposals
//! - **Decisions**: proposals collect signed votes until a strict weighted
//!   majority resolves them; passed resolutions restructure groups
//! - **Validator Set**: resolved updates to the validators group are returned
//!   to the consensus host from EndBlock
//!
//! ## Transaction Flow
//!
//! ```text
//! [Consensus Host] ──tx bytes──→ AppContext::deliver_tx
//!                                      │
//!                                      ↓
//!                          decode_tx → Governmint::run_tx
//!                                      │ snapshot
//!                   ┌──────────────────┴─────────────────┐
//!                   ↓                                    ↓
//!            ProposalTx checks                     VoteTx checks
//!                   │                                    │ tally
//!                   ↓                                    ↓
//!            ActiveProposal ──────── majority ──────→ Resolution → execute
//!                                      │
//!                                      ↓
//!                     GovStore<MerkleTree> (root hash)
//! ```
//!
//! ## Determinism
//!
//! State transitions read only the store, the block height and the
//! transaction. A rejected transaction leaves the root hash untouched.

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod engine;
pub mod genesis;
pub mod lifecycle;
pub mod ports;
pub mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapters::*;
pub use app::{AppContext, Application};
pub use config::*;
pub use domain::*;
pub use engine::Governmint;
pub use genesis::{Genesis, GenesisError};
pub use lifecycle::{OPTION_ADMIN, OPTION_ENTITY};
pub use ports::*;
pub use state::GovStore;
