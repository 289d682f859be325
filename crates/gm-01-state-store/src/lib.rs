//! # gm-01-state-store
//!
//! Authenticated key/value store underneath the governance state machine.
//!
//! ## Role in System
//!
//! - **Merkle Root**: every write changes a 32-byte Keccak-256 root that the
//!   consensus host commits into the block header
//! - **Copy-on-Open**: the tree is persistent; cloning it is a pointer copy,
//!   so sessions, scratch validation and per-transaction rollback are O(1)
//! - **Light-Client Proofs**: inclusion proofs for any stored key
//! - **Committed Versions**: bounded history of committed roots for rollback
//!
//! ```text
//!   committed ──clone──→ session ──write──→ session' ──commit──→ committed'
//!       │                                                          │
//!       └──────────────── CommittedVersions (height → tree) ←──────┘
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
