//! # Shared Types Crate
//!
//! Domain entities, transactions, canonical encodings and result codes of the
//! governance state machine.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every persisted or wire type is defined here.
//! - **One Signing Point**: each transaction carries a single signature over
//!   domain-tagged canonical bytes. There is no outer envelope.
//! - **Deterministic Encoding**: persisted values use fixed-width bincode and
//!   contain no hash maps, so equal state always encodes to equal bytes.

pub mod codec;
pub mod codes;
pub mod entities;
pub mod errors;
pub mod tx;

pub use codec::{
    decode_json, decode_store, decode_wire, encode_store, encode_wire, CanonicalWriter, MAX_TX_BYTES,
};
pub use codes::{ResultCode, TxResult};
pub use entities::*;
pub use errors::CodecError;
pub use tx::{decode_tx, encode_tx, ProposalTx, Tx, VoteTx};
