//! # Shared Crypto - Signing and Hashing Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Entity keys, proposal and vote signatures |
//! | `hashing` | Keccak-256, SHA-256 | Merkle node hashing, content IDs, addresses |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency when signing
//! - **Addresses**: 160-bit truncation of SHA-256 over the raw public key

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{address_from_pubkey, keccak256, keccak256_many, sha256, Address, Hash};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
