//! # Hashing
//!
//! Keccak-256 for authenticated-store node hashes, SHA-256 for content
//! identifiers and entity addresses.

use sha2::Sha256;
use sha3::{Digest, Keccak256};

/// 256-bit digest.
pub type Hash = [u8; 32];

/// 160-bit entity address.
pub type Address = [u8; 20];

/// Keccak-256 of a single input.
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

/// Keccak-256 over the concatenation of several inputs.
pub fn keccak256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize().into()
}

/// SHA-256 of a single input.
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// Derive the 20-byte address of a public key.
///
/// First 20 bytes of SHA-256 over the raw key bytes.
pub fn address_from_pubkey(pub_key: &[u8]) -> Address {
    let digest = sha256(pub_key);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[..20]);
    address
}
