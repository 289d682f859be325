//! # Outbound Ports (Driven Ports / SPI)
//!
//! Capabilities the engine needs but does not implement.

use shared_types::{PubKey, Signature};

/// Signature verification capability: `Verify(pubkey, message, signature) -> bool`.
///
/// Must be a pure function of its inputs; every replica must reach the same
/// verdict for the same arguments.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, pub_key: &PubKey, message: &[u8], signature: &Signature) -> bool;
}
