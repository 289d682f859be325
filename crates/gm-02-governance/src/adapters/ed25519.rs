use crate::ports::outbound::SignatureVerifier;
use shared_types::{PubKey, Signature};

/// [`SignatureVerifier`] backed by `ed25519-dalek` through `shared-crypto`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, pub_key: &PubKey, message: &[u8], signature: &Signature) -> bool {
        pub_key.verify_bytes(message, signature)
    }
}
