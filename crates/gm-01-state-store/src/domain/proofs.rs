//! # Inclusion Proofs
//!
//! A proof carries the target node's shape and child hashes plus, for every
//! ancestor up to the root, the ancestor's own fields and the hash of the
//! subtree the path did not enter. Verification rebuilds the root hash
//! bottom-up and compares.

use super::node::node_hash;
use super::Hash;
use serde::{Deserialize, Serialize};
use shared_crypto::keccak256;

/// Which child of an ancestor the path descended into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// One ancestor on the path from the proven node to the root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub height: u32,
    pub size: u64,
    pub key: Vec<u8>,
    pub value_hash: Hash,
    pub side: Side,
    /// Hash of the child not on the path.
    pub sibling: Hash,
}

/// Proof that a key/value pair is present under a root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    /// Height of the proven node.
    pub height: u32,
    /// Size of the subtree rooted at the proven node.
    pub size: u64,
    /// Left child hash of the proven node.
    pub left: Hash,
    /// Right child hash of the proven node.
    pub right: Hash,
    /// Ancestors, nearest first.
    pub path: Vec<PathStep>,
}

/// Check that `key` maps to `value` in the tree with root `root`.
pub fn verify_proof(root: &Hash, key: &[u8], value: &[u8], proof: &InclusionProof) -> bool {
    let mut hash = node_hash(
        proof.height,
        proof.size,
        key,
        &keccak256(value),
        &proof.left,
        &proof.right,
    );

    for step in &proof.path {
        // ancestors must order the key consistently with the side taken
        let ordered = match step.side {
            Side::Left => key < step.key.as_slice(),
            Side::Right => key > step.key.as_slice(),
        };
        if !ordered {
            return false;
        }

        let (left, right) = match step.side {
            Side::Left => (hash, step.sibling),
            Side::Right => (step.sibling, hash),
        };
        hash = node_hash(
            step.height,
            step.size,
            &step.key,
            &step.value_hash,
            &left,
            &right,
        );
    }

    &hash == root
}
