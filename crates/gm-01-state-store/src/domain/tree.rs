//! # Merkle AVL Tree
//!
//! Persistent authenticated map from byte keys to byte values.
//!
//! ## Properties
//!
//! - Keys iterate in byte order
//! - Writes path-copy O(log n) nodes; untouched subtrees are shared
//! - `clone()` is a single refcount bump, so a clone is an independent
//!   snapshot that later writes on either side cannot affect
//! - `root_hash()` is a function of the write history, so replicas applying
//!   the same writes in the same order agree on it

use super::node::{self, Link, Node};
use super::proofs::{InclusionProof, PathStep, Side};
use super::Hash;
use shared_crypto::keccak256;
use std::cmp::Ordering;
use std::sync::Arc;

/// Root hash of the empty tree: Keccak-256 of empty input.
pub fn empty_root() -> Hash {
    keccak256(&[])
}

#[derive(Clone, Default)]
pub struct MerkleTree {
    root: Link,
}

impl std::fmt::Debug for MerkleTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerkleTree")
            .field("len", &self.len())
            .field("root", &hex::encode(self.root_hash()))
            .finish()
    }
}

impl MerkleTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_hash(&self) -> Hash {
        self.root.as_ref().map_or_else(empty_root, |n| n.hash)
    }

    pub fn len(&self) -> u64 {
        node::size(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Tree height (0 when empty).
    pub fn height(&self) -> u32 {
        node::height(&self.root)
    }

    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        let mut cursor = self.root.as_ref();
        while let Some(n) = cursor {
            match key.cmp(n.key()) {
                Ordering::Equal => return Some(&n.entry.value[..]),
                Ordering::Less => cursor = n.left.as_ref(),
                Ordering::Greater => cursor = n.right.as_ref(),
            }
        }
        None
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace. Returns `true` if a previous value was replaced.
    pub fn set(&mut self, key: &[u8], value: Vec<u8>) -> bool {
        let (root, replaced) = node::insert(&self.root, key, value);
        self.root = Some(root);
        replaced
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        let (root, old) = node::remove(&self.root, key)?;
        self.root = root;
        Some(old.to_vec())
    }

    /// Number of keys starting with `prefix`.
    pub fn count_prefix(&self, prefix: &[u8]) -> u64 {
        count_prefix(&self.root, prefix)
    }

    /// Inclusion proof for a present key.
    pub fn prove(&self, key: &[u8]) -> Option<InclusionProof> {
        let mut steps = Vec::new();
        let mut cursor = self.root.as_ref();

        while let Some(n) = cursor {
            match key.cmp(n.key()) {
                Ordering::Equal => {
                    // path is collected root-first, proofs are checked leaf-first
                    steps.reverse();
                    return Some(InclusionProof {
                        height: n.height,
                        size: n.size,
                        left: node::link_hash(&n.left),
                        right: node::link_hash(&n.right),
                        path: steps,
                    });
                }
                Ordering::Less => {
                    steps.push(step(n, Side::Left, &n.right));
                    cursor = n.left.as_ref();
                }
                Ordering::Greater => {
                    steps.push(step(n, Side::Right, &n.left));
                    cursor = n.right.as_ref();
                }
            }
        }
        None
    }
}

fn step(n: &Arc<Node>, side: Side, sibling: &Link) -> PathStep {
    PathStep {
        height: n.height,
        size: n.size,
        key: n.key().to_vec(),
        value_hash: n.entry.value_hash,
        side,
        sibling: node::link_hash(sibling),
    }
}

fn count_prefix(link: &Link, prefix: &[u8]) -> u64 {
    let Some(n) = link else { return 0 };
    let key = n.key();

    if key < prefix {
        count_prefix(&n.right, prefix)
    } else if key.starts_with(prefix) {
        count_prefix(&n.left, prefix) + 1 + count_prefix(&n.right, prefix)
    } else {
        count_prefix(&n.left, prefix)
    }
}
