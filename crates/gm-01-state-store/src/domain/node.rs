//! # Tree Nodes
//!
//! Immutable AVL nodes shared between tree versions through `Arc`.
//!
//! Every node caches its own hash:
//!
//! ```text
//! node_hash = Keccak256( height ‖ size ‖ len(key) ‖ key ‖ H(value) ‖ left_hash ‖ right_hash )
//! ```
//!
//! where a missing child contributes 32 zero bytes. Because the hash covers
//! the shape of the subtree (`height`, `size`) as well as its contents, two
//! trees with equal roots hold equal key/value sets.

use super::Hash;
use shared_crypto::{keccak256, keccak256_many};
use std::cmp::Ordering;
use std::sync::Arc;

/// Child pointer.
pub type Link = Option<Arc<Node>>;

/// Hash contributed by a missing child.
pub const EMPTY_CHILD_HASH: Hash = [0u8; 32];

/// Key, value and cached value hash. Cloning is two refcount bumps.
#[derive(Clone, Debug)]
pub struct Entry {
    pub key: Arc<[u8]>,
    pub value: Arc<[u8]>,
    pub value_hash: Hash,
}

impl Entry {
    pub fn new(key: &[u8], value: Vec<u8>) -> Self {
        Self {
            key: Arc::from(key),
            value_hash: keccak256(&value),
            value: Arc::from(value),
        }
    }
}

#[derive(Debug)]
pub struct Node {
    pub entry: Entry,
    pub left: Link,
    pub right: Link,
    pub height: u32,
    pub size: u64,
    pub hash: Hash,
}

pub fn height(link: &Link) -> u32 {
    link.as_ref().map_or(0, |n| n.height)
}

pub fn size(link: &Link) -> u64 {
    link.as_ref().map_or(0, |n| n.size)
}

pub fn link_hash(link: &Link) -> Hash {
    link.as_ref().map_or(EMPTY_CHILD_HASH, |n| n.hash)
}

/// Hash of a node from its parts. Shared by tree construction and proof verification.
pub fn node_hash(
    height: u32,
    size: u64,
    key: &[u8],
    value_hash: &Hash,
    left: &Hash,
    right: &Hash,
) -> Hash {
    keccak256_many(&[
        &height.to_be_bytes(),
        &size.to_be_bytes(),
        &(key.len() as u32).to_be_bytes(),
        key,
        value_hash,
        left,
        right,
    ])
}

impl Node {
    /// Build a node over two already-balanced children.
    pub fn build(entry: Entry, left: Link, right: Link) -> Arc<Node> {
        let height = 1 + height(&left).max(height(&right));
        let size = 1 + size(&left) + size(&right);
        let hash = node_hash(
            height,
            size,
            &entry.key,
            &entry.value_hash,
            &link_hash(&left),
            &link_hash(&right),
        );
        Arc::new(Node {
            entry,
            left,
            right,
            height,
            size,
            hash,
        })
    }

    pub fn key(&self) -> &[u8] {
        &self.entry.key
    }
}

// =============================================================================
// BALANCING
// =============================================================================

/// Build a node, rotating if the children's heights differ by more than one.
///
/// Children must each be valid AVL trees whose heights differ by at most two.
pub fn balance(entry: Entry, left: Link, right: Link) -> Arc<Node> {
    let lh = height(&left);
    let rh = height(&right);

    if lh > rh + 1 {
        if let Some(l) = &left {
            if height(&l.left) >= height(&l.right) {
                // single right rotation
                let new_right = Node::build(entry, l.right.clone(), right);
                return Node::build(l.entry.clone(), l.left.clone(), Some(new_right));
            }
            if let Some(lr) = &l.right {
                // left-right
                let new_left = Node::build(l.entry.clone(), l.left.clone(), lr.left.clone());
                let new_right = Node::build(entry, lr.right.clone(), right);
                return Node::build(lr.entry.clone(), Some(new_left), Some(new_right));
            }
        }
    } else if rh > lh + 1 {
        if let Some(r) = &right {
            if height(&r.right) >= height(&r.left) {
                // single left rotation
                let new_left = Node::build(entry, left, r.left.clone());
                return Node::build(r.entry.clone(), Some(new_left), r.right.clone());
            }
            if let Some(rl) = &r.left {
                // right-left
                let new_left = Node::build(entry, left, rl.left.clone());
                let new_right = Node::build(r.entry.clone(), rl.right.clone(), r.right.clone());
                return Node::build(rl.entry.clone(), Some(new_left), Some(new_right));
            }
        }
    }

    Node::build(entry, left, right)
}

// =============================================================================
// PATH-COPYING OPERATIONS
// =============================================================================

/// Insert or replace. Returns the new subtree and whether a value was replaced.
pub fn insert(link: &Link, key: &[u8], value: Vec<u8>) -> (Arc<Node>, bool) {
    let Some(node) = link else {
        return (Node::build(Entry::new(key, value), None, None), false);
    };

    match key.cmp(node.key()) {
        Ordering::Equal => (
            Node::build(
                Entry::new(key, value),
                node.left.clone(),
                node.right.clone(),
            ),
            true,
        ),
        Ordering::Less => {
            let (new_left, replaced) = insert(&node.left, key, value);
            (
                balance(node.entry.clone(), Some(new_left), node.right.clone()),
                replaced,
            )
        }
        Ordering::Greater => {
            let (new_right, replaced) = insert(&node.right, key, value);
            (
                balance(node.entry.clone(), node.left.clone(), Some(new_right)),
                replaced,
            )
        }
    }
}

/// Remove a key. `None` if the key is absent (the subtree is then unchanged).
pub fn remove(link: &Link, key: &[u8]) -> Option<(Link, Arc<[u8]>)> {
    let node = link.as_ref()?;

    match key.cmp(node.key()) {
        Ordering::Less => {
            let (new_left, old) = remove(&node.left, key)?;
            Some((
                Some(balance(node.entry.clone(), new_left, node.right.clone())),
                old,
            ))
        }
        Ordering::Greater => {
            let (new_right, old) = remove(&node.right, key)?;
            Some((
                Some(balance(node.entry.clone(), node.left.clone(), new_right)),
                old,
            ))
        }
        Ordering::Equal => {
            let old = node.entry.value.clone();
            let replacement = match (&node.left, &node.right) {
                (None, right) => right.clone(),
                (left, None) => left.clone(),
                (left, Some(right)) => {
                    let (new_right, successor) = remove_min(right);
                    Some(balance(successor, left.clone(), new_right))
                }
            };
            Some((replacement, old))
        }
    }
}

fn remove_min(node: &Arc<Node>) -> (Link, Entry) {
    match &node.left {
        None => (node.right.clone(), node.entry.clone()),
        Some(left) => {
            let (new_left, min) = remove_min(left);
            (
                Some(balance(node.entry.clone(), new_left, node.right.clone())),
                min,
            )
        }
    }
}
