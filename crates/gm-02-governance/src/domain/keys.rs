//! # Key Layout
//!
//! All governance objects share one authenticated tree, namespaced by prefix.
//! No prefix is a prefix of another and the meta key starts with none of
//! them, so no two namespaces can collide for any ID.

pub const ENTITY_PREFIX: &[u8] = b"entity-";
pub const GROUP_PREFIX: &[u8] = b"group-";
pub const PROPOSAL_PREFIX: &[u8] = b"proposal-";
pub const RESOLUTION_PREFIX: &[u8] = b"resolution-";
pub const META_KEY: &[u8] = b"meta";

fn prefixed(prefix: &[u8], id: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + id.len());
    key.extend_from_slice(prefix);
    key.extend_from_slice(id.as_bytes());
    key
}

pub fn entity_key(id: &str) -> Vec<u8> {
    prefixed(ENTITY_PREFIX, id)
}

pub fn group_key(id: &str) -> Vec<u8> {
    prefixed(GROUP_PREFIX, id)
}

pub fn proposal_key(id: &str) -> Vec<u8> {
    prefixed(PROPOSAL_PREFIX, id)
}

pub fn resolution_key(id: &str) -> Vec<u8> {
    prefixed(RESOLUTION_PREFIX, id)
}
