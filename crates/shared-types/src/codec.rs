//! # Canonical Encodings
//!
//! Two encodings live here:
//!
//! - **Wire / store encoding**: bincode with fixed-width little-endian integers
//!   and trailing-byte rejection. Used for transaction bytes delivered by the
//!   consensus host and for every value persisted in the authenticated store.
//! - **Signing encoding**: a hand-written, length-prefixed byte layout that
//!   never includes a signature. It is what entities sign and what content IDs
//!   hash, so it must stay stable independently of serde derive details.

use crate::entities::{Member, Proposal, ProposalInfo, Vote};
use crate::errors::CodecError;
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_crypto::sha256;

/// Largest transaction accepted from the wire.
pub const MAX_TX_BYTES: u64 = 1024 * 1024;

/// Domain tag prefixed to proposal-transaction sign bytes.
pub const PROPOSAL_SIGN_DOMAIN: &[u8] = b"gm/proposal";

/// Domain tag prefixed to vote sign bytes.
pub const VOTE_SIGN_DOMAIN: &[u8] = b"gm/vote";

/// Domain tag prefixed to proposal content-ID preimages.
pub const PROPOSAL_ID_DOMAIN: &[u8] = b"gm/proposal-id";

// =============================================================================
// WIRE / STORE ENCODING
// =============================================================================

fn wire_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .with_limit(MAX_TX_BYTES)
        .reject_trailing_bytes()
}

fn store_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}

/// Encode a value for the wire (size-limited).
pub fn encode_wire<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    wire_options()
        .serialize(value)
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode a value received from the wire (size-limited, no trailing bytes).
pub fn decode_wire<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    wire_options()
        .deserialize(bytes)
        .map_err(|e| CodecError::Decode(e.to_string()))
}

/// Encode a value for persistence.
pub fn encode_store<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    store_options()
        .serialize(value)
        .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode a persisted value.
pub fn decode_store<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    store_options()
        .deserialize(bytes)
        .map_err(|e| CodecError::Decode(e.to_string()))
}

/// Decode a JSON document (SetOption values, genesis files).
pub fn decode_json<T: DeserializeOwned>(json: &str) -> Result<T, CodecError> {
    serde_json::from_str(json).map_err(|e| CodecError::Decode(e.to_string()))
}

// =============================================================================
// SIGNING ENCODING
// =============================================================================

/// Builder for canonical sign bytes.
///
/// Every variable-length field is prefixed with its u32 big-endian length,
/// integers are big-endian, enum variants are a single tag byte.
pub struct CanonicalWriter {
    buf: Vec<u8>,
}

impl CanonicalWriter {
    /// Start a new document under a domain tag.
    pub fn new(domain: &[u8]) -> Self {
        let mut writer = Self {
            buf: Vec::with_capacity(128),
        };
        writer.bytes(domain);
        writer
    }

    /// Append length-prefixed bytes.
    pub fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(&(data.len() as u32).to_be_bytes());
        self.buf.extend_from_slice(data);
        self
    }

    /// Append a length-prefixed UTF-8 string.
    pub fn str(&mut self, s: &str) -> &mut Self {
        self.bytes(s.as_bytes())
    }

    /// Append a big-endian u64.
    pub fn u64(&mut self, v: u64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    /// Append a single tag byte.
    pub fn tag(&mut self, t: u8) -> &mut Self {
        self.buf.push(t);
        self
    }

    /// Append a length-prefixed member list.
    pub fn members(&mut self, members: &[Member]) -> &mut Self {
        self.u64(members.len() as u64);
        for member in members {
            self.str(&member.entity_id).u64(member.voting_power);
        }
        self
    }

    /// Finish and return the bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

impl ProposalInfo {
    fn write_canonical(&self, w: &mut CanonicalWriter) {
        match self {
            ProposalInfo::GroupCreate(info) => {
                w.tag(0x01).str(&info.new_group_id).members(&info.members);
            }
            ProposalInfo::GroupUpdate(info) => {
                w.tag(0x02)
                    .str(&info.update_group_id)
                    .u64(info.group_version)
                    .members(&info.changed_members);
            }
            ProposalInfo::Text(info) => {
                w.tag(0x03).str(&info.text);
            }
            ProposalInfo::Upgrade(info) => {
                w.tag(0x04).u64(info.modules.len() as u64);
                for module in &info.modules {
                    w.str(&module.name).str(&module.script);
                }
            }
        }
    }
}

impl Proposal {
    /// Write every field, optionally leaving the ID out.
    pub fn write_canonical(&self, w: &mut CanonicalWriter, include_id: bool) {
        if include_id {
            w.str(&self.id);
        }
        w.str(&self.vote_group_id)
            .u64(self.start_height)
            .u64(self.end_height);
        self.info.write_canonical(w);
    }

    /// Content-derived ID: hex of the first 20 bytes of SHA-256 over the
    /// canonical encoding of every field except the ID itself.
    ///
    /// Identical proposals collide by construction.
    pub fn content_id(&self) -> String {
        let mut w = CanonicalWriter::new(PROPOSAL_ID_DOMAIN);
        self.write_canonical(&mut w, false);
        let digest = sha256(&w.finish());
        hex::encode(&digest[..20])
    }
}

impl Vote {
    /// Canonical bytes signed by the voter.
    pub fn sign_bytes(&self) -> Vec<u8> {
        let mut w = CanonicalWriter::new(VOTE_SIGN_DOMAIN);
        w.str(&self.proposal_id)
            .str(&self.entity_id)
            .u64(self.height)
            .str(&self.value);
        w.finish()
    }
}
