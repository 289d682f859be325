//! Fixture builders for tests.
//!
//! Every identity is derived from a short secret string, so `entity("alice")`
//! always has the same ID and key.

#![allow(clippy::unwrap_used)]

use shared_crypto::Ed25519KeyPair;
use shared_types::{
    encode_tx, Entity, Member, Proposal, ProposalInfo, ProposalTx, TextProposalInfo, Tx, Vote,
    VoteTx,
};

pub fn entity_id(secret: &str) -> String {
    format!("id({secret})")
}

pub fn keypair(secret: &str) -> Ed25519KeyPair {
    Ed25519KeyPair::from_secret(secret.as_bytes())
}

pub fn entity(secret: &str) -> Entity {
    Entity {
        id: entity_id(secret),
        pub_key: keypair(secret).public_key(),
    }
}

/// JSON form accepted by the `admin` and `entity` options.
pub fn entity_json(secret: &str) -> String {
    serde_json::to_string(&entity(secret)).unwrap()
}

/// Members for each secret, all at the same power.
pub fn members(secrets: &[&str], power: u64) -> Vec<Member> {
    secrets
        .iter()
        .map(|s| Member::new(entity_id(s), power))
        .collect()
}

pub fn text_info(text: &str) -> ProposalInfo {
    ProposalInfo::Text(TextProposalInfo { text: text.into() })
}

/// Proposal signed by the entity derived from `secret`.
pub fn proposal_tx(
    secret: &str,
    id: &str,
    vote_group_id: &str,
    start_height: u64,
    end_height: u64,
    info: ProposalInfo,
) -> ProposalTx {
    let proposal = Proposal {
        id: id.into(),
        vote_group_id: vote_group_id.into(),
        start_height,
        end_height,
        info,
    };
    ProposalTx::new_signed(entity_id(secret), proposal, &keypair(secret))
}

/// Vote signed by the entity derived from `secret`.
pub fn vote_tx(secret: &str, height: u64, proposal_id: &str, value: &str) -> VoteTx {
    let vote = Vote {
        proposal_id: proposal_id.into(),
        entity_id: entity_id(secret),
        height,
        value: value.into(),
    };
    VoteTx::new_signed(vote, &keypair(secret))
}

/// Wire bytes of a transaction.
pub fn encode(tx: impl Into<Tx>) -> Vec<u8> {
    encode_tx(&tx.into()).unwrap()
}
