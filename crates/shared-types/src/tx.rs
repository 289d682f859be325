//! # Transactions
//!
//! The two transaction kinds accepted by the engine. Each carries exactly one
//! signature, produced by the issuing entity over the transaction's canonical
//! sign bytes.

use crate::codec::{decode_wire, encode_wire, CanonicalWriter, PROPOSAL_SIGN_DOMAIN};
use crate::entities::{EntityId, Proposal, Signature, SignedVote, Vote};
use crate::errors::CodecError;
use serde::{Deserialize, Serialize};
use shared_crypto::{sha256, Ed25519KeyPair, Hash};

/// Submit a new proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalTx {
    /// Proposer.
    pub entity_id: EntityId,
    pub proposal: Proposal,
    /// Proposer's signature over [`ProposalTx::sign_bytes`].
    pub signature: Signature,
}

impl ProposalTx {
    /// Canonical bytes covering the proposer and the full proposal.
    pub fn sign_bytes(&self) -> Vec<u8> {
        let mut w = CanonicalWriter::new(PROPOSAL_SIGN_DOMAIN);
        w.str(&self.entity_id);
        self.proposal.write_canonical(&mut w, true);
        w.finish()
    }

    /// Build and sign a proposal transaction.
    pub fn new_signed(
        entity_id: impl Into<EntityId>,
        proposal: Proposal,
        keypair: &Ed25519KeyPair,
    ) -> Self {
        let mut tx = Self {
            entity_id: entity_id.into(),
            proposal,
            signature: Signature::zero(),
        };
        tx.signature = keypair.sign(&tx.sign_bytes());
        tx
    }
}

/// Cast a vote on an active proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTx {
    pub vote: Vote,
    /// Voter's signature over [`Vote::sign_bytes`].
    pub signature: Signature,
}

impl VoteTx {
    /// Same bytes as the vote itself, so a stored [`SignedVote`] verifies on its own.
    pub fn sign_bytes(&self) -> Vec<u8> {
        self.vote.sign_bytes()
    }

    /// Build and sign a vote transaction.
    pub fn new_signed(vote: Vote, keypair: &Ed25519KeyPair) -> Self {
        let signature = keypair.sign(&vote.sign_bytes());
        Self { vote, signature }
    }

    /// The form recorded on the active proposal.
    pub fn into_signed_vote(self) -> SignedVote {
        SignedVote {
            vote: self.vote,
            signature: self.signature,
        }
    }
}

/// Closed set of transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tx {
    Proposal(ProposalTx),
    Vote(VoteTx),
}

impl Tx {
    /// Canonical sign bytes of the inner transaction.
    pub fn sign_bytes(&self) -> Vec<u8> {
        match self {
            Tx::Proposal(tx) => tx.sign_bytes(),
            Tx::Vote(tx) => tx.sign_bytes(),
        }
    }

    /// Identifier for logs: SHA-256 of the sign bytes.
    pub fn id(&self) -> Hash {
        sha256(&self.sign_bytes())
    }

    /// Short name of the variant for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Tx::Proposal(_) => "proposal",
            Tx::Vote(_) => "vote",
        }
    }

    /// Entity that issued the transaction.
    pub fn signer(&self) -> &str {
        match self {
            Tx::Proposal(tx) => &tx.entity_id,
            Tx::Vote(tx) => &tx.vote.entity_id,
        }
    }
}

impl From<ProposalTx> for Tx {
    fn from(tx: ProposalTx) -> Self {
        Tx::Proposal(tx)
    }
}

impl From<VoteTx> for Tx {
    fn from(tx: VoteTx) -> Self {
        Tx::Vote(tx)
    }
}

/// Encode a transaction to wire bytes.
pub fn encode_tx(tx: &Tx) -> Result<Vec<u8>, CodecError> {
    encode_wire(tx)
}

/// Decode wire bytes into a transaction.
pub fn decode_tx(bytes: &[u8]) -> Result<Tx, CodecError> {
    decode_wire(bytes)
}
