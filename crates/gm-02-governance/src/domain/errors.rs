//! # Governance Errors
//!
//! Two tiers:
//!
//! - [`TxError`]: validation failures. The transaction is rejected with a
//!   status code and the state is left untouched.
//! - [`StoreError`]: the store is unreadable or corrupted. Fatal for the
//!   current operation; never reported as a status code.

use gm_01_state_store::StoreError;
use shared_types::ResultCode;
use thiserror::Error;

/// Reasons a transaction is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TxError {
    /// Transaction bytes are not a valid encoding
    #[error("Error parsing Governmint tx bytes: {0}")]
    Encoding(String),

    /// Signer is not a registered entity
    #[error("Entity {id} unknown")]
    UnknownEntity { id: String },

    /// Signature does not verify under the signer's key
    #[error("Invalid signature")]
    InvalidSignature,

    /// Proposal names a voting group that does not exist
    #[error("Vote group with id {id} doesn't exist")]
    UnknownVoteGroup { id: String },

    /// Proposer is not a member of the voting group
    #[error("Proposer {entity} is not member of {group}")]
    ProposerNotMember { entity: String, group: String },

    /// Proposal ID is empty or does not match the content hash
    #[error("Malformed proposal: {0}")]
    MalformedProposal(String),

    /// Proposal ID already used by an active proposal or resolution
    #[error("Proposal with id {id} already exists")]
    DuplicateProposal { id: String },

    /// GroupCreate targets an existing group ID
    #[error("Group with id {id} already exists")]
    DuplicateGroup { id: String },

    /// Same entity listed twice in a member list
    #[error("Duplicate member {entity}")]
    DuplicateMember { entity: String },

    /// New member with zero voting power
    #[error("Member {entity} cannot have 0 voting power")]
    ZeroVotingPower { entity: String },

    /// Voting power above the f64-exact bound
    #[error("Member {entity} voting power {power} too large")]
    VotingPowerTooLarge { entity: String, power: u64 },

    /// Member list references an unregistered entity
    #[error("Group member entity {id} unknown")]
    UnknownMemberEntity { id: String },

    /// GroupUpdate targets a group that does not exist
    #[error("Group with id {id} doesn't exist")]
    UnknownGroup { id: String },

    /// GroupUpdate drafted against a version the group is no longer at
    #[error("Group {id} is at version {current}, proposal targets version {proposed}")]
    StaleGroupVersion { id: String, current: u64, proposed: u64 },

    /// Proposer may not restructure the target group
    #[error("Voting group {vote_group} cannot update {target}")]
    UpdateNotAuthorized { vote_group: String, target: String },

    /// Upgrade put to a group other than the admin group
    #[error("Upgrade proposals must be voted on by admin group")]
    UpgradeNotAdmin,

    /// Upgrade with no modules
    #[error("Software upgrade requires > 0 modules")]
    EmptyUpgrade,

    /// No active proposal with this ID (including already-resolved ones)
    #[error("Unknown proposal {id}")]
    UnknownProposal { id: String },

    /// Vote cast at a height the chain has not reached
    #[error("Vote height {height} is ahead of chain height {chain_height}")]
    VoteFromFuture { height: u64, chain_height: u64 },

    /// Vote cast outside the proposal window
    #[error("Vote height {height} outside proposal window [{start}, {end}]")]
    VoteOutsideWindow { height: u64, start: u64, end: u64 },

    /// Voter is not a member of the voting group
    #[error("Voter {entity} not a member of {group}")]
    VoterNotMember { entity: String, group: String },

    /// Voter already has a vote on this proposal
    #[error("Voter {entity} already voted")]
    DuplicateVote { entity: String },
}

impl TxError {
    /// Status code reported to the consensus host.
    pub fn code(&self) -> ResultCode {
        match self {
            TxError::Encoding(_) | TxError::MalformedProposal(_) | TxError::EmptyUpgrade => {
                ResultCode::EncodingError
            }
            TxError::UnknownEntity { .. } | TxError::UnknownMemberEntity { .. } => {
                ResultCode::UnknownEntity
            }
            TxError::InvalidSignature
            | TxError::ProposerNotMember { .. }
            | TxError::UpdateNotAuthorized { .. }
            | TxError::UpgradeNotAdmin => ResultCode::Unauthorized,
            TxError::UnknownVoteGroup { .. }
            | TxError::UnknownGroup { .. }
            | TxError::StaleGroupVersion { .. } => ResultCode::UnknownGroup,
            TxError::DuplicateProposal { .. } => ResultCode::DuplicateProposal,
            TxError::DuplicateGroup { .. } => ResultCode::DuplicateGroup,
            TxError::DuplicateMember { .. } => ResultCode::DuplicateMember,
            TxError::ZeroVotingPower { .. } | TxError::VotingPowerTooLarge { .. } => {
                ResultCode::InvalidVotingPower
            }
            TxError::UnknownProposal { .. } => ResultCode::UnknownProposal,
            TxError::VoteFromFuture { .. } | TxError::VoteOutsideWindow { .. } => {
                ResultCode::InvalidVote
            }
            TxError::VoterNotMember { .. } => ResultCode::InvalidMember,
            TxError::DuplicateVote { .. } => ResultCode::DuplicateVote,
        }
    }
}

/// Outcome of applying a transaction that did not succeed.
#[derive(Debug, Error)]
pub enum GovError {
    #[error(transparent)]
    Rejected(#[from] TxError),

    #[error("Store fault: {0}")]
    Store(#[from] StoreError),
}
