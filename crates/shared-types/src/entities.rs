//! # Core Domain Entities
//!
//! The persisted object graph of the governance state machine.
//!
//! ## Clusters
//!
//! - **Identity**: `Entity`, `Validator`
//! - **Membership**: `Group`, `Member`
//! - **Decisions**: `Proposal`, `ProposalInfo`, `ActiveProposal`, `Vote`, `SignedVote`, `Resolution`
//! - **Process**: `GovMeta`

use serde::{Deserialize, Serialize};
pub use shared_crypto::{Ed25519PublicKey as PubKey, Ed25519Signature as Signature};

/// Largest admissible voting power: 2^53 - 1, exactly representable as an f64.
pub const MAX_VOTING_POWER: u64 = (1 << 53) - 1;

/// ID of the group bootstrapped through SetOption("admin", ..).
pub const ADMIN_GROUP_ID: &str = "admin";

/// ID of the group assembled from the validator set at InitChain.
pub const VALIDATORS_GROUP_ID: &str = "validators";

/// Vote value that makes a resolution executable.
pub const VOTE_YES: &str = "yes";

/// Conventional negative vote value.
pub const VOTE_NO: &str = "no";

/// Unique entity identifier.
pub type EntityId = String;

/// Unique group identifier.
pub type GroupId = String;

/// Unique proposal identifier.
pub type ProposalId = String;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A registered identity holding a public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique ID.
    pub id: EntityId,
    /// Key that must sign every transaction issued by this entity.
    pub pub_key: PubKey,
}

impl Entity {
    /// Entity whose ID is the hex address of its key.
    pub fn from_pub_key(pub_key: PubKey) -> Self {
        Self {
            id: hex::encode(pub_key.address()),
            pub_key,
        }
    }
}

/// A validator as reported by the consensus host.
///
/// Used both for InitChain input and for EndBlock validator-set changes,
/// where `power == 0` removes the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    /// Consensus public key.
    pub pub_key: PubKey,
    /// Voting power in the consensus engine.
    pub power: u64,
}

/// A validator-set change returned from EndBlock.
pub type ValidatorUpdate = Validator;

// =============================================================================
// CLUSTER B: MEMBERSHIP
// =============================================================================

/// An (entity, voting power) pair within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member entity.
    pub entity_id: EntityId,
    /// Weight of this member's vote.
    pub voting_power: u64,
}

impl Member {
    /// Create a member.
    pub fn new(entity_id: impl Into<EntityId>, voting_power: u64) -> Self {
        Self {
            entity_id: entity_id.into(),
            voting_power,
        }
    }
}

/// A named, versioned, weighted membership set.
///
/// Member entity IDs are unique within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique ID.
    pub id: GroupId,
    /// Group whose votes may restructure this one.
    pub parent_id: Option<GroupId>,
    /// Bumped by exactly one per applied update.
    pub version: u64,
    /// Ordered members.
    pub members: Vec<Member>,
}

impl Group {
    /// Look up a member by entity ID.
    pub fn member(&self, entity_id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.entity_id == entity_id)
    }

    /// Membership is by entity ID equality, not position.
    pub fn is_member(&self, entity_id: &str) -> bool {
        self.member(entity_id).is_some()
    }

    /// Sum of all members' voting power.
    ///
    /// Widened to u128 so any number of members at `MAX_VOTING_POWER` cannot overflow.
    pub fn total_voting_power(&self) -> u128 {
        self.members.iter().map(|m| m.voting_power as u128).sum()
    }

    /// Apply a member change list and bump the version.
    ///
    /// Power 0 removes the member, an existing member gets its power replaced,
    /// an unknown one is appended. Returns the members whose power changed,
    /// with power 0 for removals.
    pub fn apply_member_changes(&mut self, changed: &[Member]) -> Vec<Member> {
        let mut effective = Vec::new();
        for change in changed {
            let position = self
                .members
                .iter()
                .position(|m| m.entity_id == change.entity_id);
            match (position, change.voting_power) {
                (Some(i), 0) => {
                    self.members.remove(i);
                    effective.push(change.clone());
                }
                (Some(i), power) => {
                    if self.members[i].voting_power != power {
                        self.members[i].voting_power = power;
                        effective.push(change.clone());
                    }
                }
                (None, 0) => {}
                (None, _) => {
                    self.members.push(change.clone());
                    effective.push(change.clone());
                }
            }
        }
        self.version += 1;
        effective
    }
}

// =============================================================================
// CLUSTER C: DECISIONS
// =============================================================================

/// Create a new group once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCreateProposalInfo {
    /// ID the new group will take.
    pub new_group_id: GroupId,
    /// Initial members.
    pub members: Vec<Member>,
}

/// Restructure an existing group once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUpdateProposalInfo {
    /// Target group.
    pub update_group_id: GroupId,
    /// Version of the target group the proposal was drafted against.
    pub group_version: u64,
    /// Members to add, re-weight, or remove (voting power 0).
    pub changed_members: Vec<Member>,
}

/// Free-form signalling proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextProposalInfo {
    /// Proposal text.
    pub text: String,
}

/// One module of a software upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeModule {
    /// Module name.
    pub name: String,
    /// Upgrade script or artifact reference.
    pub script: String,
}

/// Software upgrade, admissible only for the admin group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeProposalInfo {
    /// Modules to upgrade, must be non-empty.
    pub modules: Vec<UpgradeModule>,
}

/// The action a proposal requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalInfo {
    /// See [`GroupCreateProposalInfo`].
    GroupCreate(GroupCreateProposalInfo),
    /// See [`GroupUpdateProposalInfo`].
    GroupUpdate(GroupUpdateProposalInfo),
    /// See [`TextProposalInfo`].
    Text(TextProposalInfo),
    /// See [`UpgradeProposalInfo`].
    Upgrade(UpgradeProposalInfo),
}

impl ProposalInfo {
    /// Short name of the variant for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProposalInfo::GroupCreate(_) => "group-create",
            ProposalInfo::GroupUpdate(_) => "group-update",
            ProposalInfo::Text(_) => "text",
            ProposalInfo::Upgrade(_) => "upgrade",
        }
    }
}

/// A group-scoped request put to a vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique ID.
    pub id: ProposalId,
    /// Group whose members may vote.
    pub vote_group_id: GroupId,
    /// First height at which votes are accepted.
    pub start_height: u64,
    /// Last height at which votes are accepted.
    pub end_height: u64,
    /// Requested action.
    pub info: ProposalInfo,
}

/// One member's stance on one proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Proposal voted on.
    pub proposal_id: ProposalId,
    /// Voter.
    pub entity_id: EntityId,
    /// Height at which the vote was cast.
    pub height: u64,
    /// Free-form choice, `"yes"`/`"no"` by convention.
    pub value: String,
}

/// A vote together with the voter's signature over its canonical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedVote {
    /// The vote.
    pub vote: Vote,
    /// Signature over `vote.sign_bytes()`.
    pub signature: Signature,
}

/// A proposal collecting votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveProposal {
    /// The proposal.
    pub proposal: Proposal,
    /// At most one entry per voter, in arrival order.
    pub signed_votes: Vec<SignedVote>,
}

impl ActiveProposal {
    /// Fresh proposal with no votes.
    pub fn new(proposal: Proposal) -> Self {
        Self {
            proposal,
            signed_votes: Vec::new(),
        }
    }

    /// Whether `entity_id` already has a recorded vote.
    pub fn has_voted(&self, entity_id: &str) -> bool {
        self.signed_votes
            .iter()
            .any(|sv| sv.vote.entity_id == entity_id)
    }
}

/// A closed proposal. Terminal: never mutated again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The proposal.
    pub proposal: Proposal,
    /// Votes recorded up to and including the deciding one.
    pub signed_votes: Vec<SignedVote>,
    /// Winning vote value.
    pub outcome: String,
    /// Height at which the threshold was crossed.
    pub resolved_at: u64,
}

impl Resolution {
    /// Whether the winning value was `"yes"`.
    pub fn passed(&self) -> bool {
        self.outcome == VOTE_YES
    }
}

// =============================================================================
// CLUSTER D: PROCESS
// =============================================================================

/// Process-wide persisted counters. Exactly one instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovMeta {
    /// Current block height.
    pub height: u64,
}
