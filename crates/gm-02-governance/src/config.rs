//! # Governance Configuration
//!
//! Explicit choices for behaviour that differs between deployments. Every
//! replica of a chain must run with the same configuration, since each field
//! changes which transactions are admissible.

use gm_01_state_store::StoreConfig;
use serde::{Deserialize, Serialize};
use shared_types::{ADMIN_GROUP_ID, VALIDATORS_GROUP_ID};

/// How proposal IDs are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalIdPolicy {
    /// Any non-empty ID not used by an active proposal or resolution.
    #[default]
    CallerSupplied,
    /// ID must equal the proposal's content hash, so resubmitting an
    /// identical proposal is rejected as a duplicate.
    ContentHash,
}

/// Who may propose restructuring a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupUpdateAuth {
    /// The target group's parent must be the voting group.
    #[default]
    ParentLink,
    /// The proposer must be a member of the target group.
    TargetMembership,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovConfig {
    pub proposal_ids: ProposalIdPolicy,
    pub group_update_auth: GroupUpdateAuth,
    /// Reject group updates drafted against a version other than the current one.
    pub enforce_group_version: bool,
    /// Only this group may vote on upgrades.
    pub admin_group_id: String,
    /// Group assembled at InitChain. Resolved updates to it become validator-set changes.
    pub validators_group_id: String,
    pub store: StoreConfig,
}

impl Default for GovConfig {
    fn default() -> Self {
        Self {
            proposal_ids: ProposalIdPolicy::default(),
            group_update_auth: GroupUpdateAuth::default(),
            enforce_group_version: true,
            admin_group_id: ADMIN_GROUP_ID.to_string(),
            validators_group_id: VALIDATORS_GROUP_ID.to_string(),
            store: StoreConfig::default(),
        }
    }
}
