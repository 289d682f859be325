//! # Stateless Checks
//!
//! Rules that depend only on the transaction and values already loaded from
//! the store. Each returns the first violation found, in list order.

use super::errors::TxError;
use shared_types::{Member, Proposal, Vote, MAX_VOTING_POWER};
use std::collections::BTreeSet;

/// No entity may appear twice in a member list. An empty list is fine.
pub fn check_unique_members(members: &[Member]) -> Result<(), TxError> {
    let mut seen = BTreeSet::new();
    for member in members {
        if !seen.insert(member.entity_id.as_str()) {
            return Err(TxError::DuplicateMember {
                entity: member.entity_id.clone(),
            });
        }
    }
    Ok(())
}

/// Members of a new group need power in `(0, MAX_VOTING_POWER]`.
pub fn check_new_member_powers(members: &[Member]) -> Result<(), TxError> {
    for member in members {
        if member.voting_power == 0 {
            return Err(TxError::ZeroVotingPower {
                entity: member.entity_id.clone(),
            });
        }
        check_power_bound(member)?;
    }
    Ok(())
}

/// Changed members may use power 0 (removal) but not exceed the bound.
pub fn check_changed_member_powers(members: &[Member]) -> Result<(), TxError> {
    members.iter().try_for_each(check_power_bound)
}

fn check_power_bound(member: &Member) -> Result<(), TxError> {
    if member.voting_power > MAX_VOTING_POWER {
        return Err(TxError::VotingPowerTooLarge {
            entity: member.entity_id.clone(),
            power: member.voting_power,
        });
    }
    Ok(())
}

pub fn check_window(proposal: &Proposal) -> Result<(), TxError> {
    if proposal.start_height > proposal.end_height {
        return Err(TxError::MalformedProposal(format!(
            "start height {} is after end height {}",
            proposal.start_height, proposal.end_height
        )));
    }
    Ok(())
}

/// A vote must not come from the future and must fall inside the window.
pub fn check_vote_height(vote: &Vote, proposal: &Proposal, chain_height: u64) -> Result<(), TxError> {
    if vote.height > chain_height {
        return Err(TxError::VoteFromFuture {
            height: vote.height,
            chain_height,
        });
    }
    if vote.height < proposal.start_height || vote.height > proposal.end_height {
        return Err(TxError::VoteOutsideWindow {
            height: vote.height,
            start: proposal.start_height,
            end: proposal.end_height,
        });
    }
    Ok(())
}
