//! # Vote Tally
//!
//! Votes are weighted by the voter's current power in the voting group.
//! A value wins once its cumulative power is strictly more than half of the
//! group's total power. With equal weights this is `votes > members / 2`.
//!
//! Voters who have since left the group count with zero weight.

use shared_types::{Group, SignedVote};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    /// Power behind each distinct value, in order of first appearance.
    pub totals: Vec<(String, u128)>,
    pub group_power: u128,
}

impl Tally {
    pub fn compute(group: &Group, votes: &[SignedVote]) -> Self {
        let mut totals: Vec<(String, u128)> = Vec::new();
        for signed in votes {
            let power = group
                .member(&signed.vote.entity_id)
                .map_or(0, |m| m.voting_power as u128);
            match totals.iter_mut().find(|(value, _)| *value == signed.vote.value) {
                Some((_, total)) => *total += power,
                None => totals.push((signed.vote.value.clone(), power)),
            }
        }
        Self {
            totals,
            group_power: group.total_voting_power(),
        }
    }

    /// The value holding a strict majority of group power, if any.
    pub fn winner(&self) -> Option<&str> {
        self.totals
            .iter()
            .find(|(_, power)| power * 2 > self.group_power)
            .map(|(value, _)| value.as_str())
    }
}
