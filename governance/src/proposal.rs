//! Governance proposals and their lifecycle.

use council_types::{MemberId, ProposalId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a proposal sits in its lifecycle.
///
/// `Open` → `ClosedPending` happens by the clock alone. `ClosedPending` →
/// `Executed` only through a successful execution; a proposal that closed
/// without a majority stays `ClosedPending` forever.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Accepting votes.
    Open,
    /// Voting window has passed, not executed.
    ClosedPending,
    /// Terminal.
    Executed,
}

/// One member's vote, with the weight captured when it was cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub support: bool,
    pub voting_power: u64,
    pub cast_at: Timestamp,
}

/// A governance proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub description: String,
    /// Who proposed it.
    pub proposer: MemberId,
    pub votes_for: u64,
    pub votes_against: u64,
    pub created_at: Timestamp,
    /// Votes are accepted strictly before this instant.
    pub end_time: Timestamp,
    pub executed: bool,
    /// Votes: voter → ballot. At most one per identity.
    pub ballots: BTreeMap<MemberId, Ballot>,
}

impl Proposal {
    pub fn new(
        id: ProposalId,
        proposer: MemberId,
        description: String,
        created_at: Timestamp,
        voting_duration_secs: u64,
    ) -> Self {
        Self {
            id,
            description,
            proposer,
            votes_for: 0,
            votes_against: 0,
            created_at,
            end_time: created_at.saturating_add(voting_duration_secs),
            executed: false,
            ballots: BTreeMap::new(),
        }
    }

    pub fn has_voted(&self, voter: &MemberId) -> bool {
        self.ballots.contains_key(voter)
    }

    /// Strict weighted majority.
    pub fn has_majority(&self) -> bool {
        self.votes_for > self.votes_against
    }

    pub fn status(&self, now: Timestamp) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Executed
        } else if now < self.end_time {
            ProposalStatus::Open
        } else {
            ProposalStatus::ClosedPending
        }
    }
}
