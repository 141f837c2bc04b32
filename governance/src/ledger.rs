//! Proposal ledger — creation, weighted voting, and execution.
//!
//! Proposals live in a `Vec` indexed by id, so ids are dense from zero and
//! nothing is ever deleted.

use crate::error::GovernanceError;
use crate::membership::MembershipRegistry;
use crate::proposal::{Ballot, Proposal, ProposalStatus};
use council_types::{GovernanceEvent, MemberId, ProposalId, Timestamp};

pub struct ProposalLedger {
    proposals: Vec<Proposal>,
    voting_duration_secs: u64,
    max_description_len: Option<usize>,
}

impl ProposalLedger {
    pub fn new(voting_duration_secs: u64, max_description_len: Option<usize>) -> Self {
        Self {
            proposals: Vec::new(),
            voting_duration_secs,
            max_description_len,
        }
    }

    /// Id the next proposal will receive.
    pub fn next_id(&self) -> ProposalId {
        ProposalId::new(self.proposals.len() as u64)
    }

    pub fn proposal_count(&self) -> u64 {
        self.proposals.len() as u64
    }

    /// Submit a new proposal. Active members only.
    pub fn create_proposal(
        &mut self,
        members: &MembershipRegistry,
        caller: &MemberId,
        description: String,
        now: Timestamp,
    ) -> Result<(ProposalId, GovernanceEvent), GovernanceError> {
        members.require_active(caller)?;
        if description.is_empty() {
            return Err(GovernanceError::EmptyDescription);
        }
        if let Some(max) = self.max_description_len {
            if description.len() > max {
                return Err(GovernanceError::DescriptionTooLong {
                    len: description.len(),
                    max,
                });
            }
        }

        let id = self.next_id();
        let event = GovernanceEvent::ProposalCreated {
            proposal: id,
            proposer: *caller,
            description: description.clone(),
        };
        self.proposals.push(Proposal::new(
            id,
            *caller,
            description,
            now,
            self.voting_duration_secs,
        ));
        Ok((id, event))
    }

    /// Cast a weighted vote. Active members only, once per proposal, while open.
    ///
    /// The caller's voting power is read now and frozen into the ballot.
    pub fn vote(
        &mut self,
        members: &MembershipRegistry,
        caller: &MemberId,
        id: ProposalId,
        support: bool,
        now: Timestamp,
    ) -> Result<GovernanceEvent, GovernanceError> {
        let voting_power = members.require_active(caller)?.voting_power;
        let proposal = self.get_mut(id)?;
        if now >= proposal.end_time {
            return Err(GovernanceError::VotingClosed(id));
        }
        if proposal.has_voted(caller) {
            return Err(GovernanceError::AlreadyVoted {
                proposal: id,
                voter: *caller,
            });
        }
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted(id));
        }
        let tally = if support {
            proposal.votes_for
        } else {
            proposal.votes_against
        };
        let tally = tally
            .checked_add(voting_power)
            .ok_or(GovernanceError::TallyOverflow(id))?;

        if support {
            proposal.votes_for = tally;
        } else {
            proposal.votes_against = tally;
        }
        proposal.ballots.insert(
            *caller,
            Ballot {
                support,
                voting_power,
                cast_at: now,
            },
        );
        Ok(GovernanceEvent::VoteCast {
            proposal: id,
            voter: *caller,
            support,
            voting_power,
        })
    }

    /// Finalize a proposal that closed with a strict majority. Any caller may
    /// trigger this.
    pub fn execute_proposal(
        &mut self,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<GovernanceEvent, GovernanceError> {
        let proposal = self.get_mut(id)?;
        if now < proposal.end_time {
            return Err(GovernanceError::VotingStillOpen(id));
        }
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted(id));
        }
        if !proposal.has_majority() {
            return Err(GovernanceError::MajorityNotReached {
                votes_for: proposal.votes_for,
                votes_against: proposal.votes_against,
            });
        }

        proposal.executed = true;
        Ok(GovernanceEvent::ProposalExecuted { proposal: id })
    }

    pub fn get_proposal(&self, id: ProposalId) -> Result<&Proposal, GovernanceError> {
        usize::try_from(id.as_u64())
            .ok()
            .and_then(|idx| self.proposals.get(idx))
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    pub fn status(&self, id: ProposalId, now: Timestamp) -> Result<ProposalStatus, GovernanceError> {
        Ok(self.get_proposal(id)?.status(now))
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    fn get_mut(&mut self, id: ProposalId) -> Result<&mut Proposal, GovernanceError> {
        usize::try_from(id.as_u64())
            .ok()
            .and_then(|idx| self.proposals.get_mut(idx))
            .ok_or(GovernanceError::ProposalNotFound(id))
    }
}
