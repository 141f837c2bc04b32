//! State-change notifications and the sink they are reported through.

use crate::identity::MemberId;
use crate::proposal::ProposalId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Every successful mutation reports exactly one of these.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    MemberAdded {
        member: MemberId,
        voting_power: u64,
    },
    MemberRemoved {
        member: MemberId,
    },
    ProposalCreated {
        proposal: ProposalId,
        proposer: MemberId,
        description: String,
    },
    VoteCast {
        proposal: ProposalId,
        voter: MemberId,
        support: bool,
        voting_power: u64,
    },
    ProposalExecuted {
        proposal: ProposalId,
    },
}

impl GovernanceEvent {
    /// External event name as observers know it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MemberAdded { .. } => "MemberAdded",
            Self::MemberRemoved { .. } => "MemberRemoved",
            Self::ProposalCreated { .. } => "ProposalCreated",
            Self::VoteCast { .. } => "VoteCast",
            Self::ProposalExecuted { .. } => "ProposalExecuted",
        }
    }
}

/// Where state changes are reported to external observers.
///
/// Fire-and-forget: implementations must not block and cannot fail the
/// operation that triggered the event.
pub trait NotificationSink: Send + Sync {
    fn emit(&self, event: &GovernanceEvent);
}

impl<S: NotificationSink + ?Sized> NotificationSink for &S {
    fn emit(&self, event: &GovernanceEvent) {
        (**self).emit(event)
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for Arc<S> {
    fn emit(&self, event: &GovernanceEvent) {
        (**self).emit(event)
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for Box<S> {
    fn emit(&self, event: &GovernanceEvent) {
        (**self).emit(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_external_event_names() {
        let member = MemberId::new([1; 32]);
        assert_eq!(
            GovernanceEvent::MemberAdded { member, voting_power: 5 }.name(),
            "MemberAdded"
        );
        assert_eq!(GovernanceEvent::MemberRemoved { member }.name(), "MemberRemoved");
        assert_eq!(
            GovernanceEvent::ProposalExecuted { proposal: ProposalId::new(0) }.name(),
            "ProposalExecuted"
        );
    }

    #[test]
    fn events_serialize_externally_tagged() {
        let event = GovernanceEvent::VoteCast {
            proposal: ProposalId::new(3),
            voter: MemberId::new([2; 32]),
            support: false,
            voting_power: 1,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["VoteCast"]["proposal"], 3);
        assert_eq!(json["VoteCast"]["voting_power"], 1);
    }
}
