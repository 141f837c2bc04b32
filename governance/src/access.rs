//! Capability checks gating every mutating operation.

use crate::error::GovernanceError;
use council_types::MemberId;

/// Anything that can answer "is this identity an active member right now".
pub trait ActiveMembers {
    fn is_active(&self, id: &MemberId) -> bool;
}

/// Owner and member predicates over current state plus the invoking identity.
///
/// The owner is fixed at initialization and never transferred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessControl {
    owner: MemberId,
}

impl AccessControl {
    pub fn new(owner: MemberId) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> MemberId {
        self.owner
    }

    pub fn is_owner(&self, caller: &MemberId) -> bool {
        *caller == self.owner
    }

    pub fn is_active_member(&self, members: &impl ActiveMembers, caller: &MemberId) -> bool {
        members.is_active(caller)
    }

    pub fn require_owner(&self, caller: &MemberId) -> Result<(), GovernanceError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(GovernanceError::NotOwner(*caller))
        }
    }

    pub fn require_active_member(
        &self,
        members: &impl ActiveMembers,
        caller: &MemberId,
    ) -> Result<(), GovernanceError> {
        if self.is_active_member(members, caller) {
            Ok(())
        } else {
            Err(GovernanceError::NotActiveMember(*caller))
        }
    }
}
