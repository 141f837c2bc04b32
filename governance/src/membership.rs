//! Membership registry — admission, removal, and voting power.
//!
//! Removal only flips `is_active`; the record keeps its voting power and join
//! time for audit. Re-admitting a removed identity overwrites that record.

use crate::access::{AccessControl, ActiveMembers};
use crate::error::GovernanceError;
use council_types::{GovernanceEvent, MemberId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A member record. Unknown identities read as an inactive, zero-power record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub is_active: bool,
    pub voting_power: u64,
    pub joined_at: Timestamp,
}

impl Member {
    fn absent(id: MemberId) -> Self {
        Self {
            id,
            is_active: false,
            voting_power: 0,
            joined_at: Timestamp::EPOCH,
        }
    }
}

pub struct MembershipRegistry {
    access: AccessControl,
    members: HashMap<MemberId, Member>,
    total_active: u64,
    min_voting_power: u64,
}

impl MembershipRegistry {
    /// Register `owner` as the first member. The only path that admits a
    /// member without an `add_member` call.
    pub fn initialize(
        owner: MemberId,
        owner_voting_power: u64,
        min_voting_power: u64,
        now: Timestamp,
    ) -> Result<Self, GovernanceError> {
        if owner.is_zero() {
            return Err(GovernanceError::ZeroIdentity);
        }
        if owner_voting_power < min_voting_power {
            return Err(GovernanceError::InsufficientVotingPower {
                have: owner_voting_power,
                need: min_voting_power,
            });
        }
        let mut members = HashMap::new();
        members.insert(
            owner,
            Member {
                id: owner,
                is_active: true,
                voting_power: owner_voting_power,
                joined_at: now,
            },
        );
        Ok(Self {
            access: AccessControl::new(owner),
            members,
            total_active: 1,
            min_voting_power,
        })
    }

    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    /// Fail with `NotActiveMember` unless `caller` is currently active.
    pub fn require_active(&self, caller: &MemberId) -> Result<&Member, GovernanceError> {
        self.access.require_active_member(self, caller)?;
        self.members
            .get(caller)
            .ok_or(GovernanceError::NotActiveMember(*caller))
    }

    /// Admit `new_id` with `voting_power`. Owner only.
    pub fn add_member(
        &mut self,
        caller: &MemberId,
        new_id: MemberId,
        voting_power: u64,
        now: Timestamp,
    ) -> Result<GovernanceEvent, GovernanceError> {
        self.access.require_owner(caller)?;
        if new_id.is_zero() {
            return Err(GovernanceError::ZeroIdentity);
        }
        if self.is_member(&new_id) {
            return Err(GovernanceError::MemberAlreadyActive(new_id));
        }
        if voting_power < self.min_voting_power {
            return Err(GovernanceError::InsufficientVotingPower {
                have: voting_power,
                need: self.min_voting_power,
            });
        }

        self.members.insert(
            new_id,
            Member {
                id: new_id,
                is_active: true,
                voting_power,
                joined_at: now,
            },
        );
        self.total_active += 1;
        Ok(GovernanceEvent::MemberAdded {
            member: new_id,
            voting_power,
        })
    }

    /// Deactivate `target`. Owner only; the owner itself cannot be removed.
    pub fn remove_member(
        &mut self,
        caller: &MemberId,
        target: MemberId,
    ) -> Result<GovernanceEvent, GovernanceError> {
        self.access.require_owner(caller)?;
        if self.access.is_owner(&target) {
            return Err(GovernanceError::CannotRemoveOwner);
        }
        let member = self
            .members
            .get_mut(&target)
            .filter(|m| m.is_active)
            .ok_or(GovernanceError::MemberNotActive(target))?;

        member.is_active = false;
        self.total_active -= 1;
        Ok(GovernanceEvent::MemberRemoved { member: target })
    }

    pub fn is_member(&self, id: &MemberId) -> bool {
        self.members.get(id).is_some_and(|m| m.is_active)
    }

    /// The stored record, including inert records of removed members.
    pub fn get_member(&self, id: &MemberId) -> Member {
        self.members
            .get(id)
            .cloned()
            .unwrap_or_else(|| Member::absent(*id))
    }

    pub fn total_active_members(&self) -> u64 {
        self.total_active
    }

    /// Every record ever admitted, oldest first.
    pub fn members(&self) -> Vec<Member> {
        let mut all: Vec<Member> = self.members.values().cloned().collect();
        all.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then(a.id.cmp(&b.id)));
        all
    }
}

impl ActiveMembers for MembershipRegistry {
    fn is_active(&self, id: &MemberId) -> bool {
        self.is_member(id)
    }
}
