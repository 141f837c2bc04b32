//! The council — registry and ledger behind a single write boundary.
//!
//! Every mutating operation holds the write lock for its whole
//! check-then-act sequence, reads the clock once, and emits its event before
//! releasing the lock, so observers see events in operation order and no
//! reader ever sees a half-applied mutation.

use crate::config::GovernanceConfig;
use crate::error::GovernanceError;
use crate::ledger::ProposalLedger;
use crate::membership::{Member, MembershipRegistry};
use crate::proposal::{Proposal, ProposalStatus};
use council_types::{Clock, MemberId, NotificationSink, ProposalId};
use council_utils::format_duration;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

struct GovernanceState {
    members: MembershipRegistry,
    proposals: ProposalLedger,
}

pub struct Council<C, S> {
    config: GovernanceConfig,
    clock: C,
    sink: S,
    state: RwLock<GovernanceState>,
}

impl<C: Clock, S: NotificationSink> Council<C, S> {
    /// Build the council with `owner` as its first member.
    ///
    /// Initialization emits no event; the owner is simply present from the start.
    pub fn initialize(
        owner: MemberId,
        config: GovernanceConfig,
        clock: C,
        sink: S,
    ) -> Result<Self, GovernanceError> {
        config.validate()?;
        let now = clock.now();
        let members = MembershipRegistry::initialize(
            owner,
            config.owner_voting_power,
            config.min_voting_power,
            now,
        )?;
        let proposals = ProposalLedger::new(config.voting_duration_secs, config.max_description_len);
        info!(
            %owner,
            owner_voting_power = config.owner_voting_power,
            voting_window = %format_duration(config.voting_duration_secs),
            "council initialized"
        );
        Ok(Self {
            config,
            clock,
            sink,
            state: RwLock::new(GovernanceState { members, proposals }),
        })
    }

    // ── Membership ─────────────────────────────────────────────────────

    pub fn add_member(
        &self,
        caller: &MemberId,
        new_id: MemberId,
        voting_power: u64,
    ) -> Result<(), GovernanceError> {
        let mut state = self.write();
        let now = self.clock.now();
        match state.members.add_member(caller, new_id, voting_power, now) {
            Ok(event) => {
                info!(member = %new_id, voting_power, "member added");
                self.sink.emit(&event);
                Ok(())
            }
            Err(e) => {
                debug!(%caller, member = %new_id, error = %e, "add_member rejected");
                Err(e)
            }
        }
    }

    pub fn remove_member(&self, caller: &MemberId, target: MemberId) -> Result<(), GovernanceError> {
        let mut state = self.write();
        match state.members.remove_member(caller, target) {
            Ok(event) => {
                info!(member = %target, "member removed");
                self.sink.emit(&event);
                Ok(())
            }
            Err(e) => {
                debug!(%caller, member = %target, error = %e, "remove_member rejected");
                Err(e)
            }
        }
    }

    pub fn is_member(&self, id: &MemberId) -> bool {
        self.read().members.is_member(id)
    }

    pub fn get_member(&self, id: &MemberId) -> Member {
        self.read().members.get_member(id)
    }

    // ── Proposals ──────────────────────────────────────────────────────

    pub fn create_proposal(
        &self,
        caller: &MemberId,
        description: impl Into<String>,
    ) -> Result<ProposalId, GovernanceError> {
        let mut state = self.write();
        let now = self.clock.now();
        let GovernanceState { members, proposals } = &mut *state;
        match proposals.create_proposal(members, caller, description.into(), now) {
            Ok((id, event)) => {
                info!(proposal = %id, proposer = %caller, "proposal created");
                self.sink.emit(&event);
                Ok(id)
            }
            Err(e) => {
                debug!(%caller, error = %e, "create_proposal rejected");
                Err(e)
            }
        }
    }

    pub fn vote(
        &self,
        caller: &MemberId,
        proposal: ProposalId,
        support: bool,
    ) -> Result<(), GovernanceError> {
        let mut state = self.write();
        let now = self.clock.now();
        let GovernanceState { members, proposals } = &mut *state;
        match proposals.vote(members, caller, proposal, support, now) {
            Ok(event) => {
                info!(%proposal, voter = %caller, support, "vote cast");
                self.sink.emit(&event);
                Ok(())
            }
            Err(e) => {
                debug!(%proposal, voter = %caller, error = %e, "vote rejected");
                Err(e)
            }
        }
    }

    /// Finalize a passed proposal. Not gated on membership: any caller,
    /// member or not, may trigger it.
    pub fn execute_proposal(
        &self,
        caller: &MemberId,
        proposal: ProposalId,
    ) -> Result<(), GovernanceError> {
        let mut state = self.write();
        let now = self.clock.now();
        match state.proposals.execute_proposal(proposal, now) {
            Ok(event) => {
                info!(%proposal, %caller, "proposal executed");
                self.sink.emit(&event);
                Ok(())
            }
            Err(e) => {
                debug!(%proposal, %caller, error = %e, "execute_proposal rejected");
                Err(e)
            }
        }
    }

    pub fn get_proposal(&self, proposal: ProposalId) -> Result<Proposal, GovernanceError> {
        self.read().proposals.get_proposal(proposal).cloned()
    }

    // ── Supplementary reads ────────────────────────────────────────────

    pub fn owner(&self) -> MemberId {
        self.read().members.access().owner()
    }

    pub fn total_active_members(&self) -> u64 {
        self.read().members.total_active_members()
    }

    pub fn proposal_count(&self) -> u64 {
        self.read().proposals.proposal_count()
    }

    pub fn has_voted(&self, proposal: ProposalId, voter: &MemberId) -> Result<bool, GovernanceError> {
        Ok(self.read().proposals.get_proposal(proposal)?.has_voted(voter))
    }

    /// Lifecycle state as of the council's clock.
    pub fn proposal_status(&self, proposal: ProposalId) -> Result<ProposalStatus, GovernanceError> {
        let state = self.read();
        state.proposals.status(proposal, self.clock.now())
    }

    /// Every member record, including removed ones, oldest first.
    pub fn members(&self) -> Vec<Member> {
        self.read().members.members()
    }

    /// Every proposal in id order.
    pub fn proposals(&self) -> Vec<Proposal> {
        self.read().proposals.proposals().to_vec()
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    // Every mutation validates before it writes, so a panic in a listener
    // cannot leave the state half-applied and a poisoned lock is safe to reuse.
    fn write(&self) -> RwLockWriteGuard<'_, GovernanceState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, GovernanceState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use council_nullables::{NullClock, NullSink};
    use std::sync::Arc;

    const WEEK: u64 = 604_800;

    fn id(seed: u8) -> MemberId {
        MemberId::new([seed; 32])
    }

    fn council() -> Council<Arc<NullClock>, Arc<NullSink>> {
        Council::initialize(
            id(1),
            GovernanceConfig::default(),
            Arc::new(NullClock::new(1_000)),
            Arc::new(NullSink::new()),
        )
        .unwrap()
    }

    #[test]
    fn initialize_registers_owner_without_event() {
        let council = council();
        assert_eq!(council.owner(), id(1));
        assert!(council.is_member(&id(1)));
        assert_eq!(council.get_member(&id(1)).voting_power, 100);
        assert_eq!(council.total_active_members(), 1);
        assert!(council.sink().is_empty());
    }

    #[test]
    fn initialize_rejects_bad_config() {
        let config = GovernanceConfig {
            voting_duration_secs: 0,
            ..Default::default()
        };
        let result = Council::initialize(id(1), config, NullClock::new(0), NullSink::new());
        assert!(matches!(result, Err(GovernanceError::Config(_))));
    }

    #[test]
    fn failed_operations_emit_nothing() {
        let council = council();
        assert_eq!(
            council.add_member(&id(2), id(3), 5).unwrap_err().kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            council.create_proposal(&id(2), "x").unwrap_err().kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            council.vote(&id(1), ProposalId::new(0), true).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert!(council.sink().is_empty());
    }

    #[test]
    fn event_order_matches_operation_order() {
        let council = council();
        council.add_member(&id(1), id(2), 10).unwrap();
        let pid = council.create_proposal(&id(2), "Upgrade treasury").unwrap();
        council.vote(&id(2), pid, true).unwrap();
        council.clock().advance(WEEK);
        council.execute_proposal(&id(9), pid).unwrap();
        council.remove_member(&id(1), id(2)).unwrap();

        assert_eq!(
            council.sink().names(),
            vec!["MemberAdded", "ProposalCreated", "VoteCast", "ProposalExecuted", "MemberRemoved"]
        );
    }

    #[test]
    fn status_tracks_clock() {
        let council = council();
        let pid = council.create_proposal(&id(1), "x").unwrap();
        assert_eq!(council.proposal_status(pid), Ok(ProposalStatus::Open));
        council.clock().advance(WEEK);
        assert_eq!(council.proposal_status(pid), Ok(ProposalStatus::ClosedPending));
        assert_eq!(
            council.proposal_status(ProposalId::new(5)),
            Err(GovernanceError::ProposalNotFound(ProposalId::new(5)))
        );
    }

    #[test]
    fn proposal_end_time_uses_configured_window() {
        let council = Council::initialize(
            id(1),
            GovernanceConfig {
                voting_duration_secs: 60,
                ..Default::default()
            },
            NullClock::new(500),
            NullSink::new(),
        )
        .unwrap();
        let pid = council.create_proposal(&id(1), "x").unwrap();
        let proposal = council.get_proposal(pid).unwrap();
        assert_eq!(proposal.created_at.as_secs(), 500);
        assert_eq!(proposal.end_time.as_secs(), 560);
    }
}
