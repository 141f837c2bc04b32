//! Deterministic replay of operation scripts.
//!
//! Time is driven by a [`NullClock`] so the script alone decides when a
//! voting window closes. A failed step is reported and replay continues.

use council_governance::{Council, EventBus, GovernanceConfig, GovernanceError, Member, Proposal, TracingSink};
use council_nullables::NullClock;
use council_types::{GovernanceEvent, MemberId, NotificationSink, ProposalId};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// One scripted call, as an authenticated caller would issue it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    AddMember {
        caller: MemberId,
        member: MemberId,
        voting_power: u64,
    },
    RemoveMember {
        caller: MemberId,
        member: MemberId,
    },
    CreateProposal {
        caller: MemberId,
        description: String,
    },
    Vote {
        caller: MemberId,
        proposal: ProposalId,
        support: bool,
    },
    ExecuteProposal {
        caller: MemberId,
        proposal: ProposalId,
    },
    /// Move the replay clock forward.
    Advance { secs: u64 },
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Self::AddMember { .. } => "add_member",
            Self::RemoveMember { .. } => "remove_member",
            Self::CreateProposal { .. } => "create_proposal",
            Self::Vote { .. } => "vote",
            Self::ExecuteProposal { .. } => "execute_proposal",
            Self::Advance { .. } => "advance",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub op: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<ProposalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub owner: MemberId,
    pub config: GovernanceConfig,
    pub steps: Vec<StepOutcome>,
    pub total_active_members: u64,
    pub members: Vec<Member>,
    pub proposals: Vec<Proposal>,
    pub events: Vec<GovernanceEvent>,
}

pub fn parse_script(text: &str) -> anyhow::Result<Vec<Step>> {
    Ok(serde_json::from_str(text)?)
}

pub fn run(
    owner: MemberId,
    config: GovernanceConfig,
    start_time: u64,
    steps: &[Step],
) -> anyhow::Result<Report> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut bus = EventBus::new();
    let recorded = Arc::clone(&log);
    bus.subscribe(Box::new(move |event: &GovernanceEvent| {
        recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }));
    bus.subscribe(Box::new(|event: &GovernanceEvent| TracingSink.emit(event)));

    let clock = Arc::new(NullClock::new(start_time));
    let council = Council::initialize(owner, config, Arc::clone(&clock), bus)?;

    let mut outcomes = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let result = apply(&council, &clock, step);
        let outcome = match result {
            Ok(proposal) => StepOutcome {
                index,
                op: step.name(),
                ok: true,
                proposal,
                error: None,
                kind: None,
            },
            Err(e) => {
                tracing::warn!(index, op = step.name(), error = %e, "step failed");
                StepOutcome {
                    index,
                    op: step.name(),
                    ok: false,
                    proposal: None,
                    error: Some(e.to_string()),
                    kind: Some(format!("{:?}", e.kind())),
                }
            }
        };
        outcomes.push(outcome);
    }

    let events = log.lock().unwrap_or_else(PoisonError::into_inner).clone();
    Ok(Report {
        owner,
        config: council.config().clone(),
        steps: outcomes,
        total_active_members: council.total_active_members(),
        members: council.members(),
        proposals: council.proposals(),
        events,
    })
}

fn apply<S: NotificationSink>(
    council: &Council<Arc<NullClock>, S>,
    clock: &NullClock,
    step: &Step,
) -> Result<Option<ProposalId>, GovernanceError> {
    match step {
        Step::AddMember {
            caller,
            member,
            voting_power,
        } => council.add_member(caller, *member, *voting_power).map(|_| None),
        Step::RemoveMember { caller, member } => {
            council.remove_member(caller, *member).map(|_| None)
        }
        Step::CreateProposal {
            caller,
            description,
        } => council
            .create_proposal(caller, description.as_str())
            .map(Some),
        Step::Vote {
            caller,
            proposal,
            support,
        } => council.vote(caller, *proposal, *support).map(|_| None),
        Step::ExecuteProposal { caller, proposal } => {
            council.execute_proposal(caller, *proposal).map(|_| None)
        }
        Step::Advance { secs } => {
            clock.advance(*secs);
            Ok(None)
        }
    }
}
