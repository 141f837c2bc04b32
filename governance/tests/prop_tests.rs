use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use proptest::prelude::*;

use council_governance::{Council, GovernanceConfig, ProposalStatus};
use council_nullables::{NullClock, NullSink};
use council_types::{Clock, MemberId, ProposalId};

const WINDOW: u64 = 1_000;

#[derive(Clone, Debug)]
enum Op {
    Add { caller: u8, target: u8, power: u64 },
    Remove { caller: u8, target: u8 },
    Create { caller: u8 },
    Vote { caller: u8, proposal: u64, support: bool },
    Execute { caller: u8, proposal: u64 },
    Advance { secs: u64 },
}

fn op() -> impl Strategy<Value = Op> {
    // Seeds 0..6 map to a small identity pool; seed 0 is the owner.
    prop_oneof![
        (0u8..6, 1u8..6, 0u64..20).prop_map(|(caller, target, power)| Op::Add { caller, target, power }),
        (0u8..6, 0u8..6).prop_map(|(caller, target)| Op::Remove { caller, target }),
        (0u8..6).prop_map(|caller| Op::Create { caller }),
        (0u8..6, 0u64..6, any::<bool>()).prop_map(|(caller, proposal, support)| Op::Vote { caller, proposal, support }),
        (0u8..6, 0u64..6).prop_map(|(caller, proposal)| Op::Execute { caller, proposal }),
        (0u64..600).prop_map(|secs| Op::Advance { secs }),
    ]
}

fn member(seed: u8) -> MemberId {
    MemberId::new([seed + 1; 32])
}

fn council() -> Council<Arc<NullClock>, Arc<NullSink>> {
    let config = GovernanceConfig {
        voting_duration_secs: WINDOW,
        ..Default::default()
    };
    Council::initialize(member(0), config, Arc::new(NullClock::new(0)), Arc::new(NullSink::new()))
        .unwrap()
}

proptest! {
    /// Active-member count, exact tallies, and vote-window rules hold after
    /// every step of an arbitrary operation sequence.
    #[test]
    fn invariants_hold_for_any_sequence(ops in prop::collection::vec(op(), 1..80)) {
        let council = council();
        // Expected power contributed per (proposal, voter), tracked from successful votes.
        let mut expected: HashMap<u64, HashMap<MemberId, (bool, u64)>> = HashMap::new();

        for op in ops {
            match op {
                Op::Add { caller, target, power } => {
                    let _ = council.add_member(&member(caller), member(target), power);
                }
                Op::Remove { caller, target } => {
                    let _ = council.remove_member(&member(caller), member(target));
                }
                Op::Create { caller } => {
                    let _ = council.create_proposal(&member(caller), "p");
                }
                Op::Vote { caller, proposal, support } => {
                    let pid = ProposalId::new(proposal);
                    let voter = member(caller);
                    let power = council.get_member(&voter).voting_power;
                    let before = council.get_proposal(pid).ok();
                    let result = council.vote(&voter, pid, support);
                    match (&result, before) {
                        (Ok(()), Some(before)) => {
                            prop_assert_eq!(before.status(council.clock().now()), ProposalStatus::Open);
                            let prev = expected.entry(proposal).or_default().insert(voter, (support, power));
                            prop_assert!(prev.is_none(), "identity counted twice");
                        }
                        (Ok(()), None) => prop_assert!(false, "vote on missing proposal succeeded"),
                        (Err(_), Some(before)) => {
                            let after = council.get_proposal(pid).unwrap();
                            prop_assert_eq!(before.votes_for, after.votes_for);
                            prop_assert_eq!(before.votes_against, after.votes_against);
                        }
                        (Err(_), None) => {}
                    }
                }
                Op::Execute { caller, proposal } => {
                    let pid = ProposalId::new(proposal);
                    let before = council.get_proposal(pid).ok();
                    let result = council.execute_proposal(&member(caller), pid);
                    if let Some(before) = before {
                        let closed = council.clock().now() >= before.end_time;
                        let should_pass = closed && !before.executed && before.votes_for > before.votes_against;
                        prop_assert_eq!(result.is_ok(), should_pass);
                    }
                }
                Op::Advance { secs } => council.clock().advance(secs),
            }

            let members = council.members();
            let active = members.iter().filter(|m| m.is_active).count() as u64;
            prop_assert_eq!(council.total_active_members(), active);
            prop_assert!(members.iter().filter(|m| m.is_active).all(|m| m.voting_power >= 1));

            for proposal in council.proposals() {
                let ballots = expected.get(&proposal.id.as_u64());
                let (mut yes, mut no) = (0u64, 0u64);
                let mut seen = HashSet::new();
                for (voter, (support, power)) in ballots.into_iter().flatten() {
                    prop_assert!(seen.insert(*voter));
                    if *support { yes += power } else { no += power }
                }
                prop_assert_eq!(proposal.votes_for, yes);
                prop_assert_eq!(proposal.votes_against, no);
                prop_assert_eq!(proposal.ballots.len(), seen.len());
            }
        }
    }

    /// Proposal ids are dense and strictly increasing from zero.
    #[test]
    fn proposal_ids_are_dense(creates in 1usize..30) {
        let council = council();
        for expected in 0..creates as u64 {
            let pid = council.create_proposal(&member(0), "p").unwrap();
            prop_assert_eq!(pid, ProposalId::new(expected));
        }
        prop_assert_eq!(council.proposal_count(), creates as u64);
    }

    /// Execution before the window closes always fails; afterwards it
    /// succeeds exactly once iff votes for strictly exceed votes against.
    #[test]
    fn execution_requires_close_and_strict_majority(
        powers in prop::collection::vec((1u64..50, any::<bool>()), 1..6),
    ) {
        let council = council();
        for (i, (power, _)) in powers.iter().enumerate() {
            council.add_member(&member(0), member(i as u8 + 1), *power).unwrap();
        }
        let pid = council.create_proposal(&member(0), "p").unwrap();
        for (i, (_, support)) in powers.iter().enumerate() {
            council.vote(&member(i as u8 + 1), pid, *support).unwrap();
        }
        prop_assert!(council.execute_proposal(&member(0), pid).is_err());

        council.clock().advance(WINDOW);
        let yes: u64 = powers.iter().filter(|(_, s)| *s).map(|(p, _)| p).sum();
        let no: u64 = powers.iter().filter(|(_, s)| !*s).map(|(p, _)| p).sum();
        prop_assert_eq!(council.execute_proposal(&member(0), pid).is_ok(), yes > no);
        prop_assert!(council.execute_proposal(&member(0), pid).is_err());
    }
}
