//! Membership-gated governance for the council ledger.
//!
//! Members carry weighted voting power. Active members submit proposals and
//! cast one weighted vote each while a proposal's voting window is open. Once
//! the window closes, anyone may execute a proposal whose votes for strictly
//! exceed its votes against; execution happens at most once.
//!
//! Layering, bottom-up: [`AccessControl`] → [`MembershipRegistry`] →
//! [`ProposalLedger`], all wrapped by [`Council`], which serializes
//! mutations and reports them through a
//! [`NotificationSink`](council_types::NotificationSink).

pub mod access;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod ledger;
pub mod membership;
pub mod proposal;

pub use access::{AccessControl, ActiveMembers};
pub use config::GovernanceConfig;
pub use engine::Council;
pub use error::{ErrorKind, GovernanceError};
pub use events::{EventBus, TracingSink};
pub use ledger::ProposalLedger;
pub use membership::{Member, MembershipRegistry};
pub use proposal::{Ballot, Proposal, ProposalStatus};
