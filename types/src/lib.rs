//! Fundamental types for the council ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! member identities, proposal ids, timestamps, and the two boundaries the core
//! consumes from its host (a [`Clock`] and a [`NotificationSink`]).

pub mod error;
pub mod event;
pub mod identity;
pub mod proposal;
pub mod time;

pub use error::TypesError;
pub use event::{GovernanceEvent, NotificationSink};
pub use identity::MemberId;
pub use proposal::ProposalId;
pub use time::{Clock, SystemClock, Timestamp};
