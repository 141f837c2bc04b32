use council_types::{MemberId, ProposalId};
use thiserror::Error;

/// Failure category an operation reports to its caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller lacks the capability the operation requires.
    Unauthorized,
    /// Reference to a member or proposal that does not exist.
    NotFound,
    /// Admission of an identity that is already active.
    AlreadyExists,
    /// Operation is not legal in the target's current lifecycle state.
    InvalidState,
    /// Malformed input.
    InvalidArgument,
    /// Rejected configuration.
    Config,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("{0} is not the owner")]
    NotOwner(MemberId),

    #[error("{0} is not an active member")]
    NotActiveMember(MemberId),

    #[error("the zero identity cannot be a member")]
    ZeroIdentity,

    #[error("member {0} is already active")]
    MemberAlreadyActive(MemberId),

    #[error("member {0} is not active")]
    MemberNotActive(MemberId),

    #[error("the owner cannot be removed")]
    CannotRemoveOwner,

    #[error("insufficient voting power: {have} < {need}")]
    InsufficientVotingPower { have: u64, need: u64 },

    #[error("proposal description is empty")]
    EmptyDescription,

    #[error("proposal description too long: {len} > {max} bytes")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("voting on proposal {0} has closed")]
    VotingClosed(ProposalId),

    #[error("voting on proposal {0} is still open")]
    VotingStillOpen(ProposalId),

    #[error("{voter} has already voted on proposal {proposal}")]
    AlreadyVoted { proposal: ProposalId, voter: MemberId },

    #[error("proposal {0} has already been executed")]
    AlreadyExecuted(ProposalId),

    #[error("majority not reached: {votes_for} for, {votes_against} against")]
    MajorityNotReached { votes_for: u64, votes_against: u64 },

    #[error("tally overflow on proposal {0}")]
    TallyOverflow(ProposalId),

    #[error("config error: {0}")]
    Config(String),
}

impl GovernanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOwner(_) | Self::NotActiveMember(_) => ErrorKind::Unauthorized,
            Self::MemberNotActive(_) | Self::ProposalNotFound(_) => ErrorKind::NotFound,
            Self::MemberAlreadyActive(_) => ErrorKind::AlreadyExists,
            Self::VotingClosed(_)
            | Self::VotingStillOpen(_)
            | Self::AlreadyVoted { .. }
            | Self::AlreadyExecuted(_)
            | Self::MajorityNotReached { .. }
            | Self::TallyOverflow(_) => ErrorKind::InvalidState,
            Self::ZeroIdentity
            | Self::CannotRemoveOwner
            | Self::InsufficientVotingPower { .. }
            | Self::EmptyDescription
            | Self::DescriptionTooLong { .. } => ErrorKind::InvalidArgument,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}
