//! Notification sinks shipped with the core.

use council_types::{GovernanceEvent, NotificationSink};

/// Synchronous fan-out sink.
///
/// Listeners are invoked inline on the emitting thread while the council's
/// write boundary is held; keep handlers fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&GovernanceEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&GovernanceEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }
}

impl NotificationSink for EventBus {
    fn emit(&self, event: &GovernanceEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Logs every event under the `council::events` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn emit(&self, event: &GovernanceEvent) {
        match event {
            GovernanceEvent::MemberAdded { member, voting_power } => {
                tracing::info!(target: "council::events", event = event.name(), %member, voting_power);
            }
            GovernanceEvent::MemberRemoved { member } => {
                tracing::info!(target: "council::events", event = event.name(), %member);
            }
            GovernanceEvent::ProposalCreated { proposal, proposer, description } => {
                tracing::info!(target: "council::events", event = event.name(), %proposal, %proposer, description = description.as_str());
            }
            GovernanceEvent::VoteCast { proposal, voter, support, voting_power } => {
                tracing::info!(target: "council::events", event = event.name(), %proposal, %voter, support, voting_power);
            }
            GovernanceEvent::ProposalExecuted { proposal } => {
                tracing::info!(target: "council::events", event = event.name(), %proposal);
            }
        }
    }
}
