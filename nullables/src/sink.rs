//! Nullable notification sink — record events without delivering them.

use council_types::{GovernanceEvent, NotificationSink};
use std::sync::{Mutex, PoisonError};

/// A sink that keeps every emitted event in order.
#[derive(Debug, Default)]
pub struct NullSink {
    emitted: Mutex<Vec<GovernanceEvent>>,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events emitted so far (for assertions).
    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.emitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names of all events emitted so far, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(GovernanceEvent::name).collect()
    }

    pub fn len(&self) -> usize {
        self.emitted.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all state.
    pub fn reset(&self) {
        self.emitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl NotificationSink for NullSink {
    fn emit(&self, event: &GovernanceEvent) {
        self.emitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
