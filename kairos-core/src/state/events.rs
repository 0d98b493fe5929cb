//! Events that trigger state transitions

use crate::supervisor::RunOutcome;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // User events
    /// "Next" button edge
    Next,
    /// "Previous" button edge
    Previous,
    /// Trigger crossed the run threshold
    Trigger,

    // Lifecycle events
    /// A reset attempt finished (successfully or not)
    ResetFinished,
    /// The supervised run ended
    RunFinished(RunOutcome),
}

impl Event {
    /// Check if this event is user-initiated
    pub fn is_user_event(&self) -> bool {
        matches!(self, Event::Next | Event::Previous | Event::Trigger)
    }

    /// Check if this event reports lifecycle progress
    pub fn is_lifecycle_event(&self) -> bool {
        matches!(self, Event::ResetFinished | Event::RunFinished(_))
    }
}
