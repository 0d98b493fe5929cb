//! Result of one supervised execution

use crate::program::ProgramFault;

/// How a supervised execution ended
///
/// Produced exactly once per run. `TimedOut` is a designed outcome, not an
/// error: the actuator was force-stopped after its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunOutcome {
    /// Finished on its own
    Completed,
    /// Deadline elapsed; actuators were stopped
    TimedOut,
    /// An actuator or program fault ended the run
    Faulted(ProgramFault),
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self, RunOutcome::Faulted(_))
    }
}

impl From<Result<(), ProgramFault>> for RunOutcome {
    fn from(result: Result<(), ProgramFault>) -> Self {
        match result {
            Ok(()) => RunOutcome::Completed,
            Err(fault) => RunOutcome::Faulted(fault),
        }
    }
}
