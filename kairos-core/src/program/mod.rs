//! Motion programs and the program registry
//!
//! A motion program is a scripted sequence of actuator calls. Programs are
//! registered once at startup under a menu name; the selector resolves them
//! by registry position, never by name at run time.

pub mod context;
pub mod registry;

pub use context::MotionContext;
pub use registry::{ProgramEntry, Registry, RegistryError, MAX_NAME_LEN, MAX_PARAMS, MAX_PROGRAMS};

use crate::traits::{ActuatorFault, Robot};

/// Reasons a program run can fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProgramFault {
    /// An actuator call failed during the run
    Actuator(ActuatorFault),
    /// The program was registered with parameters it cannot use
    InvalidParameters,
    /// The selected menu entry does not exist
    UnknownProgram,
    /// Another program already owns the actuators
    Busy,
}

impl From<ActuatorFault> for ProgramFault {
    fn from(fault: ActuatorFault) -> Self {
        ProgramFault::Actuator(fault)
    }
}

/// A unit of motion work
///
/// Implementations receive exclusive use of the robot's actuators for the
/// duration of `execute`. Returning `Err` ends the run as faulted; the
/// selector still resets the robot afterwards.
#[allow(async_fn_in_trait)]
pub trait MotionProgram<R: Robot> {
    async fn execute(&self, ctx: MotionContext<'_, R>) -> Result<(), ProgramFault>;
}
