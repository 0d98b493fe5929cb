//! Supervisor: runs one motion program alongside the telemetry task
//!
//! Both run as futures inside a single cooperative task. The motion side
//! raises a shared stop signal when it finishes; the telemetry side
//! observes it at its next suspension point and exits, and only then does
//! the supervisor return.

pub mod outcome;
pub mod runner;
pub mod stop;

pub use outcome::RunOutcome;
pub use runner::Supervisor;
pub use stop::StopSignal;

use crate::config::SupervisorConfig;
use crate::program::{MotionProgram, ProgramEntry};
use crate::telemetry::TelemetrySink;
use crate::traits::Robot;

/// Run a single program once, optionally with telemetry
///
/// Host entry point for running a program outside the selector menu.
/// Each call builds its own [`Supervisor`], so the one-run-at-a-time guard
/// only covers this call: the caller must not start a second program on
/// the same robot concurrently. Callers that may race share one
/// `Supervisor` and call [`Supervisor::run_program`], which rejects the
/// second run as `Faulted(Busy)`.
pub async fn start_supervisor<R, P, K>(
    robot: &R,
    entry: &ProgramEntry<P>,
    sink: Option<&mut K>,
    config: SupervisorConfig,
) -> RunOutcome
where
    R: Robot,
    P: MotionProgram<R>,
    K: TelemetrySink,
{
    Supervisor::new(config).run_program(robot, entry, sink).await
}
