//! Hardware abstraction traits
//!
//! These traits define the interface between the supervisor/selector logic
//! and the robot hardware. Every method takes `&self`: implementations keep
//! their state behind interior mutability so the telemetry task can read
//! sensors while the motion task commands actuators on the same executor.

pub mod drive;
pub mod hub;
pub mod imu;
pub mod motor;
pub mod robot;

use embassy_time::Timer;

pub use drive::{DriveBase, StopMode};
pub use hub::{Button, HubFeedback, HubInputs, LightColor};
pub use imu::Imu;
pub use motor::{Motor, MotorPort};
pub use robot::Robot;

/// Poll period used while awaiting a blocking motion primitive
pub const SETTLE_POLL_MS: u64 = 5;

/// Errors reported by actuators and sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorFault {
    /// Motor stalled against an obstruction
    Stalled,
    /// Device unplugged or not responding
    Disconnected,
    /// Device not ready (e.g. still initializing)
    NotReady,
    /// Command rejected (zero speed, out of range)
    InvalidCommand,
}

/// Wait until a started motion reports done, surfacing latched faults
///
/// Every iteration is a suspension point, so other tasks keep running
/// while the motion is in progress.
pub(crate) async fn settle(
    is_done: impl Fn() -> bool,
    check: impl Fn() -> Result<(), ActuatorFault>,
) -> Result<(), ActuatorFault> {
    loop {
        check()?;
        if is_done() {
            return Ok(());
        }
        Timer::after_millis(SETTLE_POLL_MS).await;
    }
}
