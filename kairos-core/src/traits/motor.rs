//! Motor trait for wheels and lift actuators

use super::{settle, ActuatorFault};

/// Motor ports on the hub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorPort {
    LeftWheel,
    RightWheel,
    LeftLift,
    RightLift,
}

impl MotorPort {
    /// All ports, in hub order
    pub const ALL: [MotorPort; 4] = [
        MotorPort::LeftWheel,
        MotorPort::RightWheel,
        MotorPort::LeftLift,
        MotorPort::RightLift,
    ];

    /// Check if this port drives a wheel
    pub fn is_wheel(&self) -> bool {
        matches!(self, MotorPort::LeftWheel | MotorPort::RightWheel)
    }
}

/// Trait for a position-controlled motor
#[allow(async_fn_in_trait)]
pub trait Motor {
    /// Start rotating by `angle_deg` at `speed_deg_s`
    ///
    /// The direction is the product of both signs. A zero speed is rejected.
    fn start_run_angle(&self, speed_deg_s: i32, angle_deg: i32) -> Result<(), ActuatorFault>;

    /// Check if the last commanded rotation has finished
    fn is_done(&self) -> bool;

    /// Report a latched hardware fault
    fn check(&self) -> Result<(), ActuatorFault>;

    /// Stop immediately. Idempotent.
    fn stop(&self);

    /// Current shaft angle (deg)
    fn angle(&self) -> Result<i32, ActuatorFault>;

    /// Redefine the current shaft angle
    fn reset_angle(&self, angle_deg: i32) -> Result<(), ActuatorFault>;

    /// Rotate and wait for completion
    async fn run_angle(&self, speed_deg_s: i32, angle_deg: i32) -> Result<(), ActuatorFault> {
        self.start_run_angle(speed_deg_s, angle_deg)?;
        settle(|| self.is_done(), || self.check()).await
    }
}
