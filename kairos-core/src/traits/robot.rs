//! The complete actuator set

use log::debug;

use super::{ActuatorFault, DriveBase, Imu, Motor, MotorPort};

/// Robot actuators and sensors as one unit
///
/// This is the process-wide resource the supervisor hands to exactly one
/// motion program at a time. The telemetry task only uses the read
/// methods.
pub trait Robot {
    type Drive: DriveBase;
    type Motor: Motor;
    type Imu: Imu;

    /// The drive base
    fn drive(&self) -> &Self::Drive;

    /// A motor by port
    fn motor(&self, port: MotorPort) -> &Self::Motor;

    /// The heading sensor
    fn imu(&self) -> &Self::Imu;

    /// Bring the robot to a known-zero state
    ///
    /// Stops the drive base, zeroes its distance/angle counters and resets
    /// the heading to 0.
    fn reset_all(&self) -> Result<(), ActuatorFault> {
        self.drive().stop();
        self.drive().reset()?;
        self.imu().reset_heading(0.0)?;
        Ok(())
    }

    /// Stop the drive base and every motor. Idempotent.
    fn halt(&self) {
        debug!("halting all actuators");
        self.drive().stop();
        for port in MotorPort::ALL {
            self.motor(port).stop();
        }
    }
}
