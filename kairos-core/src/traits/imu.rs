//! Inertial measurement unit trait

use super::ActuatorFault;

/// Heading source
pub trait Imu {
    /// Heading in degrees since the last reset (positive = clockwise)
    fn heading(&self) -> Result<f32, ActuatorFault>;

    /// Redefine the current heading
    fn reset_heading(&self, angle_deg: f32) -> Result<(), ActuatorFault>;
}
