//! Telemetry samples and sinks

use embassy_time::Duration;
use log::info;

use crate::traits::{ActuatorFault, DriveBase, Imu, Motor, MotorPort, Robot};

/// One snapshot of robot state
///
/// Produced and emitted once; never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetrySample {
    /// Time since the telemetry task started
    pub elapsed: Duration,
    /// IMU heading (deg)
    pub heading_deg: f32,
    /// Left wheel angle (deg)
    pub left_angle_deg: i32,
    /// Right wheel angle (deg)
    pub right_angle_deg: i32,
    /// Drive base distance since reset (mm)
    pub distance_mm: i32,
}

impl TelemetrySample {
    /// Read every telemetry source from the robot
    ///
    /// Fails on the first sensor that cannot be read.
    pub fn read<R: Robot>(robot: &R, elapsed: Duration) -> Result<Self, ActuatorFault> {
        Ok(Self {
            elapsed,
            heading_deg: robot.imu().heading()?,
            left_angle_deg: robot.motor(MotorPort::LeftWheel).angle()?,
            right_angle_deg: robot.motor(MotorPort::RightWheel).angle()?,
            distance_mm: robot.drive().distance()?,
        })
    }
}

/// Destination for telemetry samples
pub trait TelemetrySink {
    fn emit(&mut self, sample: &TelemetrySample);
}

impl<F> TelemetrySink for F
where
    F: FnMut(&TelemetrySample),
{
    fn emit(&mut self, sample: &TelemetrySample) {
        self(sample)
    }
}

/// Writes each sample as one log line on the `telemetry` target
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn emit(&mut self, sample: &TelemetrySample) {
        info!(
            target: "telemetry",
            "LOG[{:5}ms]: dist={:4} mm  heading={:4.0}°  L={:5}°  R={:5}°",
            sample.elapsed.as_millis(),
            sample.distance_mm,
            sample.heading_deg,
            sample.left_angle_deg,
            sample.right_angle_deg
        );
    }
}
