//! Complete simulated robot

use kairos_core::traits::{MotorPort, Robot};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::drive::SimDriveBase;
use super::motor::SimMotor;

/// Physical dimensions and clock rate of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimGeometry {
    /// Wheel diameter in mm
    pub wheel_diameter_mm: u32,
    /// Distance between the wheel contact points in mm
    pub axle_track_mm: u32,
    /// Motions finish this many times faster than real time
    pub speedup: u32,
}

impl Default for SimGeometry {
    fn default() -> Self {
        Self {
            wheel_diameter_mm: 56,
            axle_track_mm: 112,
            speedup: 1,
        }
    }
}

/// Drive base, two lifts and an odometry IMU
pub struct SimRobot {
    drive: SimDriveBase,
    left_lift: SimMotor,
    right_lift: SimMotor,
}

impl SimRobot {
    pub fn new(geometry: SimGeometry) -> Self {
        Self {
            drive: SimDriveBase::new(geometry),
            left_lift: SimMotor::new("left lift", geometry.speedup),
            right_lift: SimMotor::new("right lift", geometry.speedup),
        }
    }

    /// Concrete motor by port, for fault injection
    pub fn sim_motor(&self, port: MotorPort) -> &SimMotor {
        match port {
            MotorPort::LeftWheel => self.drive.left(),
            MotorPort::RightWheel => self.drive.right(),
            MotorPort::LeftLift => &self.left_lift,
            MotorPort::RightLift => &self.right_lift,
        }
    }

    /// Concrete drive base, for fault injection
    pub fn sim_drive(&self) -> &SimDriveBase {
        &self.drive
    }
}

impl Default for SimRobot {
    fn default() -> Self {
        Self::new(SimGeometry::default())
    }
}

impl Robot for SimRobot {
    type Drive = SimDriveBase;
    type Motor = SimMotor;
    type Imu = SimDriveBase;

    fn drive(&self) -> &SimDriveBase {
        &self.drive
    }

    fn motor(&self, port: MotorPort) -> &SimMotor {
        self.sim_motor(port)
    }

    fn imu(&self) -> &SimDriveBase {
        &self.drive
    }
}
