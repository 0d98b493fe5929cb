//! Simulated differential drive base
//!
//! Owns the two wheel motors and derives distance and heading from their
//! positions, the way an odometry-only drive base does:
//!
//! ```text
//! distance = (left + right) / 2 * π * wheel_diameter / 360
//! heading  = (left - right) * wheel_diameter / (2 * axle_track)
//! ```
//!
//! The heading doubles as the robot's IMU.

use core::cell::Cell;
use core::f32::consts::PI;

use embassy_time::Duration;
use kairos_core::config::DriveSettings;
use kairos_core::traits::{ActuatorFault, DriveBase, Imu, Motor, StopMode};
use log::{debug, warn};

use super::motor::SimMotor;
use super::{round, SimGeometry};

/// Simulated drive base with odometry heading
pub struct SimDriveBase {
    geometry: SimGeometry,
    left: SimMotor,
    right: SimMotor,
    settings: Cell<DriveSettings>,
    /// Raw wheel positions at the last counter reset
    distance_origin: Cell<(i32, i32)>,
    /// Raw wheel positions and heading value at the last heading reset
    heading_origin: Cell<(i32, i32)>,
    heading_base: Cell<f32>,
    fail_resets: Cell<u32>,
    dropouts: Cell<u32>,
    /// Commands left before one gets stuck
    block_after: Cell<Option<u32>>,
}

impl SimDriveBase {
    pub fn new(geometry: SimGeometry) -> Self {
        Self {
            geometry,
            left: SimMotor::new("left wheel", geometry.speedup),
            right: SimMotor::new("right wheel", geometry.speedup),
            settings: Cell::new(DriveSettings::default()),
            distance_origin: Cell::new((0, 0)),
            heading_origin: Cell::new((0, 0)),
            heading_base: Cell::new(0.0),
            fail_resets: Cell::new(0),
            dropouts: Cell::new(0),
            block_after: Cell::new(None),
        }
    }

    pub fn geometry(&self) -> &SimGeometry {
        &self.geometry
    }

    pub fn left(&self) -> &SimMotor {
        &self.left
    }

    pub fn right(&self) -> &SimMotor {
        &self.right
    }

    /// Make the next `count` resets fail with `NotReady`
    pub fn fail_next_resets(&self, count: u32) {
        self.fail_resets.set(count);
    }

    /// Make the next `count` heading reads fail
    pub fn drop_samples(&self, count: u32) {
        self.dropouts.set(count);
    }

    /// Let `skip` more motions through, then block the next one
    ///
    /// The blocked motion is accepted but never reports done until the
    /// drive base is stopped, like an arc pushed against a wall.
    pub fn block_command(&self, skip: u32) {
        self.block_after.set(Some(skip));
    }

    fn raw(&self) -> (i32, i32) {
        (self.left.raw_position(), self.right.raw_position())
    }

    /// Wheel rotation (deg) for a given travel (mm)
    fn wheel_degrees(&self, travel_mm: f32) -> i32 {
        round(travel_mm * 360.0 / (PI * self.geometry.wheel_diameter_mm as f32))
    }

    /// Plan both wheels over `duration_ms` of real time
    fn command(&self, left: i32, right: i32, duration_ms: u64) -> Result<(), ActuatorFault> {
        match self.block_after.get() {
            Some(0) => {
                self.block_after.set(None);
                warn!("drive base blocked");
                self.left.stick()?;
                return self.right.stick();
            }
            Some(skip) => self.block_after.set(Some(skip - 1)),
            None => {}
        }

        let duration: Duration = self.left.scaled(duration_ms);
        self.left.command(left, duration)?;
        if let Err(fault) = self.right.command(right, duration) {
            self.left.stop();
            return Err(fault);
        }
        Ok(())
    }

    fn straight_speed(&self) -> Result<u64, ActuatorFault> {
        match self.settings.get().straight_speed_mm_s {
            0 => Err(ActuatorFault::InvalidCommand),
            speed => Ok(speed as u64),
        }
    }
}

impl DriveBase for SimDriveBase {
    fn settings(&self, settings: DriveSettings) {
        debug!(
            "drive settings: {} mm/s, {} deg/s",
            settings.straight_speed_mm_s, settings.turn_rate_deg_s
        );
        self.settings.set(settings);
    }

    fn current_settings(&self) -> DriveSettings {
        self.settings.get()
    }

    fn start_straight(&self, distance_mm: i32) -> Result<(), ActuatorFault> {
        let speed = self.straight_speed()?;
        let wheel = self.wheel_degrees(distance_mm as f32);
        let duration_ms = distance_mm.unsigned_abs() as u64 * 1000 / speed;
        self.command(wheel, wheel, duration_ms)
    }

    fn start_turn(&self, angle_deg: i32) -> Result<(), ActuatorFault> {
        let rate = match self.settings.get().turn_rate_deg_s {
            0 => return Err(ActuatorFault::InvalidCommand),
            rate => rate as u64,
        };

        // Each wheel travels an arc of the axle circle
        let arc_mm = PI * self.geometry.axle_track_mm as f32 * angle_deg as f32 / 360.0;
        let wheel = self.wheel_degrees(arc_mm);
        let duration_ms = angle_deg.unsigned_abs() as u64 * 1000 / rate;
        self.command(wheel, -wheel, duration_ms)
    }

    fn start_curve(
        &self,
        radius_mm: i32,
        angle_deg: i32,
        then: StopMode,
    ) -> Result<(), ActuatorFault> {
        let speed = self.straight_speed()?;

        let sweep = 2.0 * PI * angle_deg as f32 / 360.0;
        let half_track = self.geometry.axle_track_mm as f32 / 2.0;
        let center_mm = radius_mm as f32 * sweep;
        let left = self.wheel_degrees((radius_mm as f32 + half_track) * sweep);
        let right = self.wheel_degrees((radius_mm as f32 - half_track) * sweep);

        let travel = if center_mm < 0.0 { -center_mm } else { center_mm };
        let duration_ms = travel as u64 * 1000 / speed;
        debug!("curve then {:?}", then);
        self.command(left, right, duration_ms)
    }

    fn is_done(&self) -> bool {
        self.left.is_done() && self.right.is_done()
    }

    fn check(&self) -> Result<(), ActuatorFault> {
        let left = self.left.check();
        let right = self.right.check();
        left.and(right)
    }

    fn stop(&self) {
        self.left.stop();
        self.right.stop();
    }

    fn reset(&self) -> Result<(), ActuatorFault> {
        let remaining = self.fail_resets.get();
        if remaining > 0 {
            self.fail_resets.set(remaining - 1);
            warn!("drive base not ready for reset");
            return Err(ActuatorFault::NotReady);
        }

        self.distance_origin.set(self.raw());
        self.left.reset_angle(0)?;
        self.right.reset_angle(0)?;
        Ok(())
    }

    fn distance(&self) -> Result<i32, ActuatorFault> {
        let (left, right) = self.raw();
        let (left0, right0) = self.distance_origin.get();
        let wheel_deg = ((left - left0) + (right - right0)) as f32 / 2.0;
        Ok(round(
            wheel_deg * PI * self.geometry.wheel_diameter_mm as f32 / 360.0,
        ))
    }
}

impl Imu for SimDriveBase {
    fn heading(&self) -> Result<f32, ActuatorFault> {
        let dropouts = self.dropouts.get();
        if dropouts > 0 {
            self.dropouts.set(dropouts - 1);
            return Err(ActuatorFault::Disconnected);
        }

        let (left, right) = self.raw();
        let (left0, right0) = self.heading_origin.get();
        let differential = ((left - left0) - (right - right0)) as f32;
        let turned = differential * self.geometry.wheel_diameter_mm as f32
            / (2.0 * self.geometry.axle_track_mm as f32);
        Ok(self.heading_base.get() + turned)
    }

    fn reset_heading(&self, angle_deg: f32) -> Result<(), ActuatorFault> {
        self.heading_origin.set(self.raw());
        self.heading_base.set(angle_deg);
        Ok(())
    }
}
