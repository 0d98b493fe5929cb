//! Simulated position-controlled motor
//!
//! Used for the lifts directly and as the two wheels of [`SimDriveBase`].
//! A rotation of `angle` degrees at `speed` deg/s completes after
//! `|angle| / |speed|` seconds, divided by the simulation speedup.
//!
//! Fault injection:
//! - [`SimMotor::stall_next`]: the next command stops where it is and
//!   `check` reports `Stalled` once
//! - [`SimMotor::set_jammed`]: `run_angle` commands never report done
//!   until stopped (drive base commands are blocked separately, see
//!   [`SimDriveBase::block_command`](super::SimDriveBase::block_command))
//! - [`SimMotor::set_disconnected`]: commands and reads fail
//!
//! [`SimDriveBase`]: super::SimDriveBase

use core::cell::Cell;

use embassy_time::{Duration, Instant};
use kairos_core::traits::{ActuatorFault, Motor};
use log::{debug, trace, warn};

use super::motion::Motion;

/// Simulated motor
pub struct SimMotor {
    label: &'static str,
    speedup: u32,
    motion: Cell<Motion>,
    /// Raw position that reads as angle 0
    offset: Cell<i32>,
    /// Jammed command waiting to be stopped
    stuck: Cell<bool>,
    fault: Cell<Option<ActuatorFault>>,
    stall_next: Cell<bool>,
    jammed: Cell<bool>,
    disconnected: Cell<bool>,
}

impl SimMotor {
    pub fn new(label: &'static str, speedup: u32) -> Self {
        Self {
            label,
            speedup: speedup.max(1),
            motion: Cell::new(Motion::idle(0)),
            offset: Cell::new(0),
            stuck: Cell::new(false),
            fault: Cell::new(None),
            stall_next: Cell::new(false),
            jammed: Cell::new(false),
            disconnected: Cell::new(false),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Make the next command stall immediately
    pub fn stall_next(&self) {
        self.stall_next.set(true);
    }

    /// Jam the motor: rotations are accepted but never finish
    pub fn set_jammed(&self, jammed: bool) {
        self.jammed.set(jammed);
    }

    pub fn set_disconnected(&self, disconnected: bool) {
        self.disconnected.set(disconnected);
    }

    /// Absolute position, unaffected by `reset_angle`
    pub fn raw_position(&self) -> i32 {
        self.motion.get().position_at(Instant::now())
    }

    /// Scale a real-time duration by the speedup
    pub(crate) fn scaled(&self, duration_ms: u64) -> Duration {
        Duration::from_millis(duration_ms / self.speedup as u64)
    }

    /// Accept a command that never finishes until stopped
    pub(crate) fn stick(&self) -> Result<(), ActuatorFault> {
        if self.disconnected.get() {
            return Err(ActuatorFault::Disconnected);
        }
        debug!("{}: stuck, command will not finish", self.label);
        self.motion.set(self.motion.get().halted_at(Instant::now()));
        self.fault.set(None);
        self.stuck.set(true);
        Ok(())
    }

    /// Move by `delta` degrees over `duration`
    ///
    /// Shared by `start_run_angle` and the drive base, which plans both
    /// wheels together.
    pub(crate) fn command(&self, delta: i32, duration: Duration) -> Result<(), ActuatorFault> {
        if self.disconnected.get() {
            return Err(ActuatorFault::Disconnected);
        }

        let now = Instant::now();
        let position = self.motion.get().position_at(now);
        self.fault.set(None);

        if self.stall_next.replace(false) {
            warn!("{}: injected stall", self.label);
            self.motion.set(Motion::idle(position));
            self.fault.set(Some(ActuatorFault::Stalled));
            return Ok(());
        }

        trace!(
            "{}: {} -> {} over {} ms",
            self.label,
            position,
            position + delta,
            duration.as_millis()
        );
        self.stuck.set(false);
        self.motion
            .set(Motion::new(position, position + delta, now, duration));
        Ok(())
    }
}

impl Motor for SimMotor {
    fn start_run_angle(&self, speed_deg_s: i32, angle_deg: i32) -> Result<(), ActuatorFault> {
        if speed_deg_s == 0 {
            return Err(ActuatorFault::InvalidCommand);
        }

        if self.jammed.get() {
            return self.stick();
        }

        let delta = angle_deg * speed_deg_s.signum();
        let duration_ms = angle_deg.unsigned_abs() as u64 * 1000 / speed_deg_s.unsigned_abs() as u64;
        self.command(delta, self.scaled(duration_ms))
    }

    fn is_done(&self) -> bool {
        !self.stuck.get() && self.motion.get().is_finished_at(Instant::now())
    }

    fn check(&self) -> Result<(), ActuatorFault> {
        if self.disconnected.get() {
            return Err(ActuatorFault::Disconnected);
        }
        // Reported once, then cleared
        match self.fault.take() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    fn stop(&self) {
        let now = Instant::now();
        self.motion.set(self.motion.get().halted_at(now));
        self.stuck.set(false);
    }

    fn angle(&self) -> Result<i32, ActuatorFault> {
        if self.disconnected.get() {
            return Err(ActuatorFault::Disconnected);
        }
        Ok(self.raw_position() - self.offset.get())
    }

    fn reset_angle(&self, angle_deg: i32) -> Result<(), ActuatorFault> {
        if self.disconnected.get() {
            return Err(ActuatorFault::Disconnected);
        }
        self.offset.set(self.raw_position() - angle_deg);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_time::Timer;

    #[test]
    fn test_run_angle_takes_time() {
        let motor = SimMotor::new("lift", 1);
        let started = Instant::now();

        block_on(motor.run_angle(1000, 100)).unwrap();

        assert!(started.elapsed() >= Duration::from_millis(100));
        assert_eq!(motor.angle(), Ok(100));
    }

    #[test]
    fn test_negative_speed_reverses() {
        let motor = SimMotor::new("lift", 100);
        block_on(motor.run_angle(-500, 360)).unwrap();
        assert_eq!(motor.angle(), Ok(-360));
    }

    #[test]
    fn test_zero_speed_rejected() {
        let motor = SimMotor::new("lift", 1);
        assert_eq!(
            motor.start_run_angle(0, 90),
            Err(ActuatorFault::InvalidCommand)
        );
    }

    #[test]
    fn test_stop_mid_motion() {
        let motor = SimMotor::new("lift", 1);
        motor.start_run_angle(100, 1000).unwrap();
        block_on(Timer::after_millis(50));
        motor.stop();

        assert!(motor.is_done());
        let angle = motor.angle().unwrap();
        assert!(angle > 0 && angle < 100);
    }

    #[test]
    fn test_injected_stall_reported_once() {
        let motor = SimMotor::new("lift", 1);
        motor.stall_next();

        assert_eq!(block_on(motor.run_angle(500, 360)), Err(ActuatorFault::Stalled));
        assert_eq!(motor.angle(), Ok(0));
        assert_eq!(motor.check(), Ok(()));

        block_on(motor.run_angle(10_000, 100)).unwrap();
        assert_eq!(motor.angle(), Ok(100));
    }

    #[test]
    fn test_jam_until_stopped() {
        let motor = SimMotor::new("wheel", 1);
        motor.set_jammed(true);
        motor.start_run_angle(200, 180).unwrap();

        block_on(Timer::after_millis(20));
        assert!(!motor.is_done());

        motor.stop();
        assert!(motor.is_done());
        assert_eq!(motor.angle(), Ok(0));
    }

    #[test]
    fn test_reset_angle() {
        let motor = SimMotor::new("lift", 100);
        block_on(motor.run_angle(1000, 90)).unwrap();
        motor.reset_angle(0).unwrap();

        assert_eq!(motor.angle(), Ok(0));
        assert_eq!(motor.raw_position(), 90);
    }

    #[test]
    fn test_disconnected() {
        let motor = SimMotor::new("lift", 1);
        motor.set_disconnected(true);

        assert_eq!(motor.angle(), Err(ActuatorFault::Disconnected));
        assert_eq!(
            motor.start_run_angle(100, 10),
            Err(ActuatorFault::Disconnected)
        );
    }
}
