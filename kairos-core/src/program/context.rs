//! Execution context handed to a running program
//!
//! Besides giving access to the robot, the context offers the handful of
//! primitives mission scripts are written in. Each one logs the step it
//! performs so a run can be followed from the console.

use embassy_time::Timer;
use log::{info, warn};

use super::ProgramFault;
use crate::config::{DriveSettings, WatchdogConfig};
use crate::safety::{guard_curve, guard_motor};
use crate::supervisor::RunOutcome;
use crate::traits::{DriveBase, Motor, MotorPort, Robot, StopMode};

/// Robot access and parameters for one program run
pub struct MotionContext<'a, R> {
    robot: &'a R,
    params: &'a [i32],
}

impl<R> Clone for MotionContext<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for MotionContext<'_, R> {}

impl<'a, R: Robot> MotionContext<'a, R> {
    pub fn new(robot: &'a R, params: &'a [i32]) -> Self {
        Self { robot, params }
    }

    /// The robot being driven
    pub fn robot(&self) -> &'a R {
        self.robot
    }

    /// Parameters registered with the program
    pub fn params(&self) -> &'a [i32] {
        self.params
    }

    /// A single parameter, faulting the run if it is missing
    pub fn param(&self, index: usize) -> Result<i32, ProgramFault> {
        self.params
            .get(index)
            .copied()
            .ok_or(ProgramFault::InvalidParameters)
    }

    /// The drive base
    pub fn drive(&self) -> &'a R::Drive {
        self.robot.drive()
    }

    /// A motor by port
    pub fn motor(&self, port: MotorPort) -> &'a R::Motor {
        self.robot.motor(port)
    }

    /// Change drive speeds for the following motions
    pub fn settings(&self, settings: DriveSettings) {
        info!(
            ">>> settings: straight {} mm/s, turn {} deg/s",
            settings.straight_speed_mm_s, settings.turn_rate_deg_s
        );
        self.drive().settings(settings);
    }

    /// Drive straight and wait
    pub async fn straight(&self, distance_mm: i32) -> Result<(), ProgramFault> {
        info!(">>> straight {} mm", distance_mm);
        Ok(self.drive().straight(distance_mm).await?)
    }

    /// Turn in place and wait
    pub async fn turn(&self, angle_deg: i32) -> Result<(), ProgramFault> {
        info!(">>> turn {} deg", angle_deg);
        Ok(self.drive().turn(angle_deg).await?)
    }

    /// Drive an arc and wait
    pub async fn curve(&self, radius_mm: i32, angle_deg: i32) -> Result<(), ProgramFault> {
        info!(">>> curve r={} mm, {} deg", radius_mm, angle_deg);
        Ok(self.drive().curve(radius_mm, angle_deg).await?)
    }

    /// Rotate a motor and wait
    pub async fn run_angle(
        &self,
        port: MotorPort,
        speed_deg_s: i32,
        angle_deg: i32,
    ) -> Result<(), ProgramFault> {
        info!(">>> {:?} run_angle({}, {})", port, speed_deg_s, angle_deg);
        Ok(self.motor(port).run_angle(speed_deg_s, angle_deg).await?)
    }

    /// Start a motor rotation without waiting for it
    pub fn start_run_angle(
        &self,
        port: MotorPort,
        speed_deg_s: i32,
        angle_deg: i32,
    ) -> Result<(), ProgramFault> {
        info!(">>> {:?} run_angle({}, {}) [no wait]", port, speed_deg_s, angle_deg);
        Ok(self.motor(port).start_run_angle(speed_deg_s, angle_deg)?)
    }

    /// Rotate a motor under a watchdog
    ///
    /// A timeout is not an error: the motor is stopped and the script goes
    /// on. Only a failure to start the rotation faults the run.
    pub async fn guarded_run_angle(
        &self,
        port: MotorPort,
        speed_deg_s: i32,
        angle_deg: i32,
        watchdog: WatchdogConfig,
    ) -> Result<RunOutcome, ProgramFault> {
        info!(
            ">>> {:?} run_angle({}, {}) [timeout {} ms]",
            port, speed_deg_s, angle_deg, watchdog.limit_ms
        );
        let outcome = guard_motor(self.motor(port), speed_deg_s, angle_deg, watchdog).await;
        Self::tolerate_timeout(outcome)
    }

    /// Drive an arc under a watchdog
    pub async fn guarded_curve(
        &self,
        radius_mm: i32,
        angle_deg: i32,
        then: StopMode,
        watchdog: WatchdogConfig,
    ) -> Result<RunOutcome, ProgramFault> {
        info!(
            ">>> curve r={} mm, {} deg [timeout {} ms]",
            radius_mm, angle_deg, watchdog.limit_ms
        );
        let outcome = guard_curve(self.drive(), radius_mm, angle_deg, then, watchdog).await;
        Self::tolerate_timeout(outcome)
    }

    /// Stop the drive base
    pub fn stop(&self) {
        info!(">>> stop");
        self.drive().stop();
    }

    /// Suspend the program, letting other tasks run
    pub async fn pause(&self, ms: u64) {
        Timer::after_millis(ms).await;
    }

    fn tolerate_timeout(outcome: RunOutcome) -> Result<RunOutcome, ProgramFault> {
        match outcome {
            RunOutcome::Faulted(fault) => Err(fault),
            RunOutcome::TimedOut => {
                warn!(">>> timed out, actuator force-stopped");
                Ok(outcome)
            }
            RunOutcome::Completed => Ok(outcome),
        }
    }
}
