//! In-memory robot and hub for unit tests

use core::cell::Cell;

use embassy_time::Timer;

use crate::config::DriveSettings;
use crate::program::{MotionContext, MotionProgram, ProgramFault};
use crate::traits::{
    ActuatorFault, Button, DriveBase, HubFeedback, HubInputs, Imu, LightColor, Motor, MotorPort,
    Robot, StopMode,
};

/// Motor whose rotations finish instantly unless jammed
#[derive(Default)]
pub struct MockMotor {
    pub angle_deg: Cell<i32>,
    pub jammed: Cell<bool>,
    pub starts: Cell<u32>,
    pub stops: Cell<u32>,
}

impl MockMotor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Motor for MockMotor {
    fn start_run_angle(&self, speed_deg_s: i32, angle_deg: i32) -> Result<(), ActuatorFault> {
        if speed_deg_s == 0 {
            return Err(ActuatorFault::InvalidCommand);
        }
        self.starts.set(self.starts.get() + 1);
        if !self.jammed.get() {
            let delta = angle_deg * speed_deg_s.signum();
            self.angle_deg.set(self.angle_deg.get() + delta);
        }
        Ok(())
    }

    fn is_done(&self) -> bool {
        !self.jammed.get()
    }

    fn check(&self) -> Result<(), ActuatorFault> {
        Ok(())
    }

    fn stop(&self) {
        self.stops.set(self.stops.get() + 1);
    }

    fn angle(&self) -> Result<i32, ActuatorFault> {
        Ok(self.angle_deg.get())
    }

    fn reset_angle(&self, angle_deg: i32) -> Result<(), ActuatorFault> {
        self.angle_deg.set(angle_deg);
        Ok(())
    }
}

/// Drive base whose motions finish instantly
#[derive(Default)]
pub struct MockDrive {
    pub distance_mm: Cell<i32>,
    pub settings: Cell<DriveSettings>,
    pub stops: Cell<u32>,
}

impl DriveBase for MockDrive {
    fn settings(&self, settings: DriveSettings) {
        self.settings.set(settings);
    }

    fn current_settings(&self) -> DriveSettings {
        self.settings.get()
    }

    fn start_straight(&self, distance_mm: i32) -> Result<(), ActuatorFault> {
        self.distance_mm.set(self.distance_mm.get() + distance_mm);
        Ok(())
    }

    fn start_turn(&self, _angle_deg: i32) -> Result<(), ActuatorFault> {
        Ok(())
    }

    fn start_curve(
        &self,
        _radius_mm: i32,
        _angle_deg: i32,
        _then: StopMode,
    ) -> Result<(), ActuatorFault> {
        Ok(())
    }

    fn is_done(&self) -> bool {
        true
    }

    fn check(&self) -> Result<(), ActuatorFault> {
        Ok(())
    }

    fn stop(&self) {
        self.stops.set(self.stops.get() + 1);
    }

    fn reset(&self) -> Result<(), ActuatorFault> {
        self.distance_mm.set(0);
        Ok(())
    }

    fn distance(&self) -> Result<i32, ActuatorFault> {
        Ok(self.distance_mm.get())
    }
}

#[derive(Default)]
pub struct MockImu {
    pub heading_deg: Cell<f32>,
}

/// Complete robot with counters for the calls tests care about
#[derive(Default)]
pub struct MockRobot {
    pub drive: MockDrive,
    pub imu: MockImu,
    pub left_wheel: MockMotor,
    pub right_wheel: MockMotor,
    pub left_lift: MockMotor,
    pub right_lift: MockMotor,
    pub resets: Cell<u32>,
    pub fail_resets: Cell<bool>,
    pub halts: Cell<u32>,
    pub sensor_fault: Cell<bool>,
}

impl MockRobot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Imu for MockRobot {
    fn heading(&self) -> Result<f32, ActuatorFault> {
        if self.sensor_fault.get() {
            return Err(ActuatorFault::Disconnected);
        }
        Ok(self.imu.heading_deg.get())
    }

    fn reset_heading(&self, angle_deg: f32) -> Result<(), ActuatorFault> {
        self.imu.heading_deg.set(angle_deg);
        Ok(())
    }
}

impl Robot for MockRobot {
    type Drive = MockDrive;
    type Motor = MockMotor;
    type Imu = MockRobot;

    fn drive(&self) -> &MockDrive {
        &self.drive
    }

    fn motor(&self, port: MotorPort) -> &MockMotor {
        match port {
            MotorPort::LeftWheel => &self.left_wheel,
            MotorPort::RightWheel => &self.right_wheel,
            MotorPort::LeftLift => &self.left_lift,
            MotorPort::RightLift => &self.right_lift,
        }
    }

    fn imu(&self) -> &MockRobot {
        self
    }

    fn reset_all(&self) -> Result<(), ActuatorFault> {
        self.resets.set(self.resets.get() + 1);
        if self.fail_resets.get() {
            return Err(ActuatorFault::NotReady);
        }
        self.drive.stop();
        self.drive.reset()?;
        self.reset_heading(0.0)
    }

    fn halt(&self) {
        self.halts.set(self.halts.get() + 1);
        self.drive.stop();
        for port in MotorPort::ALL {
            self.motor(port).stop();
        }
    }
}

/// Hub with settable inputs and recorded outputs
#[derive(Default)]
pub struct MockHub {
    pub left: Cell<bool>,
    pub right: Cell<bool>,
    pub trigger: Cell<f32>,
    pub trigger_fault: Cell<bool>,
    pub display: Cell<Option<u8>>,
    pub light: Cell<Option<LightColor>>,
    /// Green or blue navigation flashes
    pub flashes: Cell<u32>,
    pub red_shown: Cell<u32>,
}

impl MockHub {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HubInputs for MockHub {
    fn pressed(&self, button: Button) -> bool {
        match button {
            Button::Left => self.left.get(),
            Button::Right => self.right.get(),
        }
    }

    fn trigger_level(&self) -> Result<f32, ActuatorFault> {
        if self.trigger_fault.get() {
            return Err(ActuatorFault::Disconnected);
        }
        Ok(self.trigger.get())
    }
}

impl HubFeedback for MockHub {
    fn show_number(&self, value: u8) {
        self.display.set(Some(value));
    }

    fn light(&self, color: Option<LightColor>) {
        match color {
            Some(LightColor::Green | LightColor::Blue) => self.flashes.set(self.flashes.get() + 1),
            Some(LightColor::Red) => self.red_shown.set(self.red_shown.get() + 1),
            None => {}
        }
        self.light.set(color);
    }
}

/// Programs with predictable outcomes
#[derive(Debug, Clone, Copy)]
pub enum MockProgram {
    /// Suspend for the given time, then complete
    Sleep(u64),
    /// Fail with a stall
    Fail,
    /// Require one parameter
    NeedsParam,
}

impl MotionProgram<MockRobot> for MockProgram {
    async fn execute(&self, ctx: MotionContext<'_, MockRobot>) -> Result<(), ProgramFault> {
        match *self {
            MockProgram::Sleep(ms) => {
                Timer::after_millis(ms).await;
                Ok(())
            }
            MockProgram::Fail => {
                Timer::after_millis(1).await;
                Err(ActuatorFault::Stalled.into())
            }
            MockProgram::NeedsParam => {
                ctx.param(0)?;
                Ok(())
            }
        }
    }
}
