//! Simulated hub buttons, force trigger, display and light
//!
//! Inputs live in atomics so another thread (a console reader, a test) can
//! press buttons while the selector polls on the executor. A press holds
//! the input level for `hold` and then releases on its own.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicU8, Ordering};

use embassy_time::{Duration, Instant};
use kairos_core::traits::{ActuatorFault, Button, HubFeedback, HubInputs, LightColor};
use log::{debug, info};

const NO_NUMBER: u32 = u32::MAX;

const LIGHT_OFF: u8 = 0;
const LIGHT_GREEN: u8 = 1;
const LIGHT_BLUE: u8 = 2;
const LIGHT_RED: u8 = 3;

/// Simulated hub
pub struct SimHub {
    hold: Duration,
    /// Release instants in ms since boot
    left_until: AtomicU64,
    right_until: AtomicU64,
    trigger_until: AtomicU64,
    trigger_bits: AtomicU32,
    trigger_fault: AtomicBool,
    display: AtomicU32,
    light: AtomicU8,
}

impl SimHub {
    pub const fn new(hold: Duration) -> Self {
        Self {
            hold,
            left_until: AtomicU64::new(0),
            right_until: AtomicU64::new(0),
            trigger_until: AtomicU64::new(0),
            trigger_bits: AtomicU32::new(0),
            trigger_fault: AtomicBool::new(false),
            display: AtomicU32::new(NO_NUMBER),
            light: AtomicU8::new(LIGHT_OFF),
        }
    }

    fn now_ms() -> u64 {
        Instant::now().as_millis()
    }

    fn slot(&self, button: Button) -> &AtomicU64 {
        match button {
            Button::Left => &self.left_until,
            Button::Right => &self.right_until,
        }
    }

    /// Press and release a button
    pub fn press(&self, button: Button) {
        self.hold_button(button, self.hold);
    }

    /// Hold a button down for `duration`
    pub fn hold_button(&self, button: Button, duration: Duration) {
        self.slot(button)
            .store(Self::now_ms() + duration.as_millis(), Ordering::Release);
    }

    pub fn release(&self, button: Button) {
        self.slot(button).store(0, Ordering::Release);
    }

    /// Squeeze the force trigger to `level` for one hold period
    pub fn squeeze(&self, level: f32) {
        self.trigger_bits
            .store(level.clamp(0.0, 1.0).to_bits(), Ordering::Release);
        self.trigger_until
            .store(Self::now_ms() + self.hold.as_millis(), Ordering::Release);
    }

    /// Make trigger reads fail
    pub fn set_trigger_fault(&self, fault: bool) {
        self.trigger_fault.store(fault, Ordering::Release);
    }

    /// Number currently on the display
    pub fn displayed(&self) -> Option<u8> {
        match self.display.load(Ordering::Acquire) {
            NO_NUMBER => None,
            value => Some(value as u8),
        }
    }

    pub fn light_color(&self) -> Option<LightColor> {
        match self.light.load(Ordering::Acquire) {
            LIGHT_GREEN => Some(LightColor::Green),
            LIGHT_BLUE => Some(LightColor::Blue),
            LIGHT_RED => Some(LightColor::Red),
            _ => None,
        }
    }
}

impl Default for SimHub {
    fn default() -> Self {
        Self::new(Duration::from_millis(150))
    }
}

impl HubInputs for SimHub {
    fn pressed(&self, button: Button) -> bool {
        Self::now_ms() < self.slot(button).load(Ordering::Acquire)
    }

    fn trigger_level(&self) -> Result<f32, ActuatorFault> {
        if self.trigger_fault.load(Ordering::Acquire) {
            return Err(ActuatorFault::Disconnected);
        }
        if Self::now_ms() < self.trigger_until.load(Ordering::Acquire) {
            Ok(f32::from_bits(self.trigger_bits.load(Ordering::Acquire)))
        } else {
            Ok(0.0)
        }
    }
}

impl HubFeedback for SimHub {
    fn show_number(&self, value: u8) {
        let previous = self.display.swap(value as u32, Ordering::AcqRel);
        if previous != value as u32 {
            info!("[display] {}", value);
        }
    }

    fn light(&self, color: Option<LightColor>) {
        let code = match color {
            None => LIGHT_OFF,
            Some(LightColor::Green) => LIGHT_GREEN,
            Some(LightColor::Blue) => LIGHT_BLUE,
            Some(LightColor::Red) => LIGHT_RED,
        };
        if self.light.swap(code, Ordering::AcqRel) != code {
            debug!("[light] {:?}", color);
        }
    }
}
