//! Hub buttons, trigger and status outputs

use super::ActuatorFault;

/// Navigation buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Previous program
    Left,
    /// Next program
    Right,
}

/// Status light colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightColor {
    Green,
    Blue,
    Red,
}

/// Human inputs on the hub
pub trait HubInputs {
    /// Current level of a navigation button
    fn pressed(&self, button: Button) -> bool;

    /// Analog trigger level, normalized to 0.0..=1.0
    fn trigger_level(&self) -> Result<f32, ActuatorFault>;
}

/// Display and status light
pub trait HubFeedback {
    /// Show a number on the display
    fn show_number(&self, value: u8);

    /// Set the status light (`None` = off)
    fn light(&self, color: Option<LightColor>);
}
