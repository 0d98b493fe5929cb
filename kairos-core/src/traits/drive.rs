//! Differential drive base trait

use super::{settle, ActuatorFault};
use crate::config::DriveSettings;

/// What the drive base does once a motion completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopMode {
    /// Let the wheels spin freely
    Coast,
    /// Short the motors, no position holding
    Brake,
    /// Actively hold the final position
    #[default]
    Hold,
}

/// Trait for a two-wheel differential drive base
///
/// The `start_*` methods return as soon as the motion is commanded. The
/// provided async methods wait for completion and propagate faults.
#[allow(async_fn_in_trait)]
pub trait DriveBase {
    /// Apply new speed settings to subsequent motions
    fn settings(&self, settings: DriveSettings);

    /// Get the active speed settings
    fn current_settings(&self) -> DriveSettings;

    /// Start driving straight (negative = backwards)
    fn start_straight(&self, distance_mm: i32) -> Result<(), ActuatorFault>;

    /// Start an in-place turn (positive = clockwise)
    fn start_turn(&self, angle_deg: i32) -> Result<(), ActuatorFault>;

    /// Start driving along an arc
    fn start_curve(&self, radius_mm: i32, angle_deg: i32, then: StopMode)
        -> Result<(), ActuatorFault>;

    /// Check if the last commanded motion has finished
    fn is_done(&self) -> bool;

    /// Report a latched hardware fault (stall, disconnect)
    fn check(&self) -> Result<(), ActuatorFault>;

    /// Stop immediately. Idempotent.
    fn stop(&self);

    /// Zero the accumulated distance and angle counters
    fn reset(&self) -> Result<(), ActuatorFault>;

    /// Distance travelled since the last reset (mm)
    fn distance(&self) -> Result<i32, ActuatorFault>;

    /// Drive straight and wait for completion
    async fn straight(&self, distance_mm: i32) -> Result<(), ActuatorFault> {
        self.start_straight(distance_mm)?;
        settle(|| self.is_done(), || self.check()).await
    }

    /// Turn in place and wait for completion
    async fn turn(&self, angle_deg: i32) -> Result<(), ActuatorFault> {
        self.start_turn(angle_deg)?;
        settle(|| self.is_done(), || self.check()).await
    }

    /// Drive an arc and wait for completion
    async fn curve(&self, radius_mm: i32, angle_deg: i32) -> Result<(), ActuatorFault> {
        self.start_curve(radius_mm, angle_deg, StopMode::Hold)?;
        settle(|| self.is_done(), || self.check()).await
    }
}
