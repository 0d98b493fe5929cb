//! Configuration type definitions

use embassy_time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default straight-line speed (mm/s)
pub const DEFAULT_STRAIGHT_SPEED_MM_S: u16 = 200;

/// Default in-place turn rate (deg/s)
pub const DEFAULT_TURN_RATE_DEG_S: u16 = 100;

/// Default telemetry cadence
pub const DEFAULT_TELEMETRY_INTERVAL_MS: u32 = 200;

/// Default watchdog poll interval
pub const DEFAULT_WATCHDOG_POLL_MS: u32 = 10;

/// Normalized trigger level that starts a run
pub const DEFAULT_TRIGGER_THRESHOLD: f32 = 0.5;

/// Drive base speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriveSettings {
    /// Straight-line speed in mm/s
    pub straight_speed_mm_s: u16,
    /// In-place turn rate in deg/s
    pub turn_rate_deg_s: u16,
}

impl DriveSettings {
    pub const fn new(straight_speed_mm_s: u16, turn_rate_deg_s: u16) -> Self {
        Self {
            straight_speed_mm_s,
            turn_rate_deg_s,
        }
    }

    /// Same turn rate, different straight speed
    pub const fn with_straight_speed(self, straight_speed_mm_s: u16) -> Self {
        Self {
            straight_speed_mm_s,
            turn_rate_deg_s: self.turn_rate_deg_s,
        }
    }
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self::new(DEFAULT_STRAIGHT_SPEED_MM_S, DEFAULT_TURN_RATE_DEG_S)
    }
}

/// Bound on a single non-blocking actuator command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WatchdogConfig {
    /// Deadline after which the actuator is forced to stop
    pub limit_ms: u32,
    /// How often completion is checked
    pub poll_ms: u32,
}

impl WatchdogConfig {
    pub const fn new(limit_ms: u32, poll_ms: u32) -> Self {
        Self { limit_ms, poll_ms }
    }

    /// Deadline with the default poll interval
    pub const fn with_limit(limit_ms: u32) -> Self {
        Self::new(limit_ms, DEFAULT_WATCHDOG_POLL_MS)
    }

    pub fn limit(&self) -> Duration {
        Duration::from_millis(self.limit_ms as u64)
    }

    pub fn poll(&self) -> Duration {
        Duration::from_millis(self.poll_ms as u64)
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self::with_limit(1500)
    }
}

/// Telemetry task settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TelemetryConfig {
    /// Time between samples
    pub interval_ms: u32,
}

impl TelemetryConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms as u64)
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_TELEMETRY_INTERVAL_MS,
        }
    }
}

/// Supervisor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SupervisorConfig {
    /// Whole-run deadline; `None` lets a program run until it returns
    pub run_limit_ms: Option<u32>,
    /// Telemetry cadence while a program runs
    pub telemetry: TelemetryConfig,
}

impl SupervisorConfig {
    pub fn run_limit(&self) -> Option<Duration> {
        self.run_limit_ms.map(|ms| Duration::from_millis(ms as u64))
    }
}

/// Menu/selector timing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorConfig {
    /// Input polling cycle
    pub poll_ms: u32,
    /// Light flash after a navigation press
    pub feedback_ms: u32,
    /// Error light duration after a faulted run
    pub fault_indicator_ms: u32,
    /// Pause after each reset before continuing
    pub reset_settle_ms: u32,
    /// Normalized trigger level (0.0..=1.0) that starts the selected program
    pub trigger_threshold: f32,
    /// Auto-repeat period while a navigation button is held; `None` means
    /// one step per press
    pub hold_repeat_ms: Option<u32>,
    /// Run the telemetry task alongside each program
    pub telemetry_enabled: bool,
}

impl SelectorConfig {
    pub fn poll(&self) -> Duration {
        Duration::from_millis(self.poll_ms as u64)
    }

    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms as u64)
    }

    pub fn fault_indicator(&self) -> Duration {
        Duration::from_millis(self.fault_indicator_ms as u64)
    }

    pub fn reset_settle(&self) -> Duration {
        Duration::from_millis(self.reset_settle_ms as u64)
    }

    pub fn hold_repeat(&self) -> Option<Duration> {
        self.hold_repeat_ms.map(|ms| Duration::from_millis(ms as u64))
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            poll_ms: 50,
            feedback_ms: 100,
            fault_indicator_ms: 500,
            reset_settle_ms: 50,
            trigger_threshold: DEFAULT_TRIGGER_THRESHOLD,
            hold_repeat_ms: None,
            telemetry_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_defaults() {
        let config = SelectorConfig::default();
        assert_eq!(config.poll(), Duration::from_millis(50));
        assert_eq!(config.feedback(), Duration::from_millis(100));
        assert_eq!(config.trigger_threshold, 0.5);
        assert!(config.hold_repeat().is_none());
        assert!(!config.telemetry_enabled);
    }

    #[test]
    fn test_watchdog_durations() {
        let config = WatchdogConfig::with_limit(3000);
        assert_eq!(config.limit(), Duration::from_millis(3000));
        assert_eq!(config.poll(), Duration::from_millis(10));
    }

    #[test]
    fn test_run_limit_optional() {
        assert!(SupervisorConfig::default().run_limit().is_none());

        let config = SupervisorConfig {
            run_limit_ms: Some(150_000),
            ..Default::default()
        };
        assert_eq!(config.run_limit(), Some(Duration::from_secs(150)));
    }

    #[test]
    fn test_drive_speed_override() {
        let settings = DriveSettings::default().with_straight_speed(500);
        assert_eq!(settings.straight_speed_mm_s, 500);
        assert_eq!(settings.turn_rate_deg_s, DEFAULT_TURN_RATE_DEG_S);
    }
}
