//! Telemetry sampling
//!
//! A best-effort loop that samples robot state at a fixed cadence while a
//! program runs. It only reads sensors; it never commands an actuator.

pub mod sample;
pub mod task;

pub use sample::{LogSink, TelemetrySample, TelemetrySink};
pub use task::{TelemetryStats, TelemetryTask};
