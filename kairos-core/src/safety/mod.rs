//! Safety mechanisms
//!
//! Bounds every non-blocking actuator command so a motion that never
//! reports completion cannot stall the program.

pub mod watchdog;

pub use watchdog::{guard_curve, guard_motor, run_with_timeout, WatchdogDeadline};
