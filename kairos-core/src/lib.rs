//! Board-agnostic core logic for the Kairos competition robot
//!
//! This crate contains everything that decides *when* the robot moves,
//! independent of the hardware that moves it:
//!
//! - Hardware abstraction traits (drive base, motors, IMU, hub I/O)
//! - Watchdog guard for non-blocking actuator commands
//! - Telemetry sampling task
//! - Supervisor running a motion program alongside telemetry
//! - Program registry and the menu/selector state machine
//! - Timing configuration types
//!
//! Everything runs on a single cooperative executor. Tasks only switch at
//! `.await` points, so no locking is needed between the motion and
//! telemetry paths.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod program;
pub mod safety;
pub mod selector;
pub mod state;
pub mod supervisor;
pub mod telemetry;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use program::{MotionContext, MotionProgram, ProgramEntry, ProgramFault, Registry};
pub use selector::{start_selector, Selector, SelectorError};
pub use supervisor::{start_supervisor, RunOutcome, StopSignal, Supervisor};
