//! Actuator and hub implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in kairos-core:
//!
//! - Simulated drive base, motors and IMU with time-based motions
//! - Simulated hub (buttons, force trigger, display, status light)
//! - Fault injection for stalls, jams, reset failures and sensor dropouts

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sim;

pub use sim::{SimDriveBase, SimGeometry, SimHub, SimMotor, SimRobot};
