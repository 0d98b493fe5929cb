//! Mission scripts
//!
//! Each mission is a fixed sequence of drive base and lift commands written
//! against the `kairos-core` traits, so the same script runs on the hub and
//! on the simulator. [`default_registry`] is the menu the selector offers.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod mission;
pub mod registry;

pub use mission::Mission;
pub use registry::default_registry;
