//! Configuration types
//!
//! Timing and motion settings shared by the supervisor, selector and
//! mission scripts. Defaults match the tuning used on the competition table.

pub mod types;

pub use types::*;
