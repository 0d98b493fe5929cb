//! Deterministic simulated robot
//!
//! Motions take the time their distance and speed imply on the embassy
//! clock, and positions interpolate linearly in between. Nothing moves
//! unless commanded, so runs are reproducible.

pub mod drive;
pub mod hub;
pub mod motion;
pub mod motor;
pub mod robot;

pub use drive::SimDriveBase;
pub use hub::SimHub;
pub use motion::Motion;
pub use motor::SimMotor;
pub use robot::{SimGeometry, SimRobot};

/// Round to the nearest integer, halves away from zero
pub(crate) fn round(value: f32) -> i32 {
    if value >= 0.0 {
        (value + 0.5) as i32
    } else {
        (value - 0.5) as i32
    }
}
