//! Program selector
//!
//! Menu front-end of the robot: shows the selected program number, cycles
//! through the registry on button presses and runs the selection when the
//! trigger is squeezed, with a full robot reset before and after.

pub mod debounce;
pub mod runner;

pub use debounce::EdgeDetector;
pub use runner::{start_selector, Selector, SelectorError};
