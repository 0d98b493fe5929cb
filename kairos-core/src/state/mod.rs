//! Selector state machine
//!
//! Defines the authoritative menu/execution behavior. The state machine is
//! explicit, finite and deterministic; the async selector only feeds it
//! events and performs the side effects each state calls for.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{next_index, previous_index, ResetPhase, State};
