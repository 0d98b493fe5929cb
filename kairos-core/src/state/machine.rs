//! State machine definition
//!
//! Every run goes Idle → Resetting(before) → Executing → Resetting(after)
//! → Idle. Reset failures still produce `ResetFinished`, so the machine
//! always makes it back to Idle.

use super::events::Event;

/// Which reset of the run cycle is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetPhase {
    /// Zeroing the robot before the program starts
    BeforeRun,
    /// Cleaning up after the program, whatever its outcome
    AfterRun,
}

/// Selector states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Menu visible, inputs accepted
    Idle { selection: u8 },
    /// Robot being reset around a run
    Resetting { selection: u8, phase: ResetPhase },
    /// Selected program running under the supervisor
    Executing { selection: u8 },
}

impl Default for State {
    fn default() -> Self {
        State::INITIAL
    }
}

/// Menu index after a "next" press, wrapping to 0
pub fn next_index(selection: u8, count: u8) -> u8 {
    if count == 0 {
        return 0;
    }
    ((selection as u16 + 1) % count as u16) as u8
}

/// Menu index after a "previous" press, wrapping to `count - 1`
pub fn previous_index(selection: u8, count: u8) -> u8 {
    if count == 0 {
        return 0;
    }
    if selection == 0 || selection >= count {
        count - 1
    } else {
        selection - 1
    }
}

impl State {
    pub const INITIAL: State = State::Idle { selection: 0 };

    /// Currently selected menu index
    pub fn selection(&self) -> u8 {
        match *self {
            State::Idle { selection }
            | State::Resetting { selection, .. }
            | State::Executing { selection } => selection,
        }
    }

    /// Check if menu input is accepted
    pub fn is_idle(&self) -> bool {
        matches!(self, State::Idle { .. })
    }

    /// Check if the run cycle owns the actuators
    pub fn owns_actuators(&self) -> bool {
        matches!(self, State::Resetting { .. } | State::Executing { .. })
    }

    /// Process an event and return the next state
    ///
    /// `count` is the number of registered programs.
    pub fn transition(self, event: Event, count: u8) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Menu navigation
            (Idle { selection }, Next) if count > 0 => Idle {
                selection: next_index(selection, count),
            },
            (Idle { selection }, Previous) if count > 0 => Idle {
                selection: previous_index(selection, count),
            },
            (Idle { selection }, Trigger) if selection < count => Resetting {
                selection,
                phase: ResetPhase::BeforeRun,
            },

            // Run cycle
            (
                Resetting {
                    selection,
                    phase: ResetPhase::BeforeRun,
                },
                ResetFinished,
            ) => Executing { selection },
            (Executing { selection }, RunFinished(_)) => Resetting {
                selection,
                phase: ResetPhase::AfterRun,
            },
            (
                Resetting {
                    selection,
                    phase: ResetPhase::AfterRun,
                },
                ResetFinished,
            ) => Idle { selection },

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::ProgramFault;
    use crate::supervisor::RunOutcome;
    use crate::traits::ActuatorFault;
    use proptest::prelude::*;

    #[test]
    fn test_initial_state() {
        assert_eq!(State::default(), State::Idle { selection: 0 });
    }

    #[test]
    fn test_next_wraps_to_first() {
        let state = State::Idle { selection: 2 };
        assert_eq!(state.transition(Event::Next, 3), State::Idle { selection: 0 });
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let state = State::Idle { selection: 0 };
        assert_eq!(
            state.transition(Event::Previous, 3),
            State::Idle { selection: 2 }
        );
    }

    #[test]
    fn test_single_program_menu() {
        let state = State::Idle { selection: 0 };
        assert_eq!(state.transition(Event::Next, 1), state);
        assert_eq!(state.transition(Event::Previous, 1), state);
    }

    #[test]
    fn test_full_run_cycle() {
        let outcomes = [
            RunOutcome::Completed,
            RunOutcome::TimedOut,
            RunOutcome::Faulted(ProgramFault::Actuator(ActuatorFault::Stalled)),
        ];

        for outcome in outcomes {
            let state = State::Idle { selection: 1 };

            let resetting = state.transition(Event::Trigger, 2);
            assert_eq!(
                resetting,
                State::Resetting {
                    selection: 1,
                    phase: ResetPhase::BeforeRun
                }
            );
            assert!(resetting.owns_actuators());

            let executing = resetting.transition(Event::ResetFinished, 2);
            assert_eq!(executing, State::Executing { selection: 1 });

            let cleanup = executing.transition(Event::RunFinished(outcome), 2);
            assert_eq!(
                cleanup,
                State::Resetting {
                    selection: 1,
                    phase: ResetPhase::AfterRun
                }
            );

            let idle = cleanup.transition(Event::ResetFinished, 2);
            assert_eq!(idle, State::Idle { selection: 1 });
        }
    }

    #[test]
    fn test_input_ignored_while_running() {
        let states = [
            State::Executing { selection: 0 },
            State::Resetting {
                selection: 0,
                phase: ResetPhase::BeforeRun,
            },
            State::Resetting {
                selection: 0,
                phase: ResetPhase::AfterRun,
            },
        ];

        for state in states {
            for event in [Event::Next, Event::Previous, Event::Trigger] {
                assert_eq!(state.transition(event, 3), state);
            }
        }
    }

    #[test]
    fn test_trigger_needs_a_program() {
        let state = State::Idle { selection: 0 };
        assert_eq!(state.transition(Event::Trigger, 0), state);
        assert_eq!(state.transition(Event::Next, 0), state);
    }

    proptest! {
        #[test]
        fn prop_next_then_previous_round_trips(count in 1u8..=8, seed in 0u8..8) {
            let selection = seed % count;
            let next = next_index(selection, count);
            prop_assert!(next < count);
            prop_assert_eq!(previous_index(next, count), selection);
        }

        #[test]
        fn prop_wraparound_at_edges(count in 1u8..=8) {
            prop_assert_eq!(next_index(count - 1, count), 0);
            prop_assert_eq!(previous_index(0, count), count - 1);
        }

        #[test]
        fn prop_count_presses_return_home(count in 1u8..=8, seed in 0u8..8) {
            let start = State::Idle { selection: seed % count };
            let mut state = start;
            for _ in 0..count {
                state = state.transition(Event::Next, count);
            }
            prop_assert_eq!(state, start);
        }
    }
}
