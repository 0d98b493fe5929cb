//! Async selector loop
//!
//! Polls the hub inputs on a fixed cycle, feeds edges into the selector
//! [`State`] machine and performs the side effects of each state: the
//! reset-execute-reset cycle, the display and the status light.

use embassy_time::{Instant, Timer};
use log::{debug, info, warn};

use super::debounce::EdgeDetector;
use crate::config::{SelectorConfig, SupervisorConfig};
use crate::program::{MotionProgram, ProgramFault, Registry, RegistryError};
use crate::state::{Event, ResetPhase, State};
use crate::supervisor::{RunOutcome, Supervisor};
use crate::telemetry::TelemetrySink;
use crate::traits::{Button, HubFeedback, HubInputs, LightColor, Robot};

/// Selector construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectorError {
    /// Nothing to select
    EmptyRegistry,
    /// The registry could not be built
    Registry(RegistryError),
}

impl From<RegistryError> for SelectorError {
    fn from(err: RegistryError) -> Self {
        SelectorError::Registry(err)
    }
}

/// Menu front-end driving one robot
pub struct Selector<'a, R, H, P, K> {
    robot: &'a R,
    hub: &'a H,
    registry: &'a Registry<P>,
    supervisor: Supervisor,
    sink: K,
    config: SelectorConfig,
    state: State,
    next: EdgeDetector,
    previous: EdgeDetector,
    trigger: EdgeDetector,
}

impl<'a, R, H, P, K> Selector<'a, R, H, P, K>
where
    R: Robot,
    H: HubInputs + HubFeedback,
    P: MotionProgram<R>,
    K: TelemetrySink,
{
    pub fn new(
        robot: &'a R,
        hub: &'a H,
        registry: &'a Registry<P>,
        sink: K,
        config: SelectorConfig,
        supervisor: SupervisorConfig,
    ) -> Result<Self, SelectorError> {
        if registry.is_empty() {
            return Err(SelectorError::EmptyRegistry);
        }

        let repeat = config.hold_repeat();
        Ok(Self {
            robot,
            hub,
            registry,
            supervisor: Supervisor::new(supervisor),
            sink,
            config,
            state: State::INITIAL,
            next: EdgeDetector::new(repeat),
            previous: EdgeDetector::new(repeat),
            trigger: EdgeDetector::new(None),
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Index of the selected program
    pub fn selection(&self) -> u8 {
        self.state.selection()
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    fn program_count(&self) -> u8 {
        self.registry.len() as u8
    }

    /// One poll cycle
    ///
    /// Returns the outcome if the cycle ran a program.
    pub async fn step(&mut self) -> Option<RunOutcome> {
        self.hub.show_number(self.selection());

        let now = Instant::now();
        if self.next.update(self.hub.pressed(Button::Right), now) {
            self.navigate(Event::Next, LightColor::Green).await;
        } else if self.previous.update(self.hub.pressed(Button::Left), now) {
            self.navigate(Event::Previous, LightColor::Blue).await;
        }

        let squeezed = match self.hub.trigger_level() {
            Ok(level) => level >= self.config.trigger_threshold,
            Err(fault) => {
                warn!("trigger read failed: {:?}", fault);
                false
            }
        };

        if self.trigger.update(squeezed, Instant::now()) {
            return self.execute().await;
        }
        None
    }

    /// Poll forever
    pub async fn run(&mut self) {
        info!("selector started with {} programs", self.program_count());
        loop {
            self.step().await;
            Timer::after(self.config.poll()).await;
        }
    }

    async fn navigate(&mut self, event: Event, color: LightColor) {
        self.apply(event);
        self.hub.show_number(self.selection());

        self.hub.light(Some(color));
        Timer::after(self.config.feedback()).await;
        self.hub.light(None);

        info!("program {} selected", self.selection());
    }

    /// Reset, run the selection, reset again, back to idle
    async fn execute(&mut self) -> Option<RunOutcome> {
        self.apply(Event::Trigger);
        if !self.state.owns_actuators() {
            return None;
        }

        let selection = self.selection();
        self.hub.light(Some(LightColor::Red));
        info!("=== running program {} ===", selection);

        self.reset().await;
        self.apply(Event::ResetFinished);

        let outcome = match self.registry.get(selection) {
            Some(entry) => {
                let sink = self.config.telemetry_enabled.then_some(&mut self.sink);
                self.supervisor.run_program(self.robot, entry, sink).await
            }
            None => RunOutcome::Faulted(ProgramFault::UnknownProgram),
        };

        match outcome {
            RunOutcome::Completed => info!("=== program {} completed ===", selection),
            RunOutcome::TimedOut => warn!("=== program {} timed out ===", selection),
            RunOutcome::Faulted(fault) => {
                warn!("=== program {} faulted: {:?} ===", selection, fault);
                self.hub.light(Some(LightColor::Red));
                Timer::after(self.config.fault_indicator()).await;
                self.hub.light(None);
            }
        }
        self.apply(Event::RunFinished(outcome));

        self.reset().await;
        self.apply(Event::ResetFinished);

        self.hub.light(None);
        // A trigger still squeezed must be released before the next run
        self.trigger.disarm();
        info!("back to menu");
        Some(outcome)
    }

    /// Reset the robot; failures are logged and never block progress
    async fn reset(&self) {
        let phase = match self.state {
            State::Resetting { phase, .. } => phase,
            _ => ResetPhase::AfterRun,
        };

        match self.robot.reset_all() {
            Ok(()) => debug!("reset ok ({:?})", phase),
            Err(fault) => warn!("reset failed ({:?}): {:?}", phase, fault),
        }
        Timer::after(self.config.reset_settle()).await;
    }

    fn apply(&mut self, event: Event) {
        // Run-cycle progress only arrives while the cycle holds the actuators
        debug_assert!(!event.is_lifecycle_event() || self.state.owns_actuators());

        let next = self.state.transition(event, self.program_count());
        if next != self.state {
            debug!("selector {:?} -> {:?}", self.state, next);
        } else if event.is_user_event() {
            debug!("{:?} ignored in {:?}", event, self.state);
        }
        self.state = next;
    }
}

/// Build a selector over `registry` and poll it forever
pub async fn start_selector<R, H, P, K>(
    robot: &R,
    hub: &H,
    registry: &Registry<P>,
    sink: K,
    config: SelectorConfig,
    supervisor: SupervisorConfig,
) -> Result<(), SelectorError>
where
    R: Robot,
    H: HubInputs + HubFeedback,
    P: MotionProgram<R>,
    K: TelemetrySink,
{
    let mut selector = Selector::new(robot, hub, registry, sink, config, supervisor)?;
    selector.run().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockHub, MockProgram, MockRobot};
    use crate::telemetry::{LogSink, TelemetrySample};
    use crate::traits::ActuatorFault;
    use embassy_futures::block_on;

    fn fast_config() -> SelectorConfig {
        SelectorConfig {
            poll_ms: 5,
            feedback_ms: 5,
            fault_indicator_ms: 5,
            reset_settle_ms: 5,
            ..Default::default()
        }
    }

    fn registry() -> Registry<MockProgram> {
        let mut registry = Registry::new();
        registry.add("zero", MockProgram::Sleep(10)).unwrap();
        registry.add("one", MockProgram::Sleep(10)).unwrap();
        registry.add("fail", MockProgram::Fail).unwrap();
        registry
    }

    fn selector<'a>(
        robot: &'a MockRobot,
        hub: &'a MockHub,
        registry: &'a Registry<MockProgram>,
    ) -> Selector<'a, MockRobot, MockHub, MockProgram, LogSink> {
        Selector::new(
            robot,
            hub,
            registry,
            LogSink,
            fast_config(),
            SupervisorConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_registry_rejected() {
        let robot = MockRobot::new();
        let hub = MockHub::new();
        let registry: Registry<MockProgram> = Registry::new();

        let result = Selector::new(
            &robot,
            &hub,
            &registry,
            LogSink,
            fast_config(),
            SupervisorConfig::default(),
        );
        assert!(matches!(result, Err(SelectorError::EmptyRegistry)));
    }

    #[test]
    fn test_display_shows_selection() {
        let robot = MockRobot::new();
        let hub = MockHub::new();
        let registry = registry();
        let mut selector = selector(&robot, &hub, &registry);

        assert_eq!(block_on(selector.step()), None);
        assert_eq!(hub.display.get(), Some(0));
        assert_eq!(hub.light.get(), None);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let robot = MockRobot::new();
        let hub = MockHub::new();
        let registry = registry();
        let mut selector = selector(&robot, &hub, &registry);

        hub.left.set(true);
        block_on(selector.step());
        assert_eq!(selector.selection(), 2);
        assert_eq!(hub.display.get(), Some(2));
        assert_eq!(hub.flashes.get(), 1);

        hub.left.set(false);
        block_on(selector.step());
        hub.right.set(true);
        block_on(selector.step());
        assert_eq!(selector.selection(), 0);
    }

    #[test]
    fn test_held_button_moves_once() {
        let robot = MockRobot::new();
        let hub = MockHub::new();
        let registry = registry();
        let mut selector = selector(&robot, &hub, &registry);

        hub.right.set(true);
        for _ in 0..5 {
            block_on(selector.step());
        }
        assert_eq!(selector.selection(), 1);

        hub.right.set(false);
        block_on(selector.step());
        hub.right.set(true);
        block_on(selector.step());
        assert_eq!(selector.selection(), 2);
    }

    #[test]
    fn test_hold_repeat() {
        let robot = MockRobot::new();
        let hub = MockHub::new();
        let registry = registry();
        let config = SelectorConfig {
            hold_repeat_ms: Some(1),
            ..fast_config()
        };
        let mut selector = Selector::new(
            &robot,
            &hub,
            &registry,
            LogSink,
            config,
            SupervisorConfig::default(),
        )
        .unwrap();

        hub.right.set(true);
        block_on(selector.step());
        block_on(selector.step());
        // Each step flashes for 5 ms, longer than the repeat period
        assert_eq!(selector.selection(), 2);
    }

    #[test]
    fn test_trigger_runs_with_two_resets() {
        let robot = MockRobot::new();
        let hub = MockHub::new();
        let registry = registry();
        let mut selector = selector(&robot, &hub, &registry);

        hub.right.set(true);
        block_on(selector.step());
        hub.right.set(false);
        assert_eq!(selector.selection(), 1);

        hub.trigger.set(0.7);
        let outcome = block_on(selector.step());

        assert_eq!(outcome, Some(RunOutcome::Completed));
        assert_eq!(selector.state(), State::Idle { selection: 1 });
        assert_eq!(robot.resets.get(), 2);
        assert_eq!(hub.light.get(), None);
    }

    #[test]
    fn test_two_program_menu_end_to_end() {
        let robot = MockRobot::new();
        let hub = MockHub::new();
        let mut registry = Registry::new();
        registry.add("first", MockProgram::Sleep(50)).unwrap();
        registry.add("second", MockProgram::Sleep(50)).unwrap();
        let mut selector = selector(&robot, &hub, &registry);
        assert_eq!(selector.state(), State::Idle { selection: 0 });

        hub.right.set(true);
        block_on(selector.step());
        hub.right.set(false);
        assert_eq!(selector.selection(), 1);

        hub.trigger.set(0.7);
        let started = Instant::now();
        let outcome = block_on(selector.step());

        assert_eq!(outcome, Some(RunOutcome::Completed));
        assert!(started.elapsed() >= embassy_time::Duration::from_millis(50));
        assert_eq!(selector.state(), State::Idle { selection: 1 });
        assert_eq!(robot.resets.get(), 2);
    }

    #[test]
    fn test_timeout_halts_resets_and_returns_idle() {
        let robot = MockRobot::new();
        let hub = MockHub::new();
        let mut registry = Registry::new();
        registry.add("quick", MockProgram::Sleep(10)).unwrap();
        registry.add("endless", MockProgram::Sleep(1000)).unwrap();
        let supervisor = SupervisorConfig {
            run_limit_ms: Some(20),
            ..Default::default()
        };
        let mut selector = Selector::new(
            &robot,
            &hub,
            &registry,
            LogSink,
            fast_config(),
            supervisor,
        )
        .unwrap();

        hub.left.set(true);
        block_on(selector.step());
        hub.left.set(false);
        assert_eq!(selector.selection(), 1);

        hub.trigger.set(1.0);
        let started = Instant::now();
        let outcome = block_on(selector.step());

        assert_eq!(outcome, Some(RunOutcome::TimedOut));
        assert!(started.elapsed() < embassy_time::Duration::from_millis(500));
        assert_eq!(selector.state(), State::Idle { selection: 1 });
        assert_eq!(robot.resets.get(), 2);
        assert_eq!(robot.halts.get(), 1);
        assert_eq!(hub.light.get(), None);
    }

    #[test]
    fn test_trigger_below_threshold_ignored() {
        let robot = MockRobot::new();
        let hub = MockHub::new();
        let registry = registry();
        let mut selector = selector(&robot, &hub, &registry);

        hub.trigger.set(0.49);
        assert_eq!(block_on(selector.step()), None);
        assert_eq!(robot.resets.get(), 0);

        hub.trigger.set(0.5);
        assert_eq!(block_on(selector.step()), Some(RunOutcome::Completed));
    }

    #[test]
    fn test_held_trigger_runs_once() {
        let robot = MockRobot::new();
        let hub = MockHub::new();
        let registry = registry();
        let mut selector = selector(&robot, &hub, &registry);

        hub.trigger.set(1.0);
        assert!(block_on(selector.step()).is_some());
        assert!(block_on(selector.step()).is_none());
        assert!(block_on(selector.step()).is_none());

        hub.trigger.set(0.0);
        block_on(selector.step());
        hub.trigger.set(1.0);
        assert!(block_on(selector.step()).is_some());
        assert_eq!(robot.resets.get(), 4);
    }

    #[test]
    fn test_fault_still_resets_and_returns_idle() {
        let robot = MockRobot::new();
        let hub = MockHub::new();
        let registry = registry();
        let mut selector = selector(&robot, &hub, &registry);

        hub.left.set(true);
        block_on(selector.step());
        hub.left.set(false);
        assert_eq!(selector.selection(), 2);

        hub.trigger.set(0.9);
        let outcome = block_on(selector.step());

        assert_eq!(
            outcome,
            Some(RunOutcome::Faulted(ProgramFault::Actuator(
                ActuatorFault::Stalled
            )))
        );
        assert_eq!(selector.state(), State::Idle { selection: 2 });
        assert_eq!(robot.resets.get(), 2);
        assert!(hub.red_shown.get() >= 2);
        assert_eq!(hub.light.get(), None);
    }

    #[test]
    fn test_reset_failures_contained() {
        let robot = MockRobot::new();
        robot.fail_resets.set(true);
        let hub = MockHub::new();
        let registry = registry();
        let mut selector = selector(&robot, &hub, &registry);

        hub.trigger.set(0.8);
        let outcome = block_on(selector.step());

        assert_eq!(outcome, Some(RunOutcome::Completed));
        assert_eq!(selector.state(), State::Idle { selection: 0 });
        assert_eq!(robot.resets.get(), 2);

        // Menu still responds
        hub.trigger.set(0.0);
        hub.right.set(true);
        block_on(selector.step());
        assert_eq!(selector.selection(), 1);
    }

    #[test]
    fn test_trigger_read_fault_is_not_a_press() {
        let robot = MockRobot::new();
        let hub = MockHub::new();
        hub.trigger.set(1.0);
        hub.trigger_fault.set(true);
        let registry = registry();
        let mut selector = selector(&robot, &hub, &registry);

        assert_eq!(block_on(selector.step()), None);
        assert_eq!(robot.resets.get(), 0);
    }

    #[test]
    fn test_telemetry_enabled_emits_samples() {
        let robot = MockRobot::new();
        let hub = MockHub::new();
        let mut registry = Registry::new();
        registry.add("slow", MockProgram::Sleep(60)).unwrap();

        let mut samples = 0u32;
        let config = SelectorConfig {
            telemetry_enabled: true,
            ..fast_config()
        };
        let supervisor = SupervisorConfig {
            telemetry: crate::config::TelemetryConfig { interval_ms: 20 },
            ..Default::default()
        };
        let mut selector = Selector::new(
            &robot,
            &hub,
            &registry,
            |_: &TelemetrySample| samples += 1,
            config,
            supervisor,
        )
        .unwrap();

        hub.trigger.set(1.0);
        assert_eq!(block_on(selector.step()), Some(RunOutcome::Completed));
        drop(selector);
        assert!(samples >= 2);
    }
}
