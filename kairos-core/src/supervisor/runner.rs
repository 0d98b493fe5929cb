//! Supervisor implementation

use core::future::Future;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_futures::join::join;
use embassy_futures::select::{select, Either};
use embassy_time::{Instant, Timer};
use log::{info, warn};

use super::{RunOutcome, StopSignal};
use crate::config::SupervisorConfig;
use crate::program::{MotionContext, MotionProgram, ProgramEntry, ProgramFault};
use crate::telemetry::{TelemetrySample, TelemetrySink, TelemetryTask};
use crate::traits::Robot;

/// Runs motion programs concurrently with telemetry
///
/// At most one run is active per supervisor; a second concurrent request is
/// rejected as `Faulted(Busy)` instead of sharing the actuators.
pub struct Supervisor {
    config: SupervisorConfig,
    stop: StopSignal,
    active: AtomicBool,
}

/// Clears the active flag even if the run future is dropped
struct ActiveGuard<'a>(&'a AtomicBool);

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Supervisor {
    pub const fn new(config: SupervisorConfig) -> Self {
        Self {
            config,
            stop: StopSignal::new(),
            active: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Stop signal handed to the telemetry side of a run
    pub fn stop_signal(&self) -> &StopSignal {
        &self.stop
    }

    /// Check if a run is in progress
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Run `motion` to completion while `telemetry` (if any) runs alongside
    ///
    /// When `motion` finishes, successfully or not, the stop signal is
    /// raised and the supervisor waits for `telemetry` to return. The
    /// outcome is always the motion's; telemetry has no say in it.
    ///
    /// With a configured run limit, a motion still pending at the deadline
    /// is abandoned at its current suspension point and the outcome is
    /// `TimedOut`. Halting the actuators is the caller's job (see
    /// [`Supervisor::run_program`]).
    pub async fn run_concurrently<M, T>(&self, motion: M, telemetry: Option<T>) -> RunOutcome
    where
        M: Future<Output = Result<(), ProgramFault>>,
        T: Future,
    {
        if self.active.swap(true, Ordering::AcqRel) {
            warn!("supervisor busy, run rejected");
            return RunOutcome::Faulted(ProgramFault::Busy);
        }
        let _active = ActiveGuard(&self.active);

        // Futures are lazy: nothing has observed the signal yet
        self.stop.reset();

        let motion = async {
            let outcome = match self.config.run_limit() {
                Some(limit) => match select(motion, Timer::after(limit)).await {
                    Either::First(result) => RunOutcome::from(result),
                    Either::Second(()) => {
                        warn!("run limit of {} ms reached", limit.as_millis());
                        RunOutcome::TimedOut
                    }
                },
                None => RunOutcome::from(motion.await),
            };
            self.stop.raise();
            outcome
        };

        match telemetry {
            Some(telemetry) => join(motion, telemetry).await.0,
            None => motion.await,
        }
    }

    /// Run a registered program against the robot
    ///
    /// Telemetry is sampled from the robot and emitted to `sink` when one
    /// is given. A timed-out run leaves the robot halted.
    pub async fn run_program<R, P, K>(
        &self,
        robot: &R,
        entry: &ProgramEntry<P>,
        sink: Option<&mut K>,
    ) -> RunOutcome
    where
        R: Robot,
        P: MotionProgram<R>,
        K: TelemetrySink,
    {
        info!("program '{}' started", entry.name());
        let started = Instant::now();

        let motion = entry
            .program()
            .execute(MotionContext::new(robot, entry.params()));

        let telemetry = sink.map(|sink| {
            TelemetryTask::new(
                |elapsed| TelemetrySample::read(robot, elapsed),
                move |sample: &TelemetrySample| sink.emit(sample),
                self.config.telemetry.interval(),
            )
            .run(&self.stop)
        });

        let outcome = self.run_concurrently(motion, telemetry).await;

        if outcome == RunOutcome::TimedOut {
            robot.halt();
        }

        info!(
            "program '{}' finished in {} ms: {:?}",
            entry.name(),
            started.elapsed().as_millis(),
            outcome
        );
        outcome
    }
}
