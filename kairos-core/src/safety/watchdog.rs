//! Watchdog guard
//!
//! Starts a non-blocking actuator command, then polls its completion until
//! it reports done or the deadline passes. On timeout the actuator is
//! forced to stop, exactly once. A completed command is never stopped, so a
//! motion that just finished is not cut short.

use embassy_time::{Duration, Instant, Timer};
use log::{debug, error, warn};

use crate::config::WatchdogConfig;
use crate::program::ProgramFault;
use crate::supervisor::RunOutcome;
use crate::traits::{ActuatorFault, DriveBase, Motor, StopMode};

/// Deadline for one guarded call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchdogDeadline {
    started_at: Instant,
    limit: Duration,
}

impl WatchdogDeadline {
    /// Start a deadline now
    pub fn start(limit: Duration) -> Self {
        Self::starting_at(Instant::now(), limit)
    }

    /// Start a deadline at a given instant
    pub fn starting_at(started_at: Instant, limit: Duration) -> Self {
        Self { started_at, limit }
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Instant at which the deadline passes
    pub fn expires_at(&self) -> Instant {
        self.started_at + self.limit
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.expires_at().saturating_duration_since(now)
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}

/// Run a non-blocking command under a watchdog
///
/// - `start` triggers the command once; if it fails, the result is
///   `Faulted` and nothing is polled or stopped.
/// - `is_done` is checked immediately, then after every sleep of `poll`
///   (shortened so the last sleep ends exactly at the deadline).
/// - `stop` is called once, and only on `TimedOut`.
pub async fn run_with_timeout<S, D, X>(
    start: S,
    mut is_done: D,
    stop: X,
    limit: Duration,
    poll: Duration,
) -> RunOutcome
where
    S: FnOnce() -> Result<(), ActuatorFault>,
    D: FnMut() -> bool,
    X: FnOnce(),
{
    let deadline = WatchdogDeadline::start(limit);

    if let Err(fault) = start() {
        error!("guarded command failed to start: {:?}", fault);
        return RunOutcome::Faulted(ProgramFault::Actuator(fault));
    }

    loop {
        if is_done() {
            debug!(
                "guarded command done after {} ms",
                deadline.elapsed_at(Instant::now()).as_millis()
            );
            return RunOutcome::Completed;
        }

        let now = Instant::now();
        if deadline.is_expired_at(now) {
            warn!(
                "watchdog expired after {} ms, forcing stop",
                deadline.elapsed_at(now).as_millis()
            );
            stop();
            return RunOutcome::TimedOut;
        }

        Timer::after(poll.min(deadline.remaining_at(now))).await;
    }
}

/// Rotate a motor under a watchdog
pub async fn guard_motor<M: Motor>(
    motor: &M,
    speed_deg_s: i32,
    angle_deg: i32,
    config: WatchdogConfig,
) -> RunOutcome {
    run_with_timeout(
        || motor.start_run_angle(speed_deg_s, angle_deg),
        || motor.is_done(),
        || motor.stop(),
        config.limit(),
        config.poll(),
    )
    .await
}

/// Drive an arc under a watchdog
pub async fn guard_curve<D: DriveBase>(
    drive: &D,
    radius_mm: i32,
    angle_deg: i32,
    then: StopMode,
    config: WatchdogConfig,
) -> RunOutcome {
    run_with_timeout(
        || drive.start_curve(radius_mm, angle_deg, then),
        || drive.is_done(),
        || drive.stop(),
        config.limit(),
        config.poll(),
    )
    .await
}
