//! Telemetry task loop

use embassy_futures::select::select;
use embassy_time::{Duration, Instant, Timer};
use log::{info, warn};

use super::{TelemetrySample, TelemetrySink};
use crate::supervisor::StopSignal;
use crate::traits::ActuatorFault;

/// Counters reported when the task exits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryStats {
    /// Samples emitted
    pub emitted: u32,
    /// Samples that failed to read
    pub faults: u32,
}

/// Periodic sample-and-emit loop
pub struct TelemetryTask<S, E> {
    sample: S,
    emit: E,
    interval: Duration,
}

impl<S, E> TelemetryTask<S, E>
where
    S: FnMut(Duration) -> Result<TelemetrySample, ActuatorFault>,
    E: TelemetrySink,
{
    /// Create a task
    ///
    /// `sample` receives the time elapsed since the task started.
    pub fn new(sample: S, emit: E, interval: Duration) -> Self {
        Self {
            sample,
            emit,
            interval,
        }
    }

    /// Sample, emit and sleep until `stop` is raised
    ///
    /// The stop flag is checked before every sample, and the sleep between
    /// samples ends early when the flag is raised, so shutdown takes at
    /// most one interval. A failed read is logged and skipped.
    pub async fn run(mut self, stop: &StopSignal) -> TelemetryStats {
        info!(
            "--- telemetry started ({} ms interval) ---",
            self.interval.as_millis()
        );

        let started = Instant::now();
        let mut stats = TelemetryStats::default();

        while !stop.is_raised() {
            match (self.sample)(started.elapsed()) {
                Ok(sample) => {
                    self.emit.emit(&sample);
                    stats.emitted += 1;
                }
                Err(fault) => {
                    stats.faults += 1;
                    warn!("telemetry read failed: {:?}", fault);
                }
            }

            select(Timer::after(self.interval), stop.wait()).await;
        }

        info!(
            "--- telemetry stopped ({} samples, {} faults) ---",
            stats.emitted, stats.faults
        );
        stats
    }
}
