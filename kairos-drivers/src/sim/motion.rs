//! Linear motion profile

use embassy_time::{Duration, Instant};

/// A position moving linearly from `from` to `to` over `duration`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Motion {
    from: i32,
    to: i32,
    started: Instant,
    duration: Duration,
}

impl Motion {
    pub fn new(from: i32, to: i32, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    /// Standing still at `position`
    pub fn idle(position: i32) -> Self {
        Self::new(position, position, Instant::from_ticks(0), Duration::from_ticks(0))
    }

    pub fn target(&self) -> i32 {
        self.to
    }

    pub fn position_at(&self, now: Instant) -> i32 {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return self.to;
        }

        let span = (self.to - self.from) as i64;
        let progress = span * elapsed.as_micros() as i64 / self.duration.as_micros() as i64;
        self.from + progress as i32
    }

    pub fn is_finished_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Freeze at the position reached by `now`
    pub fn halted_at(&self, now: Instant) -> Self {
        Self::idle(self.position_at(now))
    }
}
