//! Press edge detection
//!
//! A held input counts as one press. The detector re-arms only after the
//! input has been released, unless hold-repeat is enabled, in which case a
//! held input fires again every `repeat_after`.

use embassy_time::{Duration, Instant};

/// Rising-edge detector with optional hold-repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeDetector {
    armed: bool,
    last_fire: Option<Instant>,
    repeat_after: Option<Duration>,
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(None)
    }
}

impl EdgeDetector {
    pub const fn new(repeat_after: Option<Duration>) -> Self {
        Self {
            armed: true,
            last_fire: None,
            repeat_after,
        }
    }

    /// Feed the current input level, returning `true` on a press
    pub fn update(&mut self, pressed: bool, now: Instant) -> bool {
        if !pressed {
            self.armed = true;
            self.last_fire = None;
            return false;
        }

        if self.armed {
            self.armed = false;
            self.last_fire = Some(now);
            return true;
        }

        match (self.repeat_after, self.last_fire) {
            (Some(period), Some(last)) if now.saturating_duration_since(last) >= period => {
                self.last_fire = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Check if the next press will fire
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Forget any held input
    ///
    /// Used after a run so a trigger still squeezed at the end does not
    /// start the program again.
    pub fn disarm(&mut self) {
        self.armed = false;
        self.last_fire = None;
    }
}
