//! Cooperative stop signal
//!
//! Owned by the supervisor and lent to the telemetry task. Unlike an
//! `embassy_sync::signal::Signal`, observing the flag does not consume it:
//! once raised it stays raised until the next run re-arms it.

use core::future::poll_fn;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::Poll;

use embassy_sync::waitqueue::AtomicWaker;

/// Level-triggered stop flag with a single async waiter
pub struct StopSignal {
    raised: AtomicBool,
    waker: AtomicWaker,
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl StopSignal {
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
            waker: AtomicWaker::new(),
        }
    }

    /// Ask the observer to stop and wake it if suspended
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
        self.waker.wake();
    }

    /// Re-arm for the next run
    pub fn reset(&self) {
        self.raised.store(false, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Wait until the signal is raised
    pub async fn wait(&self) {
        poll_fn(|cx| {
            self.waker.register(cx.waker());
            if self.is_raised() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await
    }
}
