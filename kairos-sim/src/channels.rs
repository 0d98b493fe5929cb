//! Inter-task communication
//!
//! The console reader runs on a plain thread; everything else runs on the
//! embassy executor. Commands cross over through a static channel.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use crate::console::ConsoleCommand;

/// Channel capacity for console commands
const CONSOLE_CHANNEL_SIZE: usize = 8;

/// Commands typed on stdin
pub static CONSOLE_CHANNEL: Channel<CriticalSectionRawMutex, ConsoleCommand, CONSOLE_CHANNEL_SIZE> =
    Channel::new();

/// Raised when the operator quits
pub static SHUTDOWN: Signal<CriticalSectionRawMutex, ()> = Signal::new();
