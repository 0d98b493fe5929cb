//! Operator console
//!
//! Maps typed lines onto the hub inputs:
//!
//! | input        | effect                         |
//! |--------------|--------------------------------|
//! | `n`, `next`  | press the right (next) button  |
//! | `p`, `prev`  | press the left (previous) button |
//! | `g [level]`  | squeeze the trigger (default 1.0) |
//! | `q`, `quit`  | exit                           |

use std::io::{self, BufRead};
use std::thread;

use kairos_core::traits::Button;
use kairos_drivers::SimHub;
use tracing::{debug, info, warn};

use crate::channels::{CONSOLE_CHANNEL, SHUTDOWN};

/// One operator action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleCommand {
    Press(Button),
    Squeeze(f32),
    Quit,
}

impl ConsoleCommand {
    /// Parse one console line; `None` for blank or unknown input
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let command = match words.next()? {
            "n" | "next" => ConsoleCommand::Press(Button::Right),
            "p" | "prev" => ConsoleCommand::Press(Button::Left),
            "g" | "go" => {
                let level = match words.next() {
                    Some(level) => level.parse().ok()?,
                    None => 1.0,
                };
                ConsoleCommand::Squeeze(level)
            }
            "q" | "quit" => ConsoleCommand::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Read stdin on a background thread, forwarding commands to the executor
///
/// End of input counts as quit.
pub fn spawn_reader() -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("console".into())
        .spawn(|| {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match ConsoleCommand::parse(&line) {
                    Some(command) => {
                        if CONSOLE_CHANNEL.try_send(command).is_err() {
                            warn!("console busy, input dropped");
                        }
                        if command == ConsoleCommand::Quit {
                            return;
                        }
                    }
                    None if line.trim().is_empty() => {}
                    None => warn!("unknown input '{}' (n, p, g [level], q)", line.trim()),
                }
            }
            let _ = CONSOLE_CHANNEL.try_send(ConsoleCommand::Quit);
        })
}

/// Apply console commands to the hub
#[embassy_executor::task]
pub async fn console_task(hub: &'static SimHub) {
    info!("console: n = next, p = previous, g [level] = trigger, q = quit");
    loop {
        match CONSOLE_CHANNEL.receive().await {
            ConsoleCommand::Press(button) => {
                debug!("press {:?}", button);
                hub.press(button);
            }
            ConsoleCommand::Squeeze(level) => {
                debug!("squeeze {:.2}", level);
                hub.squeeze(level);
            }
            ConsoleCommand::Quit => {
                SHUTDOWN.signal(());
                return;
            }
        }
    }
}
