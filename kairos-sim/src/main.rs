//! Kairos simulator
//!
//! Runs the robot supervisor and program selector on the host against a
//! simulated drive base, lifts and hub. The console stands in for the hub
//! buttons; telemetry and state changes go to the log.
//!
//! Set `RUST_LOG=debug` (or `RUST_LOG=kairos_core=trace`) for more detail.

use clap::Parser;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_time::Duration;
use static_cell::StaticCell;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use kairos_core::telemetry::LogSink;
use kairos_core::traits::Robot;
use kairos_core::{start_supervisor, RunOutcome, Selector};
use kairos_drivers::{SimHub, SimRobot};
use kairos_programs::registry::entry;
use kairos_programs::{default_registry, Mission};

mod channels;
mod cli;
mod config;
mod console;
mod report;

use crate::channels::SHUTDOWN;
use crate::cli::{Args, Command};
use crate::config::SimConfig;

// The hub outlives main's stack frame: the console task holds it
static HUB: StaticCell<SimHub> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    init_logging();

    let code = run(spawner).await;
    // The executor never returns on its own
    std::process::exit(code);
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}

/// Process exit codes
const EXIT_OK: i32 = 0;
const EXIT_FAILED: i32 = 1;

async fn run(spawner: Spawner) -> i32 {
    // Usage errors exit here with clap's message
    let args = Args::parse();

    let config = match SimConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(
                "configuration rejected\n{}",
                report::format_error_lines(&e.to_string())
            );
            return EXIT_FAILED;
        }
    };

    match args.into_command() {
        Command::List => {
            list_missions();
            EXIT_OK
        }
        Command::Run {
            mission,
            params,
            no_telemetry,
        } => run_mission(&config, &mission, &params, !no_telemetry).await,
        Command::Select { dev } => run_selector(spawner, config, dev).await,
    }
}

fn list_missions() {
    let menu = default_registry().ok();
    for mission in Mission::ALL {
        let position = menu
            .as_ref()
            .and_then(|registry| registry.iter().position(|e| *e.program() == mission));
        match position {
            Some(index) => println!("{:>2}  {}", index, mission.name()),
            None => println!("    {} (run only)", mission.name()),
        }
    }
}

async fn run_mission(config: &SimConfig, name: &str, params: &[i32], telemetry: bool) -> i32 {
    let Some(mission) = Mission::from_name(name) else {
        error!("unknown mission '{}'", name);
        return EXIT_FAILED;
    };
    let entry = match entry(mission, params) {
        Ok(entry) => entry,
        Err(e) => {
            error!("mission '{}': {:?}", name, e);
            return EXIT_FAILED;
        }
    };

    let robot = SimRobot::new(config.geometry);
    let mut sink = LogSink;
    let sink = telemetry.then_some(&mut sink);

    info!("running '{}' with params {:?}", name, params);
    match start_supervisor(&robot, &entry, sink, config.supervisor).await {
        RunOutcome::Completed => {
            info!("'{}' completed", name);
            EXIT_OK
        }
        outcome => {
            warn!("'{}' ended: {:?}", name, outcome);
            EXIT_FAILED
        }
    }
}

async fn run_selector(spawner: Spawner, config: SimConfig, dev: bool) -> i32 {
    let registry = match default_registry() {
        Ok(registry) => registry,
        Err(e) => {
            error!("menu: {:?}", e);
            return EXIT_FAILED;
        }
    };

    let hub: &'static SimHub =
        HUB.init(SimHub::new(Duration::from_millis(config.hub.press_ms as u64)));
    let robot = SimRobot::new(config.geometry);

    let mut selector_config = config.selector;
    selector_config.telemetry_enabled |= dev;

    let mut selector = match Selector::new(
        &robot,
        hub,
        &registry,
        LogSink,
        selector_config,
        config.supervisor,
    ) {
        Ok(selector) => selector,
        Err(e) => {
            error!("selector: {:?}", e);
            return EXIT_FAILED;
        }
    };

    if let Err(e) = console::spawn_reader() {
        error!("console: {}", e);
        return EXIT_FAILED;
    }
    if let Err(e) = spawner.spawn(console::console_task(hub)) {
        error!("console task: {:?}", e);
        return EXIT_FAILED;
    }

    match select(selector.run(), SHUTDOWN.wait()).await {
        Either::First(()) => EXIT_FAILED,
        Either::Second(()) => {
            // Leave the robot stopped
            robot.halt();
            info!("bye");
            EXIT_OK
        }
    }
}
