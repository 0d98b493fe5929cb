//! Command line

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Kairos robot simulator
///
/// Runs the mission menu or a single mission against the simulated hub.
#[derive(Debug, Parser)]
#[command(name = "kairos-sim")]
#[command(about = "Host simulator for the Kairos competition robot", long_about = None)]
#[command(version)]
pub struct Args {
    /// Configuration file replacing the embedded robot.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Menu over the default missions (the default)
    Select {
        /// Stream telemetry during runs
        #[arg(long)]
        dev: bool,
    },

    /// Run one mission once under the supervisor
    Run {
        /// Mission name, see `list`
        mission: String,

        /// Mission parameters
        #[arg(allow_negative_numbers = true)]
        params: Vec<i32>,

        /// Run without telemetry
        #[arg(long)]
        no_telemetry: bool,
    },

    /// Print the missions
    List,
}

impl Args {
    /// The subcommand, `select` when none was given
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Select { dev: false })
    }
}
