//! Mission definitions

mod curve;
mod m08;
mod m09;
mod sample;
mod shuttle;

use kairos_core::program::{MotionContext, MotionProgram, ProgramFault};
use kairos_core::traits::Robot;

/// Every mission the robot knows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mission {
    /// Lift warm-up run
    Sample,
    /// M08, with the M06/M05 approach
    M08,
    /// M09 and M07
    M09,
    /// Arc approach under a watchdog
    Curve,
    /// Back and forth; params: distance (mm), repetitions
    Shuttle,
}

impl Mission {
    pub const ALL: [Mission; 5] = [
        Mission::Sample,
        Mission::M08,
        Mission::M09,
        Mission::Curve,
        Mission::Shuttle,
    ];

    /// Menu name
    pub fn name(&self) -> &'static str {
        match self {
            Mission::Sample => "sample",
            Mission::M08 => "m08",
            Mission::M09 => "m09",
            Mission::Curve => "curve",
            Mission::Shuttle => "shuttle",
        }
    }

    /// Look up a mission by menu name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl<R: Robot> MotionProgram<R> for Mission {
    async fn execute(&self, ctx: MotionContext<'_, R>) -> Result<(), ProgramFault> {
        match self {
            Mission::Sample => sample::run(ctx).await,
            Mission::M08 => m08::run(ctx).await,
            Mission::M09 => m09::run(ctx).await,
            Mission::Curve => curve::run(ctx).await,
            Mission::Shuttle => shuttle::run(ctx).await,
        }
    }
}
