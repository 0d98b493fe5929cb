//! Arc approach
//!
//! The arc coasts into the model and may be blocked before it completes;
//! the drive base is stopped after the watchdog either way.

use kairos_core::config::WatchdogConfig;
use kairos_core::program::{MotionContext, ProgramFault};
use kairos_core::traits::{Robot, StopMode};

const ARC: WatchdogConfig = WatchdogConfig::with_limit(3000);

pub(super) async fn run<R: Robot>(ctx: MotionContext<'_, R>) -> Result<(), ProgramFault> {
    ctx.straight(350).await?;
    ctx.straight(-130).await?;

    ctx.guarded_curve(850, 10, StopMode::Coast, ARC).await?;
    ctx.stop();

    ctx.straight(-450).await?;
    Ok(())
}
