//! M09 and M07 run
//!
//! Ends with two lift moves that are started without waiting; the second
//! command replaces the first if it is still running.

use kairos_core::program::{MotionContext, ProgramFault};
use kairos_core::traits::{MotorPort, Robot};
use log::info;

pub(super) async fn run<R: Robot>(ctx: MotionContext<'_, R>) -> Result<(), ProgramFault> {
    ctx.straight(100).await?;
    ctx.turn(-40).await?;
    ctx.straight(480).await?;
    ctx.straight(-180).await?;
    ctx.straight(120).await?;
    ctx.turn(-33).await?;
    ctx.straight(-200).await?;
    ctx.turn(33).await?;
    ctx.straight(390).await?;

    ctx.pause(500).await;
    ctx.start_run_angle(MotorPort::RightLift, 700, -500)?;
    ctx.pause(1000).await;
    ctx.start_run_angle(MotorPort::RightLift, 1000, 700)?;
    ctx.stop();

    info!("# m09 done");
    Ok(())
}
