//! M08 run
//!
//! The right wheel push at the model can catch on the frame and never
//! finish, so it runs under a watchdog and the script carries on either way.

use kairos_core::config::WatchdogConfig;
use kairos_core::program::{MotionContext, ProgramFault};
use kairos_core::traits::{DriveBase, MotorPort, Robot};
use log::info;

const WHEEL_PUSH: WatchdogConfig = WatchdogConfig::with_limit(1500);

pub(super) async fn run<R: Robot>(ctx: MotionContext<'_, R>) -> Result<(), ProgramFault> {
    let cruise = ctx.drive().current_settings();

    ctx.straight(450).await?;
    ctx.run_angle(MotorPort::RightLift, 500, -1100).await?;
    ctx.turn(-5).await?;
    ctx.straight(250).await?;
    ctx.turn(-45).await?;
    ctx.straight(30).await?;

    ctx.guarded_run_angle(MotorPort::RightWheel, 200, 180, WHEEL_PUSH)
        .await?;

    ctx.turn(60).await?;

    // Full speed back to base
    ctx.settings(cruise.with_straight_speed(500));
    ctx.straight(-700).await?;
    ctx.settings(cruise.with_straight_speed(200));
    ctx.stop();

    info!("# m08 done");
    Ok(())
}
