//! Lift warm-up: drive out, pulse the right lift three times, park

use kairos_core::config::DriveSettings;
use kairos_core::program::{MotionContext, ProgramFault};
use kairos_core::traits::{MotorPort, Robot};

const LIFT_PULSES: usize = 3;

pub(super) async fn run<R: Robot>(ctx: MotionContext<'_, R>) -> Result<(), ProgramFault> {
    ctx.settings(DriveSettings::new(400, 240));
    ctx.straight(450).await?;

    for _ in 0..LIFT_PULSES {
        ctx.run_angle(MotorPort::RightLift, 500, -360).await?;
        ctx.pause(100).await;
    }

    ctx.straight(240).await?;
    ctx.turn(-50).await?;
    ctx.straight(80).await?;
    Ok(())
}
