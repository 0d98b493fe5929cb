//! Parametrized back-and-forth run, used for calibration

use kairos_core::program::{MotionContext, ProgramFault};
use kairos_core::traits::Robot;

/// Upper bound on repetitions
const MAX_REPS: i32 = 20;

pub(super) async fn run<R: Robot>(ctx: MotionContext<'_, R>) -> Result<(), ProgramFault> {
    let distance = ctx.param(0)?;
    let reps = ctx.param(1)?;
    if distance == 0 || !(1..=MAX_REPS).contains(&reps) {
        return Err(ProgramFault::InvalidParameters);
    }

    for _ in 0..reps {
        ctx.straight(distance).await?;
        ctx.straight(-distance).await?;
    }
    ctx.stop();
    Ok(())
}
