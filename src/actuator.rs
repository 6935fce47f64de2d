//! Pointer Actuator
//!
//! Replays a motion curve as timed pointer events against the host's
//! input-injection capability. This is the only component that touches
//! [`PointerInput`]; everything above it deals in curves and outcomes.

use tokio::time::sleep;
use tracing::debug;

use crate::browser::PointerInput;
use crate::error::Result;
use crate::motion::MotionSample;
use crate::rng::Randomness;

/// Vertical wobble applied to every move event, ± px
const VERTICAL_JITTER: f64 = 1.0;

/// Replays motion curves through a [`PointerInput`]
pub struct PointerActuator<'a> {
    input: &'a dyn PointerInput,
}

impl<'a> PointerActuator<'a> {
    /// Create an actuator over the host's pointer capability
    pub fn new(input: &'a dyn PointerInput) -> Self {
        Self { input }
    }

    /// Drag from `start` along the curve
    ///
    /// Approaches the start point, settles, presses, replays every sample at
    /// its recorded time offset with a little vertical wobble, then releases.
    /// All delays are drawn fresh per invocation so repeated drags do not
    /// share a timing signature.
    pub async fn drag(
        &self,
        rng: &mut Randomness,
        start: (f64, f64),
        samples: &[MotionSample],
    ) -> Result<()> {
        let (start_x, start_y) = start;
        debug!(start_x, start_y, samples = samples.len(), "starting drag");

        let approach_steps = rng.range_u64(10, 30) as u32;
        self.input
            .move_to(start_x, start_y, Some(approach_steps))
            .await?;
        sleep(rng.delay_ms(100, 200)).await;

        self.input.press(start_x, start_y).await?;
        sleep(rng.delay_ms(50, 100)).await;

        let mut last_elapsed = 0;
        let mut end_x = start_x;
        for sample in samples {
            let gap = sample.elapsed_ms.saturating_sub(last_elapsed);
            if gap > 0 {
                sleep(std::time::Duration::from_millis(gap)).await;
            }
            last_elapsed = sample.elapsed_ms;

            end_x = start_x + sample.displacement;
            let wobble_y = start_y + rng.jitter(VERTICAL_JITTER);
            self.input.move_to(end_x, wobble_y, None).await?;
        }

        sleep(rng.delay_ms(50, 150)).await;
        self.input.release(end_x, start_y).await?;

        debug!(end_x, "drag complete");
        Ok(())
    }
}
