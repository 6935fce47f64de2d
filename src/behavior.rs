//! Ambient behavior simulation
//!
//! Aimless activity between real actions: think-time pauses and idle mouse
//! wander across the viewport. Behavioral detectors score sessions that only
//! ever move the pointer with purpose, so hosts sprinkle these between
//! navigations and extractions.

use tokio::time::sleep;

use crate::browser::PointerInput;
use crate::error::Result;
use crate::rng::Randomness;

/// Viewport region the wander stays inside
const WANDER_X: (f64, f64) = (100.0, 900.0);
const WANDER_Y: (f64, f64) = (100.0, 700.0);

/// Pause as if thinking or reading
pub async fn think_pause(rng: &mut Randomness, min_ms: u64, max_ms: u64) {
    sleep(rng.delay_ms(min_ms, max_ms)).await;
}

/// Drift the pointer to a few random viewport positions
///
/// Each hop is interpolated by the host (10-30 steps) and followed by a
/// short pause, like a reader idly moving the mouse.
pub async fn wander(input: &dyn PointerInput, rng: &mut Randomness, moves: usize) -> Result<()> {
    for _ in 0..moves {
        let x = rng.range_f64(WANDER_X.0, WANDER_X.1);
        let y = rng.range_f64(WANDER_Y.0, WANDER_Y.1);
        let steps = rng.range_u64(10, 30) as u32;

        input.move_to(x, y, Some(steps)).await?;
        think_pause(rng, 200, 800).await;
    }
    Ok(())
}

/// Composite humanization beat: pause, wander a little, pause again
pub async fn linger(input: &dyn PointerInput, rng: &mut Randomness) -> Result<()> {
    think_pause(rng, 1000, 2500).await;
    wander(input, rng, 2).await?;
    think_pause(rng, 500, 1500).await;
    Ok(())
}
