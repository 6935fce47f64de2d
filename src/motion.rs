//! Human Motion Curve Generator
//!
//! Produces the timed 1-D displacement samples a real drag gesture would
//! leave behind: accelerate for the first quarter of the gesture, cruise
//! through the middle half, brake over the final quarter, with per-sample
//! jitter so the trace is not perfectly smooth.

use smallvec::SmallVec;

use crate::rng::Randomness;

/// Integration step (20 ms)
const STEP_S: f64 = 0.02;
const STEP_MS: u64 = 20;
/// Per-sample displacement jitter, ± px
const DISPLACEMENT_JITTER: f64 = 0.25;
/// Total gesture duration range, seconds
const MIN_DURATION_S: f64 = 0.8;
const MAX_DURATION_S: f64 = 1.4;
/// Phase boundaries as fractions of elapsed time
const ACCEL_END: f64 = 0.25;
const DECEL_START: f64 = 0.75;

/// One timed point along a drag gesture
///
/// Displacement is cumulative from the drag origin, non-decreasing, and the
/// last sample of a curve lands exactly on the target distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    /// Cumulative displacement from the origin, px
    pub displacement: f64,
    /// Instantaneous velocity, px/s, never negative
    pub velocity: f64,
    /// Time since the gesture started, ms, strictly increasing
    pub elapsed_ms: u64,
}

/// Stack-allocated storage for a typical curve (40-70 samples)
pub type MotionCurve = SmallVec<[MotionSample; 96]>;

/// Generate a drag curve covering `target_distance` px
///
/// The duration is drawn from [0.8 s, 1.4 s] and the acceleration magnitudes
/// are sized from distance and duration so the three-phase profile actually
/// lands on target inside that window; velocity is clamped at zero so the
/// braking phase cannot reverse. An exact terminal sample at
/// `(target_distance, 0, total_ms)` is always appended, so the curve ends on
/// target regardless of jitter or integration drift.
pub fn generate(rng: &mut Randomness, target_distance: f64) -> MotionCurve {
    let total_s = rng.range_f64(MIN_DURATION_S, MAX_DURATION_S);
    let total_ms = (total_s * 1000.0).round() as u64;

    let mut curve = MotionCurve::new();
    curve.push(MotionSample {
        displacement: 0.0,
        velocity: 0.0,
        elapsed_ms: 0,
    });

    if target_distance > 0.0 {
        // Trapezoidal profile: area under v(t) must equal the distance, so
        // the cruise velocity is d / 0.75T and both ramps take a quarter of
        // the duration.
        let cruise_velocity = target_distance / (DECEL_START * total_s);
        let ramp = cruise_velocity / (ACCEL_END * total_s);

        let mut t = 0.0_f64;
        let mut position = 0.0_f64;
        let mut velocity = 0.0_f64;
        let mut reported = 0.0_f64;

        // Hard stop slightly past the drawn duration; the exact terminal
        // sample below covers any residual gap.
        while position < target_distance && t < total_s + 0.2 {
            let progress = t / total_s;
            let accel = if progress < ACCEL_END {
                ramp
            } else if progress < DECEL_START {
                0.0
            } else {
                -ramp
            };

            // Braked to a stop short of the target: integration error, the
            // terminal sample below closes the gap.
            if progress >= DECEL_START && velocity <= 0.0 {
                break;
            }

            let step = velocity * STEP_S + 0.5 * accel * STEP_S * STEP_S;
            position += step.max(0.0);
            velocity = (velocity + accel * STEP_S).max(0.0);
            t += STEP_S;

            let jittered = position + rng.jitter(DISPLACEMENT_JITTER);
            reported = jittered.clamp(reported, target_distance);

            curve.push(MotionSample {
                displacement: reported,
                velocity,
                elapsed_ms: (t * 1000.0).round() as u64,
            });
        }
    }

    let last_elapsed = curve.last().map(|s| s.elapsed_ms).unwrap_or(0);
    curve.push(MotionSample {
        displacement: target_distance.max(0.0),
        velocity: 0.0,
        elapsed_ms: total_ms.max(last_elapsed + STEP_MS),
    });

    curve
}
