//! Slider Challenge Solver
//!
//! Orchestrates one solve attempt: locate the widget, estimate the drag
//! distance, synthesize a motion curve, replay it through the pointer
//! actuator, then verify the outcome after a settle window. Every fault is
//! converted to a `Failed` outcome at this boundary; callers own retry
//! policy and may simply invoke the whole state machine again.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::actuator::PointerActuator;
use crate::browser::{DocumentHandle, PointerInput};
use crate::locator::{self, ChallengeTarget};
use crate::motion::{self, MotionSample};
use crate::rng::Randomness;

/// Challenge container; its absence after the drag counts as success
const CONTAINER_SELECTOR: &str = "#tcaptcha_iframe, .tc-captcha";
/// Explicit success marker
const SUCCESS_SELECTOR: &str = ".tc-jpp-success, [class*=\"success\"]";
/// Explicit failure marker
const ERROR_SELECTOR: &str = ".tc-jpp-error, [class*=\"error\"]";

/// Tunables for a solve attempt
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Drag distance as a fraction of track width, drawn uniformly
    ///
    /// The true gap position is unobservable without image analysis, so the
    /// solver samples a plausible range instead of guessing exactly. This is
    /// a deliberate, documented approximation.
    pub distance_fraction: (f64, f64),
    /// How long to wait after the drag before inspecting outcome markers
    pub settle: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            distance_fraction: (0.65, 0.80),
            settle: Duration::from_secs(2),
        }
    }
}

/// Outcome of one solve attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Attempt created but not yet verified
    Pending,
    /// Challenge accepted the drag
    Passed,
    /// Challenge rejected the drag, or the attempt faulted
    Failed { reason: String },
}

/// Trace of one solve attempt, returned to the caller
#[derive(Debug, Clone)]
pub struct SolveAttempt {
    /// Distance the drag aimed for, px
    pub estimated_distance: f64,
    /// The synthesized motion curve that was replayed
    pub samples: Vec<MotionSample>,
    /// Terminal outcome
    pub outcome: SolveOutcome,
}

impl SolveAttempt {
    fn failed(reason: impl Into<String>) -> Self {
        Self {
            estimated_distance: 0.0,
            samples: Vec::new(),
            outcome: SolveOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    /// Whether the challenge was passed
    pub fn passed(&self) -> bool {
        self.outcome == SolveOutcome::Passed
    }
}

/// One-shot slider challenge solver
///
/// Stateless between attempts; a single instance can serve any number of
/// sequential solve calls.
#[derive(Debug, Clone, Default)]
pub struct SliderSolver {
    config: SolverConfig,
}

impl SliderSolver {
    /// Solver with default tunables
    pub fn new() -> Self {
        Self::default()
    }

    /// Solver with custom tunables
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Run one solve attempt against the document
    ///
    /// Never returns an error: location failures, actuation faults, and
    /// ambiguous verification all land in `SolveOutcome::Failed`.
    pub async fn solve(
        &self,
        doc: &dyn DocumentHandle,
        input: &dyn PointerInput,
        rng: &mut Randomness,
    ) -> SolveAttempt {
        let Some(target) = locator::find(doc).await else {
            debug!("no slider fingerprint present");
            return SolveAttempt::failed("challenge not found");
        };

        let (lo, hi) = self.config.distance_fraction;
        let distance = (target.track_width * rng.range_f64(lo, hi)).floor();
        debug!(
            track_width = target.track_width,
            distance, "estimated drag distance"
        );

        let curve = motion::generate(rng, distance);
        let mut attempt = SolveAttempt {
            estimated_distance: distance,
            samples: curve.to_vec(),
            outcome: SolveOutcome::Pending,
        };

        if let Err(e) = self.drag(input, rng, &target, &attempt.samples).await {
            warn!(error = %e, "drag actuation failed");
            attempt.outcome = SolveOutcome::Failed {
                reason: format!("actuation failed: {e}"),
            };
            return attempt;
        }

        sleep(self.config.settle).await;
        attempt.outcome = self.verify(doc).await;
        info!(passed = attempt.passed(), distance, "solve attempt finished");
        attempt
    }

    async fn drag(
        &self,
        input: &dyn PointerInput,
        rng: &mut Randomness,
        target: &ChallengeTarget,
        samples: &[MotionSample],
    ) -> crate::error::Result<()> {
        let actuator = PointerActuator::new(input);
        actuator.drag(rng, target.handle.center(), samples).await
    }

    /// Inspect outcome markers, in priority order
    ///
    /// Success marker wins, then the error marker, then a still-present
    /// container; a vanished container counts as success. Anything the
    /// document refuses to answer is conservatively a failure.
    async fn verify(&self, doc: &dyn DocumentHandle) -> SolveOutcome {
        match doc.is_present(SUCCESS_SELECTOR).await {
            Ok(true) => return SolveOutcome::Passed,
            Ok(false) => {}
            Err(e) => {
                return SolveOutcome::Failed {
                    reason: format!("verification unavailable: {e}"),
                }
            }
        }

        match doc.is_present(ERROR_SELECTOR).await {
            Ok(true) => {
                return SolveOutcome::Failed {
                    reason: "challenge reported error".to_string(),
                }
            }
            Ok(false) => {}
            Err(e) => {
                return SolveOutcome::Failed {
                    reason: format!("verification unavailable: {e}"),
                }
            }
        }

        match doc.is_present(CONTAINER_SELECTOR).await {
            Ok(true) => SolveOutcome::Failed {
                reason: "challenge still present".to_string(),
            },
            Ok(false) => SolveOutcome::Passed,
            Err(e) => SolveOutcome::Failed {
                reason: format!("verification unavailable: {e}"),
            },
        }
    }
}
