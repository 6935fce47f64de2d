//! # Gatecrash
//!
//! Anti-bot blocking detection and human-motion challenge solving for
//! stealth browser automation.
//!
//! Gatecrash judges whether a page load was challenged or denied by an
//! anti-bot system, and drives physically plausible pointer motion to defeat
//! behavioral detectors and slider-style challenge widgets. The browser
//! engine itself is a collaborator reached through two narrow async traits;
//! gatecrash never fetches or renders anything on its own.
//!
//! ## Detection
//!
//! Five independent signal checkers (HTTP status, response headers, page
//! content, DOM structure, redirect target) each return a partial verdict;
//! the engine fuses them commutatively — blocked if any checker asserts it,
//! confidence is the maximum across asserting checkers, reasons accumulate.
//!
//! ```rust,no_run
//! use gatecrash::{detect, DocumentHandle, PointerInput, ResponseSnapshot};
//! use gatecrash::{Randomness, SliderSolver};
//!
//! # async fn example(
//! #     response: ResponseSnapshot,
//! #     doc: &dyn DocumentHandle,
//! #     input: &dyn PointerInput,
//! # ) {
//! let verdict = detect(&response, doc).await;
//!
//! if verdict.has_slider_challenge() {
//!     let mut rng = Randomness::from_entropy();
//!     let attempt = SliderSolver::new().solve(doc, input, &mut rng).await;
//!     if attempt.passed() {
//!         // resume content extraction
//!     }
//! } else if verdict.is_blocked {
//!     // discard the session; confidence and reasons say why
//! }
//! # }
//! ```
//!
//! ## Motion synthesis
//!
//! Drag gestures follow a three-phase accelerate/cruise/brake profile with
//! per-sample jitter, generated from a single seedable randomness source so
//! tests can pin a seed without disabling the jitter.
//!
//! ## Concurrency model
//!
//! Everything here is stateless aside from per-call parameters. One detection
//! or solve at a time per page, enforced by the caller; waits are cooperative
//! `tokio` sleeps, so concurrent sessions on other pages are unaffected.

pub mod actuator;
pub mod artifacts;
pub mod behavior;
pub mod browser;
pub mod detect;
pub mod error;
pub mod locator;
pub mod motion;
pub mod rng;
pub mod solver;

// Re-exports
pub use actuator::PointerActuator;
pub use artifacts::ArtifactWriter;
pub use browser::{BoundingBox, DocumentHandle, PointerInput, ResponseSnapshot};
pub use detect::{detect, Evidence, PartialVerdict, Verdict, WidgetFindings};
pub use error::{Error, Result};
pub use locator::{find as find_challenge, ChallengeTarget};
pub use motion::{generate as generate_motion, MotionCurve, MotionSample};
pub use rng::Randomness;
pub use solver::{SliderSolver, SolveAttempt, SolveOutcome, SolverConfig};
