//! Blocking Detection Engine
//!
//! Five independent signal checkers (status, headers, content, DOM, redirect)
//! each judge one observable facet of a page load and return a
//! [`PartialVerdict`]. The engine fuses them with a commutative reducer:
//! blocked if any checker asserted blocking, confidence is the maximum across
//! asserting checkers (never averaged, so one strong signal is not diluted),
//! reasons are concatenated, and every checker's evidence is kept.

pub mod content;
pub mod dom;
pub mod headers;
pub mod redirect;
pub mod status;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::browser::{DocumentHandle, ResponseSnapshot};

pub use dom::WidgetFindings;

/// Structured per-checker evidence
///
/// One tagged variant per signal category instead of an open string-keyed
/// blob, so downstream policy can match exhaustively.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Evidence {
    /// HTTP status facet
    Status {
        code: u16,
        /// 301/302 observed; informational only, never blocks by itself
        informational_redirect: bool,
    },
    /// Response header facet
    Headers {
        /// Names of the header triggers that fired
        triggers: Vec<String>,
        /// Value of the rate-limit reset header, when present
        rate_limit_reset: Option<String>,
    },
    /// Rendered body text facet
    Content {
        text_length: Option<usize>,
        /// Labels of the blocklist phrases that matched
        matched: Vec<String>,
        /// Extraction failure note (no confidence contribution)
        error: Option<String>,
    },
    /// DOM structure facet
    Dom {
        findings: WidgetFindings,
        /// Probe failure note (no confidence contribution)
        error: Option<String>,
    },
    /// Redirect facet
    Redirect {
        request_url: String,
        final_url: Option<String>,
        was_redirected: bool,
    },
}

/// One checker's scoped judgment, owned by its producer until merged
#[derive(Debug, Clone)]
pub struct PartialVerdict {
    /// Whether this checker asserts the session was blocked
    pub blocked: bool,
    /// Confidence in [0, 1]; only merged when `blocked` is set
    pub confidence: f64,
    /// Human-readable findings
    pub reasons: Vec<String>,
    /// Structured detail for this checker's category
    pub evidence: Evidence,
}

impl PartialVerdict {
    /// A non-asserting verdict carrying only evidence
    pub fn clean(evidence: Evidence) -> Self {
        Self {
            blocked: false,
            confidence: 0.0,
            reasons: Vec::new(),
            evidence,
        }
    }

    /// Assert blocking with a confidence and reason
    ///
    /// Confidence is monotonic: repeated assertions keep the maximum.
    pub fn assert_blocked(&mut self, confidence: f64, reason: impl Into<String>) {
        self.blocked = true;
        self.confidence = self.confidence.max(confidence);
        self.reasons.push(reason.into());
    }
}

/// Fused judgment for one navigation
///
/// Immutable once produced. `confidence` is the maximum over the checkers
/// that asserted blocking; a checker never unsets another's positive finding.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub is_blocked: bool,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub evidence: Vec<Evidence>,
}

impl Verdict {
    /// Fuse partial verdicts; commutative and associative
    pub fn merge(partials: impl IntoIterator<Item = PartialVerdict>) -> Self {
        let mut verdict = Self {
            is_blocked: false,
            confidence: 0.0,
            reasons: Vec::new(),
            evidence: Vec::new(),
        };

        for partial in partials {
            if partial.blocked {
                verdict.is_blocked = true;
                verdict.confidence = verdict.confidence.max(partial.confidence);
                verdict.reasons.extend(partial.reasons);
            }
            verdict.evidence.push(partial.evidence);
        }

        verdict
    }

    /// DOM widget findings, when the DOM checker ran
    pub fn widget_findings(&self) -> Option<&WidgetFindings> {
        self.evidence.iter().find_map(|e| match e {
            Evidence::Dom { findings, .. } => Some(findings),
            _ => None,
        })
    }

    /// Whether a slider-style challenge widget was found
    ///
    /// Routing policy: only slider fingerprints are worth handing to the
    /// slider solver; a reCAPTCHA finding is not.
    pub fn has_slider_challenge(&self) -> bool {
        self.widget_findings()
            .map(WidgetFindings::any_slider)
            .unwrap_or(false)
    }
}

/// Run all five signal checkers against a navigation and fuse the results
///
/// Checker order does not affect the outcome. Checkers that cannot read their
/// target degrade to evidence-only partials rather than failing the verdict.
pub async fn detect(response: &ResponseSnapshot, doc: &dyn DocumentHandle) -> Verdict {
    let status = status::check(response.status);
    let headers = headers::check(&response.headers);

    let content = match doc.body_text().await {
        Ok(text) => content::check(&text),
        Err(e) => {
            warn!(error = %e, "body text unavailable, content signal degraded");
            content::unavailable(e.to_string())
        }
    };

    let dom = dom::check(doc).await;

    let final_url = match doc.current_url().await {
        Ok(url) => Some(url),
        Err(e) => {
            warn!(error = %e, "final URL unavailable, redirect signal degraded");
            None
        }
    };
    let redirect = redirect::check(&response.request_url, final_url.as_deref());

    for partial in [&status, &headers, &content, &dom, &redirect] {
        if partial.blocked {
            debug!(
                confidence = partial.confidence,
                reasons = ?partial.reasons,
                "checker asserted blocking"
            );
        }
    }

    let verdict = Verdict::merge([status, headers, content, dom, redirect]);
    info!(
        blocked = verdict.is_blocked,
        confidence = verdict.confidence,
        url = %response.request_url,
        "detection verdict"
    );
    verdict
}
