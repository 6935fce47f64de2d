//! Redirect target signal checker
//!
//! Compares the URL the navigation was issued for against where the page
//! actually landed. Redirection alone is recorded as evidence; it only blocks
//! when the destination matches a challenge, login, or error pattern.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Evidence, PartialVerdict};

static CHALLENGE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)verify|captcha|challenge|security|blocked|denied").unwrap());
static LOGIN_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)登录|login").unwrap());
static ERROR_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)error|错误").unwrap());

/// Ordered: the first matching pattern decides
static SUSPICIOUS_PATTERNS: &[&Lazy<Regex>] = &[&CHALLENGE_URL, &LOGIN_URL, &ERROR_URL];

const REDIRECT_CONFIDENCE: f64 = 0.8;

/// Judge the requested-vs-final URL pair
///
/// `final_url` is `None` when the document's URL could not be read; that
/// degrades to evidence-only.
pub fn check(request_url: &str, final_url: Option<&str>) -> PartialVerdict {
    let was_redirected = final_url.is_some_and(|f| f != request_url);

    let mut partial = PartialVerdict::clean(Evidence::Redirect {
        request_url: request_url.to_string(),
        final_url: final_url.map(str::to_string),
        was_redirected,
    });

    if !was_redirected {
        return partial;
    }
    let destination = final_url.unwrap_or_default();

    for pattern in SUSPICIOUS_PATTERNS {
        if pattern.is_match(destination) {
            partial.assert_blocked(
                REDIRECT_CONFIDENCE,
                format!("redirected to suspicious page: {destination}"),
            );
            break;
        }
    }

    partial
}
