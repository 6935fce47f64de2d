//! Response header signal checker

use std::collections::HashMap;

use super::{Evidence, PartialVerdict};

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";
const CDN_TRACE: &str = "cf-ray";
const CDN_MITIGATED: &str = "cf-mitigated";
const SERVER: &str = "server";
const CAPTCHA_SERVER: &str = "CloudflareCAPTCHA";

/// Judge the response headers of a navigation
///
/// Keys are matched case-sensitively as observed; a missing header never
/// triggers anything.
pub fn check(headers: &HashMap<String, String>) -> PartialVerdict {
    let mut triggers = Vec::new();
    let mut rate_limit_reset = None;
    let mut findings: Vec<(f64, String)> = Vec::new();

    if headers.get(RATE_LIMIT_REMAINING).map(String::as_str) == Some("0") {
        triggers.push(RATE_LIMIT_REMAINING.to_string());
        rate_limit_reset = headers.get(RATE_LIMIT_RESET).cloned();
        findings.push((0.95, "rate limit exhausted".to_string()));
    }

    if headers.contains_key(CDN_TRACE) && headers.contains_key(CDN_MITIGATED) {
        triggers.push(CDN_MITIGATED.to_string());
        findings.push((0.9, "CDN mitigation active".to_string()));
    }

    if headers
        .get(SERVER)
        .is_some_and(|v| v.contains(CAPTCHA_SERVER))
    {
        triggers.push(SERVER.to_string());
        findings.push((1.0, "CAPTCHA server identified".to_string()));
    }

    let mut partial = PartialVerdict::clean(Evidence::Headers {
        triggers,
        rate_limit_reset,
    });
    for (confidence, reason) in findings {
        partial.assert_blocked(confidence, reason);
    }
    partial
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn exhausted_rate_limit_triggers() {
        let p = check(&headers(&[
            ("x-ratelimit-remaining", "0"),
            ("x-ratelimit-reset", "1716200000"),
        ]));
        assert!(p.blocked);
        assert_eq!(p.confidence, 0.95);
        assert!(matches!(
            p.evidence,
            Evidence::Headers { ref rate_limit_reset, .. }
                if rate_limit_reset.as_deref() == Some("1716200000")
        ));
    }

    #[test]
    fn remaining_quota_does_not_trigger() {
        let p = check(&headers(&[("x-ratelimit-remaining", "42")]));
        assert!(!p.blocked);
    }

    #[test]
    fn cdn_mitigation_needs_both_markers() {
        assert!(!check(&headers(&[("cf-ray", "8f1a2b")])).blocked);
        let p = check(&headers(&[("cf-ray", "8f1a2b"), ("cf-mitigated", "challenge")]));
        assert!(p.blocked);
        assert_eq!(p.confidence, 0.9);
    }

    #[test]
    fn captcha_server_is_certain() {
        let p = check(&headers(&[("server", "CloudflareCAPTCHA")]));
        assert!(p.blocked);
        assert_eq!(p.confidence, 1.0);
    }

    #[test]
    fn empty_headers_are_clean() {
        let p = check(&HashMap::new());
        assert!(!p.blocked);
        assert_eq!(p.confidence, 0.0);
        assert!(p.reasons.is_empty());
    }
}
