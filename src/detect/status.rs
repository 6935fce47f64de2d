//! HTTP status signal checker

use super::{Evidence, PartialVerdict};

/// Judge the HTTP status code of a navigation response
///
/// 301/302 contribute informational evidence only: a redirect alone is not
/// proof of blocking, the redirect checker judges the destination.
pub fn check(status: u16) -> PartialVerdict {
    let mut partial = PartialVerdict::clean(Evidence::Status {
        code: status,
        informational_redirect: matches!(status, 301 | 302),
    });

    match status {
        429 => partial.assert_blocked(1.0, "HTTP 429 Too Many Requests - rate limited"),
        403 => partial.assert_blocked(0.9, "HTTP 403 Forbidden - access denied"),
        401 => partial.assert_blocked(0.7, "HTTP 401 Unauthorized - authentication required"),
        s if s >= 500 => {
            partial.assert_blocked(0.5, format!("HTTP {s} server error"));
        }
        301 | 302 => {
            // Recorded for the fused evidence; never merged without blocking.
            partial.confidence = 0.3;
        }
        _ => {}
    }

    partial
}
