//! Page content signal checker
//!
//! Scans the rendered body text against localized blocklist phrases. Short
//! pages (< 100 chars) are presumptively error or challenge pages and get a
//! floor confidence even when no phrase matches.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Evidence, PartialVerdict};

/// Pages with less text than this are treated as probable challenge pages
const MIN_CONTENT_LENGTH: usize = 100;
const SHORT_CONTENT_CONFIDENCE: f64 = 0.6;

struct BlockPattern {
    pattern: &'static Lazy<Regex>,
    confidence: f64,
    label: &'static str,
}

macro_rules! block_pattern {
    ($name:ident, $re:literal) => {
        static $name: Lazy<Regex> = Lazy::new(|| Regex::new($re).unwrap());
    };
}

block_pattern!(SECURITY_CHECK, r"(?i)安全验证|安全检测|security\s*check");
block_pattern!(VERIFICATION, r"(?i)请完成验证|complete.*verification");
block_pattern!(ACCESS_DENIED, r"(?i)访问被限制|access.*denied|访问拒绝");
block_pattern!(IP_BLOCKED, r"(?i)IP.*封禁|IP.*blocked");
block_pattern!(RATE_LIMITED, r"(?i)访问频率.*过高|too\s*many\s*requests");
block_pattern!(BOT_DETECTED, r"(?i)robot|bot.*detected");
block_pattern!(CLOUDFLARE, r"(?i)cloudflare");

static BLOCK_PATTERNS: &[BlockPattern] = &[
    BlockPattern {
        pattern: &SECURITY_CHECK,
        confidence: 0.9,
        label: "security verification",
    },
    BlockPattern {
        pattern: &VERIFICATION,
        confidence: 0.95,
        label: "verification request",
    },
    BlockPattern {
        pattern: &ACCESS_DENIED,
        confidence: 0.85,
        label: "access denied",
    },
    BlockPattern {
        pattern: &IP_BLOCKED,
        confidence: 0.95,
        label: "IP blocked",
    },
    BlockPattern {
        pattern: &RATE_LIMITED,
        confidence: 0.9,
        label: "rate limited",
    },
    BlockPattern {
        pattern: &BOT_DETECTED,
        confidence: 0.7,
        label: "bot detected",
    },
    BlockPattern {
        pattern: &CLOUDFLARE,
        confidence: 0.6,
        label: "cloudflare page",
    },
];

/// Judge the extracted body text
///
/// Every matching phrase contributes a reason; confidence is the maximum
/// among matches and the short-content floor.
pub fn check(body_text: &str) -> PartialVerdict {
    let text_length = body_text.chars().count();
    let mut matched = Vec::new();
    let mut findings: Vec<(f64, String)> = Vec::new();

    for bp in BLOCK_PATTERNS {
        if bp.pattern.is_match(body_text) {
            matched.push(bp.label.to_string());
            findings.push((bp.confidence, format!("blocklist phrase: {}", bp.label)));
        }
    }

    if text_length < MIN_CONTENT_LENGTH {
        findings.push((
            SHORT_CONTENT_CONFIDENCE,
            format!("content too short ({text_length} chars)"),
        ));
    }

    let mut partial = PartialVerdict::clean(Evidence::Content {
        text_length: Some(text_length),
        matched,
        error: None,
    });
    for (confidence, reason) in findings {
        partial.assert_blocked(confidence, reason);
    }
    partial
}

/// Degraded verdict for when text extraction itself failed
///
/// Records the failure as evidence without contributing confidence.
pub fn unavailable(error: String) -> PartialVerdict {
    PartialVerdict::clean(Evidence::Content {
        text_length: None,
        matched: Vec::new(),
        error: Some(error),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Long enough to stay above the short-content floor.
    fn pad(text: &str) -> String {
        format!("{text} {}", "lorem ipsum dolor sit amet ".repeat(10))
    }

    #[test]
    fn security_phrases_match_localized() {
        for text in ["请完成安全验证以继续", "Security Check required"] {
            let p = check(&pad(text));
            assert!(p.blocked, "{text}");
            assert_eq!(p.confidence, 0.9);
        }
    }

    #[test]
    fn multiple_matches_keep_max_confidence() {
        let p = check(&pad("Your IP blocked by cloudflare"));
        assert!(p.blocked);
        assert_eq!(p.confidence, 0.95);
        // Both reasons contribute.
        assert!(p.reasons.len() >= 2);
    }

    #[test]
    fn short_content_floor_fires_without_pattern() {
        let p = check("tiny page");
        assert!(p.blocked);
        assert_eq!(p.confidence, 0.6);
        assert!(p.reasons[0].contains("content too short"));
    }

    #[test]
    fn short_content_does_not_dilute_stronger_match() {
        let p = check("IP blocked");
        assert!(p.blocked);
        assert_eq!(p.confidence, 0.95);
        assert_eq!(p.reasons.len(), 2);
    }

    #[test]
    fn ordinary_content_is_clean() {
        let p = check(&pad("Product listing: 42 widgets available"));
        assert!(!p.blocked);
        assert_eq!(p.confidence, 0.0);
        assert!(p.reasons.is_empty());
    }

    #[test]
    fn unavailable_records_error_only() {
        let p = unavailable("evaluation threw".to_string());
        assert!(!p.blocked);
        assert_eq!(p.confidence, 0.0);
        assert!(matches!(
            p.evidence,
            Evidence::Content { ref error, text_length: None, .. } if error.is_some()
        ));
    }
}
