//! Integration tests for the detection engine
//!
//! Run the five signal checkers against a mock document handle and verify
//! the fused verdicts.

use std::collections::HashMap;

use async_trait::async_trait;
use gatecrash::{detect, BoundingBox, DocumentHandle, Error, Evidence, ResponseSnapshot, Result};

/// Opt-in test logging: RUST_LOG=gatecrash=debug cargo test
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Mock document: selector probes match when the selector contains one of
/// the configured marker substrings (case-insensitive).
#[derive(Default)]
struct MockDocument {
    body_text: String,
    url: String,
    markers: Vec<&'static str>,
    fail_body_text: bool,
}

impl MockDocument {
    fn clean(url: &str) -> Self {
        Self {
            body_text: "Product listing with plenty of ordinary page copy. ".repeat(5),
            url: url.to_string(),
            ..Default::default()
        }
    }

    fn matches(&self, selector: &str) -> bool {
        let selector = selector.to_lowercase();
        self.markers.iter().any(|m| selector.contains(m))
    }
}

#[async_trait]
impl DocumentHandle for MockDocument {
    async fn body_text(&self) -> Result<String> {
        if self.fail_body_text {
            return Err(Error::evaluate("execution context destroyed"));
        }
        Ok(self.body_text.clone())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.url.clone())
    }

    async fn is_present(&self, selector: &str) -> Result<bool> {
        Ok(self.matches(selector))
    }

    async fn bounding_box(&self, _selector: &str) -> Result<Option<BoundingBox>> {
        Ok(None)
    }

    async fn client_width(&self, _selector: &str) -> Result<Option<f64>> {
        Ok(None)
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(vec![0x89, 0x50, 0x4E, 0x47])
    }

    async fn html(&self) -> Result<String> {
        Ok(format!("<html><body>{}</body></html>", self.body_text))
    }
}

fn response(status: u16, url: &str) -> ResponseSnapshot {
    ResponseSnapshot::new(status, HashMap::new(), url)
}

#[tokio::test]
async fn clean_page_yields_empty_verdict() {
    init_tracing();
    let url = "https://site.example/page";
    let doc = MockDocument::clean(url);

    let verdict = detect(&response(200, url), &doc).await;

    assert!(!verdict.is_blocked);
    assert_eq!(verdict.confidence, 0.0);
    assert!(verdict.reasons.is_empty());
    // All five categories still leave evidence.
    assert_eq!(verdict.evidence.len(), 5);
}

#[tokio::test]
async fn rate_limit_status_is_certain() {
    init_tracing();
    let url = "https://site.example/page";
    let doc = MockDocument::clean(url);

    let verdict = detect(&response(429, url), &doc).await;

    assert!(verdict.is_blocked);
    assert_eq!(verdict.confidence, 1.0);
}

#[tokio::test]
async fn forbidden_plus_short_content_keeps_max_confidence() {
    init_tracing();
    let url = "https://site.example/page";
    let doc = MockDocument {
        body_text: "Denied".to_string(),
        url: url.to_string(),
        ..Default::default()
    };

    let verdict = detect(&response(403, url), &doc).await;

    assert!(verdict.is_blocked);
    assert_eq!(verdict.confidence, 0.9);
    assert!(verdict.reasons.iter().any(|r| r.contains("403")));
    assert!(verdict
        .reasons
        .iter()
        .any(|r| r.contains("content too short")));
}

#[tokio::test]
async fn suspicious_redirect_blocks_and_names_destination() {
    init_tracing();
    let request_url = "https://site.example/page";
    let final_url = "https://site.example/login?reason=verify";
    let doc = MockDocument::clean(final_url);

    let verdict = detect(&response(302, request_url), &doc).await;

    assert!(verdict.is_blocked);
    assert_eq!(verdict.confidence, 0.8);
    assert!(verdict.reasons.iter().any(|r| r.contains(final_url)));
}

#[tokio::test]
async fn benign_redirect_does_not_block() {
    init_tracing();
    let request_url = "https://site.example/page";
    let doc = MockDocument::clean("https://site.example/page/canonical");

    let verdict = detect(&response(301, request_url), &doc).await;

    // Informational only: redirect status plus a harmless destination.
    assert!(!verdict.is_blocked);
    assert_eq!(verdict.confidence, 0.0);
}

#[tokio::test]
async fn slider_widget_routes_to_solver() {
    init_tracing();
    let url = "https://site.example/page";
    let mut doc = MockDocument::clean(url);
    doc.markers = vec!["geetest"];

    let verdict = detect(&response(200, url), &doc).await;

    assert!(verdict.is_blocked);
    assert_eq!(verdict.confidence, 0.9);
    assert!(verdict.has_slider_challenge());
}

#[tokio::test]
async fn recaptcha_is_not_a_slider_candidate() {
    init_tracing();
    let url = "https://site.example/page";
    let mut doc = MockDocument::clean(url);
    doc.markers = vec!["recaptcha"];

    let verdict = detect(&response(200, url), &doc).await;

    assert!(verdict.is_blocked);
    assert_eq!(verdict.confidence, 0.95);
    assert!(!verdict.has_slider_challenge());
}

#[tokio::test]
async fn suspicious_headers_block() {
    init_tracing();
    let url = "https://site.example/page";
    let doc = MockDocument::clean(url);
    let mut headers = HashMap::new();
    headers.insert("cf-ray".to_string(), "8f1a2b3c".to_string());
    headers.insert("cf-mitigated".to_string(), "challenge".to_string());

    let verdict = detect(&ResponseSnapshot::new(200, headers, url), &doc).await;

    assert!(verdict.is_blocked);
    assert_eq!(verdict.confidence, 0.9);
}

#[tokio::test]
async fn unreadable_body_degrades_to_evidence() {
    init_tracing();
    let url = "https://site.example/page";
    let mut doc = MockDocument::clean(url);
    doc.fail_body_text = true;

    let verdict = detect(&response(200, url), &doc).await;

    assert!(!verdict.is_blocked);
    assert_eq!(verdict.confidence, 0.0);
    let degraded = verdict.evidence.iter().any(|e| {
        matches!(
            e,
            Evidence::Content {
                text_length: None,
                error: Some(_),
                ..
            }
        )
    });
    assert!(degraded, "extraction failure should be recorded as evidence");
}

#[tokio::test]
async fn artifact_writer_dumps_all_three_files() {
    init_tracing();
    let url = "https://site.example/page";
    let doc = MockDocument::clean(url);
    let verdict = detect(&response(200, url), &doc).await;

    let dir = std::env::temp_dir().join(format!("gatecrash_artifacts_{}", std::process::id()));
    let writer = gatecrash::ArtifactWriter::new(&dir);
    let written = writer.capture(&doc, "site-example", &verdict).await;

    assert_eq!(written.len(), 3);
    for path in &written {
        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("site-example_"));
    }
    std::fs::remove_dir_all(&dir).unwrap();
}
