//! DOM structure signal checker
//!
//! Runs a fixed battery of structural presence probes for known challenge
//! widget families. All probes run independently so the findings record every
//! family present, not just the first; later policy needs to know whether a
//! slider specifically was found.

use serde::Serialize;
use tracing::debug;

use super::{Evidence, PartialVerdict};
use crate::browser::DocumentHandle;

const RECAPTCHA_V2: &str = ".g-recaptcha, iframe[src*=\"recaptcha\"]";
const RECAPTCHA_V3: &str = "[data-sitekey]";
const RECAPTCHA_BADGE: &str = ".grecaptcha-badge";
const HCAPTCHA: &str = "iframe[src*=\"hcaptcha\"], .h-captcha";
const CDN_TURNSTILE: &str = "iframe[src*=\"turnstile\"], [data-cf-turnstile-sitekey]";
const CDN_CHALLENGE: &str = "#challenge-form, .cf-challenge";
const SLIDER_GEETEST: &str = ".geetest_holder, .geetest_popup";
const SLIDER_ALIYUN: &str = "#nc_1_wrapper, .nc-container";
const SLIDER_TENCENT: &str = "#TCaptcha, .tcaptcha-transform";
const CAPTCHA_IMAGE: &str = "img[src*=\"captcha\"], img[alt*=\"验证码\"]";

/// Which widget families the structural battery found
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct WidgetFindings {
    pub recaptcha_v2: bool,
    pub recaptcha_v3: bool,
    /// Badge presence is recorded but not scored; v3 sites carry it on
    /// unchallenged pages too.
    pub recaptcha_badge: bool,
    pub hcaptcha: bool,
    pub cdn_turnstile: bool,
    pub cdn_challenge: bool,
    pub slider_geetest: bool,
    pub slider_aliyun: bool,
    pub slider_tencent: bool,
    pub captcha_image: bool,
}

impl WidgetFindings {
    /// Any slider-family widget present (candidates for the slider solver)
    pub fn any_slider(&self) -> bool {
        self.slider_geetest || self.slider_aliyun || self.slider_tencent
    }
}

async fn probe(doc: &dyn DocumentHandle, selector: &str, error: &mut Option<String>) -> bool {
    match doc.is_present(selector).await {
        Ok(present) => present,
        Err(e) => {
            debug!(selector, error = %e, "DOM probe failed");
            error.get_or_insert_with(|| e.to_string());
            false
        }
    }
}

/// Run the widget-fingerprint battery against the live document
///
/// Probe failures degrade to "not found" and are noted in the evidence.
pub async fn check(doc: &dyn DocumentHandle) -> PartialVerdict {
    let mut error = None;
    let findings = WidgetFindings {
        recaptcha_v2: probe(doc, RECAPTCHA_V2, &mut error).await,
        recaptcha_v3: probe(doc, RECAPTCHA_V3, &mut error).await,
        recaptcha_badge: probe(doc, RECAPTCHA_BADGE, &mut error).await,
        hcaptcha: probe(doc, HCAPTCHA, &mut error).await,
        cdn_turnstile: probe(doc, CDN_TURNSTILE, &mut error).await,
        cdn_challenge: probe(doc, CDN_CHALLENGE, &mut error).await,
        slider_geetest: probe(doc, SLIDER_GEETEST, &mut error).await,
        slider_aliyun: probe(doc, SLIDER_ALIYUN, &mut error).await,
        slider_tencent: probe(doc, SLIDER_TENCENT, &mut error).await,
        captcha_image: probe(doc, CAPTCHA_IMAGE, &mut error).await,
    };

    let mut partial = PartialVerdict::clean(Evidence::Dom { findings, error });

    if findings.recaptcha_v2 || findings.recaptcha_v3 {
        partial.assert_blocked(0.95, "reCAPTCHA widget present");
    }
    if findings.hcaptcha {
        partial.assert_blocked(0.95, "hCaptcha widget present");
    }
    if findings.cdn_turnstile || findings.cdn_challenge {
        partial.assert_blocked(0.95, "CDN challenge present");
    }
    if findings.any_slider() {
        partial.assert_blocked(0.9, "slider captcha widget present");
    }
    if findings.captcha_image {
        partial.assert_blocked(0.85, "captcha image present");
    }

    partial
}
