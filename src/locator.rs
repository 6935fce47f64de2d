//! Challenge Locator
//!
//! Scans the live document for slider-widget fingerprints: a prioritized
//! list of drag-handle selectors, plus the enclosing track for the drag
//! distance ceiling. Finding nothing is a normal outcome, not an error.

use tracing::debug;

use crate::browser::{BoundingBox, DocumentHandle};

/// Drag handle fingerprints, most specific first
pub(crate) const HANDLE_SELECTORS: &[&str] = &[
    "#tcaptcha_drag_thumb",
    ".tc-drag-thumb",
    "[class*=\"drag-thumb\"]",
    "[class*=\"slider-button\"]",
];

/// Track container fingerprints
const TRACK_SELECTORS: &[&str] = &[
    ".tc-drag-track",
    "[class*=\"drag-track\"]",
    "[class*=\"slider-track\"]",
];

/// Fallback when the track element cannot be resolved
const DEFAULT_TRACK_WIDTH: f64 = 300.0;

/// A located slider challenge
///
/// Transient: only valid for the solve attempt it was captured for, and
/// invalidated if the document navigates.
#[derive(Debug, Clone, Copy)]
pub struct ChallengeTarget {
    /// Bounding geometry of the drag handle
    pub handle: BoundingBox,
    /// Track width in px, the upper bound on drag distance
    pub track_width: f64,
}

/// Scan the document for a known slider fingerprint
///
/// Returns the first handle whose geometry resolves, with the track width
/// (default 300 px when no track element is found). `None` means "no
/// challenge detected"; probe failures degrade to the same answer.
pub async fn find(doc: &dyn DocumentHandle) -> Option<ChallengeTarget> {
    let mut handle = None;
    for selector in HANDLE_SELECTORS {
        match doc.bounding_box(selector).await {
            Ok(Some(bbox)) => {
                debug!(selector, "slider handle located");
                handle = Some(bbox);
                break;
            }
            Ok(None) => {}
            Err(e) => {
                debug!(selector, error = %e, "handle probe failed");
            }
        }
    }
    let handle = handle?;

    let mut track_width = DEFAULT_TRACK_WIDTH;
    for selector in TRACK_SELECTORS {
        match doc.client_width(selector).await {
            Ok(Some(width)) if width > 0.0 => {
                track_width = width;
                break;
            }
            Ok(_) => {}
            Err(e) => {
                debug!(selector, error = %e, "track probe failed");
            }
        }
    }

    Some(ChallengeTarget {
        handle,
        track_width,
    })
}
