//! Browser Collaborator Boundary
//!
//! Narrow contracts the core consumes from the host's browser engine. The
//! engine itself (CDP transport, rendering, fingerprint spoofing) lives on the
//! other side of these traits and is never reimplemented here.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

/// Immutable snapshot of a navigation response
///
/// Captured once per navigation by the host and handed to the detection
/// engine. Header keys are matched case-sensitively as observed on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseSnapshot {
    /// HTTP status code
    pub status: u16,
    /// Response headers as observed
    pub headers: HashMap<String, String>,
    /// URL the navigation was originally issued for
    pub request_url: String,
}

impl ResponseSnapshot {
    /// Create a snapshot from status, headers, and the requested URL
    pub fn new(
        status: u16,
        headers: HashMap<String, String>,
        request_url: impl Into<String>,
    ) -> Self {
        Self {
            status,
            headers,
            request_url: request_url.into(),
        }
    }

    /// Get a header value by exact key
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// Bounding box of an element in page coordinates
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BoundingBox {
    /// X coordinate (left edge)
    pub x: f64,
    /// Y coordinate (top edge)
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl BoundingBox {
    /// Get the center point
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Live document handle supplied by the browser collaborator
///
/// One handle corresponds to one page; it is only valid until the page
/// navigates again. All methods are read-only probes.
#[async_trait]
pub trait DocumentHandle: Send + Sync {
    /// Extract the rendered body text
    async fn body_text(&self) -> Result<String>;

    /// Current top-level URL
    async fn current_url(&self) -> Result<String>;

    /// Whether at least one element matches the selector
    async fn is_present(&self, selector: &str) -> Result<bool>;

    /// Bounding box of the first element matching the selector, if rendered
    async fn bounding_box(&self, selector: &str) -> Result<Option<BoundingBox>>;

    /// Layout width in pixels of the first element matching the selector
    async fn client_width(&self, selector: &str) -> Result<Option<f64>>;

    /// Capture a screenshot as PNG bytes (debug artifacts only)
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// Current document HTML (debug artifacts only)
    async fn html(&self) -> Result<String>;
}

/// Pointer input injection capability
///
/// The pointer actuator is the only component that calls this. Implementations
/// typically forward to `Input.dispatchMouseEvent` or an equivalent.
#[async_trait]
pub trait PointerInput: Send + Sync {
    /// Move the virtual pointer to a coordinate
    ///
    /// `steps` optionally asks the host to interpolate intermediate move
    /// events; `None` means a single event.
    async fn move_to(&self, x: f64, y: f64, steps: Option<u32>) -> Result<()>;

    /// Press the primary button at a coordinate
    async fn press(&self, x: f64, y: f64) -> Result<()>;

    /// Release the primary button at a coordinate
    async fn release(&self, x: f64, y: f64) -> Result<()>;
}
