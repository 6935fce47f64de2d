//! Debug artifact capture
//!
//! When a verdict looks wrong, the screenshot, raw HTML, and serialized
//! verdict from the moment of detection are what you want on disk. This is a
//! side responsibility delegated by the detection engine; nothing here is
//! required for correctness, and every failure is logged rather than raised.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::browser::DocumentHandle;
use crate::detect::Verdict;

/// Writes detection-time artifacts under a fixed directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    /// Artifacts will be written under `dir`, created on first capture
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Capture screenshot, HTML, and verdict JSON for one detection
    ///
    /// Files are keyed by `session` name and an epoch-millis timestamp.
    /// Returns the paths actually written; each artifact is best-effort.
    pub async fn capture(
        &self,
        doc: &dyn DocumentHandle,
        session: &str,
        verdict: &Verdict,
    ) -> Vec<PathBuf> {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            warn!(dir = %self.dir.display(), error = %e, "artifact directory unavailable");
            return Vec::new();
        }

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let stem = format!("{session}_{timestamp}");
        let mut written = Vec::new();

        match doc.screenshot().await {
            Ok(png) => {
                let path = self.dir.join(format!("{stem}.png"));
                write_artifact(&path, &png, &mut written);
            }
            Err(e) => warn!(error = %e, "screenshot capture failed"),
        }

        match doc.html().await {
            Ok(html) => {
                let path = self.dir.join(format!("{stem}.html"));
                write_artifact(&path, html.as_bytes(), &mut written);
            }
            Err(e) => warn!(error = %e, "HTML capture failed"),
        }

        match serde_json::to_vec_pretty(verdict) {
            Ok(json) => {
                let path = self.dir.join(format!("{stem}_verdict.json"));
                write_artifact(&path, &json, &mut written);
            }
            Err(e) => warn!(error = %e, "verdict serialization failed"),
        }

        written
    }
}

fn write_artifact(path: &Path, bytes: &[u8], written: &mut Vec<PathBuf>) {
    match std::fs::write(path, bytes) {
        Ok(()) => written.push(path.to_path_buf()),
        Err(e) => warn!(path = %path.display(), error = %e, "artifact write failed"),
    }
}
