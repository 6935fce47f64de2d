//! Error types for gatecrash

use thiserror::Error;

/// Result type for gatecrash operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for gatecrash
///
/// Most components deliberately do not surface these to callers: signal
/// checkers and the challenge locator degrade failures to missing evidence,
/// and the slider solver converts any fault into a `Failed` outcome. The
/// variants exist for the boundary traits and the artifact writer.
#[derive(Debug, Error)]
pub enum Error {
    /// Document evaluation failed (text extraction, selector probe, URL read)
    #[error("Document evaluation failed: {0}")]
    Evaluate(String),

    /// Pointer input injection failed
    #[error("Pointer injection failed during {action}: {message}")]
    Injection { action: String, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (debug artifacts)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a document evaluation error
    pub fn evaluate(message: impl Into<String>) -> Self {
        Self::Evaluate(message.into())
    }

    /// Create an injection error with the failing pointer action
    pub fn injection(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Injection {
            action: action.into(),
            message: message.into(),
        }
    }
}
