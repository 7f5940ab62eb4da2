//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CpError` as one variant
//! where configuration problems can surface.

use thiserror::Error;

/// The top-level error type for `cp-core`.
#[derive(Debug, Error)]
pub enum CpError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid duration {input:?}: {reason}")]
    Duration { input: String, reason: String },

    #[error("config file parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shorthand result type for `cp-core`.
pub type CpResult<T> = Result<T, CpError>;
