//! Crate error taxonomy.
//!
//! Probe failures and exhausted detection rounds are recovered inside the
//! discovery subsystem and never appear here; only caller mistakes and the
//! degenerate no-url-at-all case cross the facade boundary.

use thiserror::Error;

/// Errors surfaced by [`crate::manager::ApiManager`].
#[derive(Debug, Error)]
pub enum ScoutError {
    /// A manual override was rejected before any state was touched.
    #[error("invalid manual override {url:?}: {reason}")]
    InvalidOverride { url: String, reason: String },

    /// Initialization finished without producing any URL. Guarded against by
    /// the fallback policy; kept so the facade never has to panic.
    #[error("no backend url available")]
    NoUrlAvailable,
}

impl ScoutError {
    pub(crate) fn invalid_override(url: &str, reason: impl Into<String>) -> Self {
        Self::InvalidOverride {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
