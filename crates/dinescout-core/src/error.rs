use thiserror::Error;

/// Failures surfaced by the discovery pipeline.
///
/// Every external-call failure is converted into one of these at the
/// adapter boundary; callers render `FetchFailed` as an empty/error state
/// and `NotFound` as a "not found" message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// Network, HTTP status, or body parse failure on a list, detail, or
    /// geocode request.
    #[error("fetch failed for {context}: {reason}")]
    FetchFailed { context: String, reason: String },

    /// A detail or geocode lookup returned zero usable results.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// A preset name with no configured bounding box.
    #[error("unknown preset region: {0}")]
    UnknownPreset(String),
}

impl DiscoveryError {
    pub fn fetch_failed(context: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::FetchFailed {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors raised while assembling [`crate::AppConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to load preset regions from {path}: {reason}")]
    RegionsFile { path: String, reason: String },
}
