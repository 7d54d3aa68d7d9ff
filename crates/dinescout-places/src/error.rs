use dinescout_core::DiscoveryError;
use thiserror::Error;

/// Transport-level failures inside the places clients.
///
/// These never leave the crate's public fetch operations; they are folded
/// into [`DiscoveryError`] at the adapter boundary.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("missing API key for {provider}")]
    MissingApiKey { provider: &'static str },
}

impl PlacesError {
    /// Folds a transport failure into the pipeline taxonomy.
    ///
    /// A 404 is reported as `NotFound`; everything else is `FetchFailed`.
    pub(crate) fn into_discovery(self, context: &str) -> DiscoveryError {
        match self {
            PlacesError::HttpStatus { status: 404, .. } => DiscoveryError::not_found(context),
            other => DiscoveryError::fetch_failed(context, other),
        }
    }
}
