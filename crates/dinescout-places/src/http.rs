//! Shared HTTP plumbing for the provider clients.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;

pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, PlacesError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// Parses an endpoint URL as given (no trailing-slash rewriting).
pub(crate) fn parse_endpoint(raw: &str) -> Result<Url, PlacesError> {
    Url::parse(raw.trim()).map_err(|e| PlacesError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// Parses a base URL and guarantees exactly one trailing slash so that
/// [`Url::join`] appends to it instead of replacing the last segment.
pub(crate) fn parse_base(raw: &str) -> Result<Url, PlacesError> {
    parse_endpoint(&format!("{}/", raw.trim().trim_end_matches('/')))
}

/// URL with the query string removed, safe for logs and error messages
/// (provider API keys travel in the query).
pub(crate) fn redacted(url: &Url) -> String {
    let mut clean = url.clone();
    clean.set_query(None);
    clean.to_string()
}

/// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
pub(crate) async fn get_json(client: &Client, url: &Url) -> Result<serde_json::Value, PlacesError> {
    tracing::debug!(url = %redacted(url), "GET");
    let response = client.get(url.clone()).send().await?;
    if !response.status().is_success() {
        return Err(PlacesError::HttpStatus {
            status: response.status().as_u16(),
            url: redacted(url),
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
        context: redacted(url),
        source: e,
    })
}

/// Reads an optional string field, trimmed, treating blank as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_base_normalises_trailing_slash() {
        let a = parse_base("https://api.geoapify.com").unwrap();
        let b = parse_base("https://api.geoapify.com///").unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.join("v2/places").unwrap().as_str(),
            "https://api.geoapify.com/v2/places"
        );
    }

    #[test]
    fn parse_endpoint_rejects_garbage() {
        assert!(matches!(
            parse_endpoint("not a url"),
            Err(PlacesError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn redacted_drops_query_string() {
        let url = Url::parse("https://api.geoapify.com/v2/places?apiKey=secret&limit=5").unwrap();
        assert_eq!(redacted(&url), "https://api.geoapify.com/v2/places");
    }

    #[test]
    fn non_blank_trims_and_filters() {
        assert_eq!(non_blank(Some("  Chez Marcel ")), Some("Chez Marcel".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
