//! Free-text city lookup through a Nominatim-compatible `/search` endpoint.

use dinescout_core::{BoundingBox, DiscoveryError, Region};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::PlacesError;
use crate::http::{build_client, get_json, parse_base, redacted};

#[derive(Debug, Deserialize)]
struct SearchHit {
    /// `[latMin, latMax, lonMin, lonMax]`, as strings.
    boundingbox: Vec<String>,
    display_name: String,
}

impl SearchHit {
    fn into_region(self) -> Result<Region, String> {
        let coords = self
            .boundingbox
            .iter()
            .map(|c| c.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid boundingbox {:?}: {e}", self.boundingbox))?;

        let [lat_min, lat_max, lon_min, lon_max] = coords[..] else {
            return Err(format!(
                "expected 4 boundingbox values, found {}",
                coords.len()
            ));
        };

        let bbox = BoundingBox::new(lon_min, lat_min, lon_max, lat_max);
        bbox.validate()?;
        Ok(Region::new(bbox, self.display_name))
    }
}

/// Resolves a city name into a [`Region`].
pub struct Geocoder {
    client: Client,
    base_url: Url,
}

impl Geocoder {
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidBaseUrl`] for a malformed base URL, or
    /// [`PlacesError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: parse_base(base_url)?,
        })
    }

    fn search_url(&self, query: &str) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: redacted(&self.base_url),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", "1");
        Ok(url)
    }

    /// Looks up `query` and returns the bounding box of the first match,
    /// labelled with the provider's display name.
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::NotFound`] for a blank query or zero matches.
    /// - [`DiscoveryError::FetchFailed`] on transport, status, or parse failure.
    pub async fn resolve_free_text(&self, query: &str) -> Result<Region, DiscoveryError> {
        let query = query.trim();
        let context = format!("geocode '{query}'");
        if query.is_empty() {
            return Err(DiscoveryError::not_found(context));
        }

        let hits = match self.search(query, &context).await {
            Ok(hits) => hits,
            Err(error) => {
                tracing::warn!(query, %error, "geocoding request failed");
                return Err(DiscoveryError::fetch_failed(context, error));
            }
        };

        let Some(first) = hits.into_iter().next() else {
            tracing::debug!(query, "geocoder returned no match");
            return Err(DiscoveryError::not_found(context));
        };

        let region = first
            .into_region()
            .map_err(|reason| DiscoveryError::fetch_failed(&context, reason))?;
        tracing::debug!(query, label = %region.label, "geocoded free-text city");
        Ok(region)
    }

    async fn search(&self, query: &str, context: &str) -> Result<Vec<SearchHit>, PlacesError> {
        let url = self.search_url(query)?;
        let body = get_json(&self.client, &url).await?;
        serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}
