//! Provider-agnostic seams for venue lists and venue details.
//!
//! Each provider implements [`VenueSource`] and [`DetailSource`];
//! [`PlacesProvider`] picks one at configuration time so the rest of the
//! pipeline never branches on the provider.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use dinescout_core::{AppConfig, DiscoveryError, ProviderKind, Region, Venue, VenueDetail};

use crate::error::PlacesError;
use crate::geoapify::GeoapifyClient;
use crate::overpass::OverpassClient;
use crate::rating::RatingProvider;

/// Provider categories requested in every places query.
pub const CATEGORY_ALLOW_LIST: [&str; 5] = ["restaurant", "cafe", "fast_food", "bar", "pub"];

/// Display-name fallback for records with neither a name nor a street.
/// Records that end up with this marker are dropped.
pub const NO_NAME: &str = "Sans nom";

/// Fetches and normalizes the venues inside a region.
pub trait VenueSource: Send + Sync {
    /// # Errors
    ///
    /// Returns [`DiscoveryError::FetchFailed`] on network, status, or parse
    /// failure. Never panics.
    fn fetch_venues(
        &self,
        region: &Region,
    ) -> impl Future<Output = Result<Vec<Venue>, DiscoveryError>> + Send;
}

/// Fetches the extended record for one venue identifier.
pub trait DetailSource: Send + Sync {
    /// # Errors
    ///
    /// Returns [`DiscoveryError::NotFound`] when the provider has no usable
    /// record for `id`, and [`DiscoveryError::FetchFailed`] when the request
    /// itself fails.
    fn fetch_detail(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<VenueDetail, DiscoveryError>> + Send;
}

/// The configured places provider.
pub enum PlacesProvider {
    Overpass(OverpassClient),
    Geoapify(GeoapifyClient),
}

impl PlacesProvider {
    /// Builds the provider selected by `config.provider`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::MissingApiKey`] for Geoapify without a key,
    /// [`PlacesError::InvalidBaseUrl`] for a malformed endpoint, or
    /// [`PlacesError::Http`] if the HTTP client cannot be built.
    pub fn from_config(
        config: &AppConfig,
        rating: Arc<dyn RatingProvider>,
    ) -> Result<Self, PlacesError> {
        match config.provider {
            ProviderKind::Overpass => Ok(Self::Overpass(OverpassClient::new(
                &config.overpass_url,
                config.request_timeout_secs,
                &config.user_agent,
                rating,
            )?)),
            ProviderKind::Geoapify => {
                let api_key = config
                    .geoapify_api_key
                    .as_deref()
                    .ok_or(PlacesError::MissingApiKey {
                        provider: "geoapify",
                    })?;
                Ok(Self::Geoapify(
                    GeoapifyClient::new(
                        &config.geoapify_url,
                        api_key,
                        config.request_timeout_secs,
                        &config.user_agent,
                        rating,
                    )?
                    .with_limit(config.geoapify_limit),
                ))
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Overpass(_) => ProviderKind::Overpass,
            Self::Geoapify(_) => ProviderKind::Geoapify,
        }
    }
}

impl VenueSource for PlacesProvider {
    async fn fetch_venues(&self, region: &Region) -> Result<Vec<Venue>, DiscoveryError> {
        match self {
            Self::Overpass(client) => client.fetch_venues(region).await,
            Self::Geoapify(client) => client.fetch_venues(region).await,
        }
    }
}

impl DetailSource for PlacesProvider {
    async fn fetch_detail(&self, id: &str) -> Result<VenueDetail, DiscoveryError> {
        match self {
            Self::Overpass(client) => client.fetch_detail(id).await,
            Self::Geoapify(client) => client.fetch_detail(id).await,
        }
    }
}

/// Picks the display name: the venue name, else the street, else
/// [`NO_NAME`]. Returns `None` when only the sentinel is left.
pub(crate) fn display_name(name: Option<&str>, street: Option<&str>) -> Option<String> {
    let resolved = [name, street]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(NO_NAME);

    (resolved != NO_NAME).then(|| resolved.to_string())
}

/// Cleans a cuisine token; the generic `restaurant` token means no cuisine.
pub(crate) fn cuisine_label(raw: Option<&str>) -> Option<String> {
    crate::http::non_blank(raw).filter(|token| !token.eq_ignore_ascii_case("restaurant"))
}

/// Keeps the first venue for each id, preserving order.
pub(crate) fn dedup_by_id(venues: Vec<Venue>) -> Vec<Venue> {
    let mut seen = HashSet::new();
    venues
        .into_iter()
        .filter(|venue| seen.insert(venue.id.clone()))
        .collect()
}
