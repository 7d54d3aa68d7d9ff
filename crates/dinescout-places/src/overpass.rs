//! Overpass (OpenStreetMap) places provider.
//!
//! Venues are OSM nodes whose `amenity` tag is in the allow-list. The query
//! is sent as the `data` parameter of a GET to the interpreter endpoint.

use std::collections::BTreeMap;
use std::sync::Arc;

use dinescout_core::{BoundingBox, DiscoveryError, Region, Venue, VenueCategory, VenueDetail};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::PlacesError;
use crate::http::{build_client, get_json, non_blank, parse_endpoint};
use crate::rating::RatingProvider;
use crate::source::{
    cuisine_label, dedup_by_id, display_name, DetailSource, VenueSource, CATEGORY_ALLOW_LIST,
    NO_NAME,
};

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OverpassElement {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

impl OverpassElement {
    fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    fn category(&self) -> VenueCategory {
        VenueCategory::from_tag(self.tag("amenity").unwrap_or_default())
    }
}

/// Overpass QL selecting allow-listed amenity nodes inside `bbox`.
#[must_use]
pub fn build_venue_query(bbox: &BoundingBox) -> String {
    format!(
        "[out:json];node['amenity'~'{}']{};out;",
        CATEGORY_ALLOW_LIST.join("|"),
        bbox.to_overpass_filter()
    )
}

/// Overpass QL selecting a single node by id.
#[must_use]
pub fn build_detail_query(node_id: u64) -> String {
    format!("[out:json];node({node_id});out;")
}

/// Client for an Overpass interpreter endpoint.
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
    rating: Arc<dyn RatingProvider>,
}

impl OverpassClient {
    /// Creates a client for the interpreter at `endpoint`
    /// (e.g. `https://overpass-api.de/api/interpreter`).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidBaseUrl`] if `endpoint` does not parse,
    /// or [`PlacesError::Http`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
        rating: Arc<dyn RatingProvider>,
    ) -> Result<Self, PlacesError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            endpoint: parse_endpoint(endpoint)?,
            rating,
        })
    }

    fn query_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("data", query);
        url
    }

    async fn run_query(&self, query: &str) -> Result<serde_json::Value, PlacesError> {
        get_json(&self.client, &self.query_url(query)).await
    }
}

impl VenueSource for OverpassClient {
    async fn fetch_venues(&self, region: &Region) -> Result<Vec<Venue>, DiscoveryError> {
        let context = format!("overpass venues in {}", region.label);
        let query = build_venue_query(&region.bbox);

        let result = self.run_query(&query).await.and_then(|body| {
            serde_json::from_value::<OverpassResponse>(body).map_err(|e| PlacesError::Deserialize {
                context: context.clone(),
                source: e,
            })
        });

        match result {
            Ok(response) => {
                let raw_count = response.elements.len();
                let venues = normalize_elements(&response.elements, self.rating.as_ref());
                tracing::debug!(
                    region = %region.label,
                    raw_count,
                    count = venues.len(),
                    "normalized Overpass venues"
                );
                Ok(venues)
            }
            Err(error) => {
                tracing::warn!(region = %region.label, %error, "Overpass venue fetch failed");
                Err(DiscoveryError::fetch_failed(context, error))
            }
        }
    }
}

impl DetailSource for OverpassClient {
    async fn fetch_detail(&self, id: &str) -> Result<VenueDetail, DiscoveryError> {
        let context = format!("overpass node {id}");
        let Ok(node_id) = id.trim().parse::<u64>() else {
            return Err(DiscoveryError::not_found(context));
        };

        let body = match self.run_query(&build_detail_query(node_id)).await {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(node_id, %error, "Overpass detail fetch failed");
                return Err(error.into_discovery(&context));
            }
        };

        // A well-formed JSON body with the wrong shape or no elements means
        // the place is not there, not that loading failed.
        let response: OverpassResponse =
            serde_json::from_value(body).map_err(|_| DiscoveryError::not_found(&context))?;
        response
            .elements
            .first()
            .and_then(element_to_detail)
            .ok_or_else(|| DiscoveryError::not_found(context))
    }
}

/// Normalizes raw elements into venues, dropping nameless records and
/// duplicate ids.
pub(crate) fn normalize_elements(
    elements: &[OverpassElement],
    rating: &dyn RatingProvider,
) -> Vec<Venue> {
    let venues = elements
        .iter()
        .filter_map(|element| normalize_element(element, rating))
        .collect();
    dedup_by_id(venues)
}

pub(crate) fn normalize_element(
    element: &OverpassElement,
    rating: &dyn RatingProvider,
) -> Option<Venue> {
    let id = element.id?.to_string();
    let name = display_name(element.tag("name"), element.tag("addr:street"))?;

    Some(Venue {
        rating: rating.rating_for(&id),
        id,
        name,
        category: element.category(),
        cuisine: cuisine_label(element.tag("cuisine")),
        lat: element.lat,
        lon: element.lon,
    })
}

fn element_to_detail(element: &OverpassElement) -> Option<VenueDetail> {
    let id = element.id?;
    let (lat, lon) = (element.lat?, element.lon?);
    let name = display_name(element.tag("name"), element.tag("addr:street"))
        .unwrap_or_else(|| NO_NAME.to_string());

    Some(VenueDetail {
        id: id.to_string(),
        name,
        lat,
        lon,
        category: element.category(),
        cuisine: cuisine_label(element.tag("cuisine")),
        phone: non_blank(element.tag("contact:phone")).or_else(|| non_blank(element.tag("phone"))),
        website: non_blank(element.tag("website"))
            .or_else(|| non_blank(element.tag("contact:website"))),
        address: format_address(element),
    })
}

/// `"<housenumber> <street>, <postcode> <city>"`, skipping missing parts.
fn format_address(element: &OverpassElement) -> Option<String> {
    let join = |parts: [Option<&str>; 2]| {
        let joined = parts
            .into_iter()
            .filter_map(non_blank)
            .collect::<Vec<_>>()
            .join(" ");
        (!joined.is_empty()).then_some(joined)
    };

    let street_line = join([element.tag("addr:housenumber"), element.tag("addr:street")]);
    let city_line = join([element.tag("addr:postcode"), element.tag("addr:city")]);

    match (street_line, city_line) {
        (Some(street), Some(city)) => Some(format!("{street}, {city}")),
        (street, city) => street.or(city),
    }
}
