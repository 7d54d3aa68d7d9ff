//! Geoapify Places v2 provider.

use std::sync::Arc;

use dinescout_core::{DiscoveryError, Region, Venue, VenueCategory, VenueDetail};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::PlacesError;
use crate::http::{build_client, get_json, non_blank, parse_base, redacted};
use crate::rating::RatingProvider;
use crate::source::{
    cuisine_label, dedup_by_id, display_name, DetailSource, VenueSource, CATEGORY_ALLOW_LIST,
    NO_NAME,
};

const DEFAULT_LIMIT: u32 = 100;
const CATERING_PREFIX: &str = "catering.";

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FeatureProperties {
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    street: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    formatted: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    contact: Option<Contact>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Contact {
    #[serde(default)]
    phone: Option<String>,
}

impl FeatureProperties {
    /// First allow-listed `catering.<kind>` segment.
    fn category(&self) -> VenueCategory {
        self.categories
            .iter()
            .filter_map(|c| c.strip_prefix(CATERING_PREFIX))
            .filter_map(|rest| rest.split('.').next())
            .find(|kind| CATEGORY_ALLOW_LIST.contains(kind))
            .map_or(VenueCategory::Other, VenueCategory::from_tag)
    }

    /// Last segment of the deepest `catering.*` path, e.g.
    /// `catering.restaurant.pizza` gives `pizza`.
    fn cuisine(&self) -> Option<String> {
        let deepest = self
            .categories
            .iter()
            .filter(|c| c.starts_with(CATERING_PREFIX))
            .max_by_key(|c| c.matches('.').count())?;
        if deepest.matches('.').count() < 2 {
            return None;
        }
        cuisine_label(deepest.rsplit('.').next())
    }
}

/// Client for the Geoapify `v2/places` and `v2/place-details` endpoints.
pub struct GeoapifyClient {
    client: Client,
    base_url: Url,
    api_key: String,
    limit: u32,
    rating: Arc<dyn RatingProvider>,
}

impl GeoapifyClient {
    /// # Errors
    ///
    /// Returns [`PlacesError::MissingApiKey`] for a blank key,
    /// [`PlacesError::InvalidBaseUrl`] for a malformed base URL, or
    /// [`PlacesError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        rating: Arc<dyn RatingProvider>,
    ) -> Result<Self, PlacesError> {
        let api_key = non_blank(Some(api_key)).ok_or(PlacesError::MissingApiKey {
            provider: "geoapify",
        })?;
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: parse_base(base_url)?,
            api_key,
            limit: DEFAULT_LIMIT,
            rating,
        })
    }

    /// Maximum number of features requested per search.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, PlacesError> {
        self.base_url
            .join(path)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: redacted(&self.base_url),
                reason: e.to_string(),
            })
    }

    fn places_url(&self, region: &Region) -> Result<Url, PlacesError> {
        let categories = CATEGORY_ALLOW_LIST
            .iter()
            .map(|kind| format!("{CATERING_PREFIX}{kind}"))
            .collect::<Vec<_>>()
            .join(",");

        let mut url = self.endpoint("v2/places")?;
        url.query_pairs_mut()
            .append_pair("categories", &categories)
            .append_pair("filter", &region.bbox.to_geoapify_rect())
            .append_pair("limit", &self.limit.to_string())
            .append_pair("apiKey", &self.api_key);
        Ok(url)
    }

    fn details_url(&self, id: &str) -> Result<Url, PlacesError> {
        let mut url = self.endpoint("v2/place-details")?;
        url.query_pairs_mut()
            .append_pair("id", id)
            .append_pair("apiKey", &self.api_key);
        Ok(url)
    }

    async fn get_features(&self, url: &Url, context: &str) -> Result<FeatureCollection, PlacesError> {
        let body = get_json(&self.client, url).await?;
        serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

impl VenueSource for GeoapifyClient {
    async fn fetch_venues(&self, region: &Region) -> Result<Vec<Venue>, DiscoveryError> {
        let context = format!("geoapify venues in {}", region.label);
        let result = match self.places_url(region) {
            Ok(url) => self.get_features(&url, &context).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(collection) => {
                let raw_count = collection.features.len();
                let properties: Vec<FeatureProperties> =
                    collection.features.into_iter().map(|f| f.properties).collect();
                let venues = normalize_features(&properties, self.rating.as_ref());
                tracing::debug!(
                    region = %region.label,
                    raw_count,
                    count = venues.len(),
                    "normalized Geoapify venues"
                );
                Ok(venues)
            }
            Err(error) => {
                tracing::warn!(region = %region.label, %error, "Geoapify venue fetch failed");
                Err(DiscoveryError::fetch_failed(context, error))
            }
        }
    }
}

impl DetailSource for GeoapifyClient {
    async fn fetch_detail(&self, id: &str) -> Result<VenueDetail, DiscoveryError> {
        let context = format!("geoapify place {id}");
        let Some(id) = non_blank(Some(id)) else {
            return Err(DiscoveryError::not_found(context));
        };

        let body = match self.details_url(&id) {
            Ok(url) => get_json(&self.client, &url).await,
            Err(e) => Err(e),
        };
        let body = match body {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(place_id = %id, %error, "Geoapify detail fetch failed");
                return Err(error.into_discovery(&context));
            }
        };

        let collection: FeatureCollection =
            serde_json::from_value(body).map_err(|_| DiscoveryError::not_found(&context))?;
        collection
            .features
            .first()
            .and_then(|feature| properties_to_detail(&id, &feature.properties))
            .ok_or_else(|| DiscoveryError::not_found(context))
    }
}

pub(crate) fn normalize_features(
    features: &[FeatureProperties],
    rating: &dyn RatingProvider,
) -> Vec<Venue> {
    let venues = features
        .iter()
        .filter_map(|props| normalize_feature(props, rating))
        .collect();
    dedup_by_id(venues)
}

pub(crate) fn normalize_feature(
    props: &FeatureProperties,
    rating: &dyn RatingProvider,
) -> Option<Venue> {
    let id = non_blank(props.place_id.as_deref())?;
    let name = display_name(props.name.as_deref(), props.street.as_deref())?;

    Some(Venue {
        rating: rating.rating_for(&id),
        id,
        name,
        category: props.category(),
        cuisine: props.cuisine(),
        lat: props.lat,
        lon: props.lon,
    })
}

fn properties_to_detail(requested_id: &str, props: &FeatureProperties) -> Option<VenueDetail> {
    let (lat, lon) = (props.lat?, props.lon?);
    let name = display_name(props.name.as_deref(), props.street.as_deref())
        .unwrap_or_else(|| NO_NAME.to_string());

    Some(VenueDetail {
        id: non_blank(props.place_id.as_deref()).unwrap_or_else(|| requested_id.to_string()),
        name,
        lat,
        lon,
        category: props.category(),
        cuisine: props.cuisine(),
        phone: non_blank(props.contact.as_ref().and_then(|c| c.phone.as_deref())),
        website: non_blank(props.website.as_deref()),
        address: non_blank(props.formatted.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::rating::FixedRating;

    fn props(value: serde_json::Value) -> FeatureProperties {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn category_comes_from_catering_segment() {
        let p = props(json!({"categories": ["catering", "catering.fast_food", "catering.fast_food.burger"]}));
        assert_eq!(p.category(), VenueCategory::FastFood);

        let pub_ = props(json!({"categories": ["catering.pub"]}));
        assert_eq!(pub_.category(), VenueCategory::Bar);

        let other = props(json!({"categories": ["commercial.food_and_drink"]}));
        assert_eq!(other.category(), VenueCategory::Other);
    }

    #[test]
    fn cuisine_is_last_segment_of_deepest_path() {
        let p = props(json!({"categories": ["catering", "catering.restaurant", "catering.restaurant.pizza"]}));
        assert_eq!(p.cuisine().as_deref(), Some("pizza"));

        let plain = props(json!({"categories": ["catering", "catering.restaurant"]}));
        assert_eq!(plain.cuisine(), None);

        let generic = props(json!({"categories": ["catering.cafe.restaurant"]}));
        assert_eq!(generic.cuisine(), None);
    }

    #[test]
    fn normalizes_feature() {
        let p = props(json!({
            "place_id": "51abc",
            "name": "  Pizzeria Popolare ",
            "categories": ["catering", "catering.restaurant", "catering.restaurant.pizza"],
            "lat": 48.8686,
            "lon": 2.3412
        }));
        let venue = normalize_feature(&p, &FixedRating(4.7)).unwrap();
        assert_eq!(venue.id, "51abc");
        assert_eq!(venue.name, "Pizzeria Popolare");
        assert_eq!(venue.category, VenueCategory::Restaurant);
        assert_eq!(venue.cuisine.as_deref(), Some("pizza"));
        assert_eq!(venue.lon, Some(2.3412));
    }

    #[test]
    fn street_fallback_and_exclusions() {
        let by_street = props(json!({"place_id": "1", "street": "Rue de Charonne", "categories": ["catering.bar"]}));
        assert_eq!(
            normalize_feature(&by_street, &FixedRating(4.0)).unwrap().name,
            "Rue de Charonne"
        );

        let nameless = props(json!({"place_id": "2", "categories": ["catering.bar"]}));
        assert!(normalize_feature(&nameless, &FixedRating(4.0)).is_none());

        let no_id = props(json!({"name": "Le Perchoir", "categories": ["catering.bar"]}));
        assert!(normalize_feature(&no_id, &FixedRating(4.0)).is_none());
    }

    #[test]
    fn detail_uses_formatted_address_and_contact_phone() {
        let p = props(json!({
            "place_id": "51def",
            "name": "Le Train Bleu",
            "categories": ["catering.restaurant", "catering.restaurant.french"],
            "lat": 48.8443,
            "lon": 2.3744,
            "formatted": "Le Train Bleu, Place Louis-Armand, 75012 Paris, France",
            "website": "https://le-train-bleu.com",
            "contact": {"phone": "+33 1 43 43 09 06"}
        }));
        let detail = properties_to_detail("51def", &p).unwrap();
        assert_eq!(detail.cuisine.as_deref(), Some("french"));
        assert_eq!(detail.phone.as_deref(), Some("+33 1 43 43 09 06"));
        assert_eq!(
            detail.address.as_deref(),
            Some("Le Train Bleu, Place Louis-Armand, 75012 Paris, France")
        );
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let result = GeoapifyClient::new(
            "https://api.geoapify.com",
            "  ",
            5,
            "test",
            Arc::new(FixedRating(4.0)),
        );
        assert!(matches!(result, Err(PlacesError::MissingApiKey { .. })));
    }

    #[test]
    fn places_url_carries_rect_filter_and_limit() {
        let client = GeoapifyClient::new(
            "https://api.geoapify.com/",
            "k3y",
            5,
            "test",
            Arc::new(FixedRating(4.0)),
        )
        .unwrap()
        .with_limit(20);
        let region = Region::new(
            dinescout_core::BoundingBox::from_swne(48.825, 2.224, 48.847, 2.256),
            "Boulogne",
        );
        let url = client.places_url(&region).unwrap();
        assert_eq!(url.path(), "/v2/places");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&(
            "categories".to_string(),
            "catering.restaurant,catering.cafe,catering.fast_food,catering.bar,catering.pub"
                .to_string()
        )));
        assert!(pairs.contains(&("limit".to_string(), "20".to_string())));
        assert!(pairs.contains(&("apiKey".to_string(), "k3y".to_string())));
        let filter = pairs.iter().find(|(k, _)| k == "filter").unwrap();
        assert!(filter.1.starts_with("rect:2.224"));
    }
}
