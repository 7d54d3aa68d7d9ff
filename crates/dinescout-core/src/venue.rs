//! Normalized venue records shared by every provider.

use serde::{Deserialize, Serialize};

/// Venue kind after provider tags have been folded into one vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueCategory {
    Restaurant,
    Cafe,
    FastFood,
    Bar,
    Other,
}

impl VenueCategory {
    pub const ALL: [VenueCategory; 5] = [
        VenueCategory::Restaurant,
        VenueCategory::Cafe,
        VenueCategory::FastFood,
        VenueCategory::Bar,
        VenueCategory::Other,
    ];

    /// Maps a provider amenity / catering kind onto a category.
    ///
    /// `pub` folds into [`VenueCategory::Bar`]; anything unrecognised is
    /// [`VenueCategory::Other`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "restaurant" => Self::Restaurant,
            "cafe" => Self::Cafe,
            "fast_food" => Self::FastFood,
            "bar" | "pub" => Self::Bar,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Cafe => "cafe",
            Self::FastFood => "fast_food",
            Self::Bar => "bar",
            Self::Other => "other",
        }
    }

    /// Label shown in the category selector.
    #[must_use]
    pub const fn display_label(self) -> &'static str {
        match self {
            Self::Restaurant => "Restaurants",
            Self::Cafe => "Cafés",
            Self::FastFood => "Fast Food",
            Self::Bar => "Bars & Pubs",
            Self::Other => "Autres",
        }
    }
}

impl std::fmt::Display for VenueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VenueCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// A point of interest as listed in the grid.
///
/// `rating` is synthesized once when the record is normalized and travels
/// with the venue through the cache. It is demo data, not a real score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub category: VenueCategory,
    pub cuisine: Option<String>,
    pub rating: f64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Venue {
    /// Card subtitle: the capitalised cuisine, else the category with
    /// underscores turned into spaces.
    #[must_use]
    pub fn subtitle(&self) -> String {
        match self.cuisine.as_deref().filter(|c| !c.is_empty()) {
            Some(cuisine) => capitalize(cuisine),
            None => self.category.as_str().replace('_', " "),
        }
    }

    #[must_use]
    pub fn image_theme(&self) -> ImageTheme {
        ImageTheme::pick(self.cuisine.as_deref(), self.category)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Illustration bucket for a venue card, chosen by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTheme {
    Pizza,
    Burger,
    Sushi,
    Japanese,
    Asian,
    Indian,
    Italian,
    Coffee,
    Bar,
    Default,
}

impl ImageTheme {
    /// Matches on the cuisine when present, otherwise on the category name.
    /// Checks run in a fixed priority order.
    #[must_use]
    pub fn pick(cuisine: Option<&str>, category: VenueCategory) -> Self {
        let key = cuisine.map_or_else(|| category.as_str().to_string(), str::to_lowercase);
        let has = |needle: &str| key.contains(needle);

        if has("pizza") {
            Self::Pizza
        } else if has("burger") {
            Self::Burger
        } else if has("sushi") {
            Self::Sushi
        } else if has("japan") {
            Self::Japanese
        } else if has("asian") || has("chinese") || has("viet") {
            Self::Asian
        } else if has("india") {
            Self::Indian
        } else if has("italian") || has("pasta") {
            Self::Italian
        } else if has("cafe") || has("coffee") {
            Self::Coffee
        } else if has("bar") || has("pub") {
            Self::Bar
        } else {
            Self::Default
        }
    }

    #[must_use]
    pub const fn image_url(self) -> &'static str {
        match self {
            Self::Burger => "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=600&q=80",
            Self::Pizza => "https://images.unsplash.com/photo-1604382354936-07c5d9983bd3?w=600&q=80",
            Self::Italian => "https://images.unsplash.com/photo-1498579150354-977475b7ea0b?w=600&q=80",
            Self::Sushi => "https://images.unsplash.com/photo-1579871494447-9811cf80d66c?w=600&q=80",
            Self::Japanese => "https://images.unsplash.com/photo-1580822184713-fc5400e7fe10?w=600&q=80",
            Self::Asian => "https://images.unsplash.com/photo-1552566626-52f8b828add9?w=600&q=80",
            Self::Indian => "https://images.unsplash.com/photo-1585937421612-70a008356f36?w=600&q=80",
            Self::Coffee => "https://images.unsplash.com/photo-1509042239860-f550ce710b93?w=600&q=80",
            Self::Bar => "https://images.unsplash.com/photo-1514362545857-3bc16c4c7d1b?w=600&q=80",
            Self::Default => "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=600&q=80",
        }
    }
}

/// Extended record for the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueDetail {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub category: VenueCategory,
    pub cuisine: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
}

impl VenueDetail {
    /// Tag line above the venue name, e.g. `"BAR • IRISH"`.
    #[must_use]
    pub fn headline(&self) -> String {
        let mut headline = match self.category {
            VenueCategory::Restaurant => "Restaurant Gastronomique".to_string(),
            other => other.as_str().to_uppercase(),
        };
        if let Some(cuisine) = self.cuisine.as_deref().filter(|c| !c.is_empty()) {
            headline.push_str(" • ");
            headline.push_str(&cuisine.to_uppercase());
        }
        headline
    }

    /// Embeddable map URL centred on the venue.
    #[must_use]
    pub fn map_embed_url(&self) -> String {
        format!(
            "https://maps.google.com/maps?q={},{}&hl=fr&z=16&output=embed",
            self.lat, self.lon
        )
    }

    /// Turn-by-turn directions URL to the venue.
    #[must_use]
    pub fn directions_url(&self) -> String {
        format!(
            "https://www.google.com/maps/dir/?api=1&destination={},{}",
            self.lat, self.lon
        )
    }
}
