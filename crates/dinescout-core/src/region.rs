//! Geographic scoping for venue queries.
//!
//! A [`Region`] is a bounding box plus a display label. Regions come either
//! from the fixed preset table ([`PresetRegions`]) or from a free-text
//! geocode performed by the places crate.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, DiscoveryError};

/// Preset used when a requested preset name is unknown.
pub const DEFAULT_PRESET: &str = "Paris";

/// Rectangle in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub lon_min: f64,
    pub lat_min: f64,
    pub lon_max: f64,
    pub lat_max: f64,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(lon_min: f64, lat_min: f64, lon_max: f64, lat_max: f64) -> Self {
        Self {
            lon_min,
            lat_min,
            lon_max,
            lat_max,
        }
    }

    /// Builds a box from Overpass ordering: south, west, north, east.
    #[must_use]
    pub const fn from_swne(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(west, south, east, north)
    }

    /// Parses `"south,west,north,east"`, the notation used by the preset
    /// table and its YAML override file.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the string does not hold
    /// four numbers or the box is inverted / out of range.
    pub fn parse_swne(raw: &str) -> Result<Self, String> {
        let parts = raw
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid coordinate in '{raw}': {e}"))?;

        let [south, west, north, east] = parts[..] else {
            return Err(format!(
                "expected 4 coordinates in '{raw}', found {}",
                parts.len()
            ));
        };

        let bbox = Self::from_swne(south, west, north, east);
        bbox.validate()?;
        Ok(bbox)
    }

    /// Checks ordering and coordinate ranges.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.lat_min) || !(-90.0..=90.0).contains(&self.lat_max) {
            return Err(format!("latitude out of range in {self:?}"));
        }
        if !(-180.0..=180.0).contains(&self.lon_min) || !(-180.0..=180.0).contains(&self.lon_max)
        {
            return Err(format!("longitude out of range in {self:?}"));
        }
        if self.lat_min > self.lat_max || self.lon_min > self.lon_max {
            return Err(format!("inverted bounding box {self:?}"));
        }
        Ok(())
    }

    /// Overpass QL bbox filter: `(south,west,north,east)`.
    #[must_use]
    pub fn to_overpass_filter(&self) -> String {
        format!(
            "({},{},{},{})",
            self.lat_min, self.lon_min, self.lat_max, self.lon_max
        )
    }

    /// Geoapify `filter` value: `rect:lonMin,latMin,lonMax,latMax`.
    #[must_use]
    pub fn to_geoapify_rect(&self) -> String {
        format!(
            "rect:{},{},{},{}",
            self.lon_min, self.lat_min, self.lon_max, self.lat_max
        )
    }

    /// Deterministic string identity of the geometry.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!(
            "{:.6},{:.6},{:.6},{:.6}",
            self.lon_min, self.lat_min, self.lon_max, self.lat_max
        )
    }
}

/// A resolved query scope. Immutable once built; a new user action produces
/// a new value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    pub bbox: BoundingBox,
    pub label: String,
}

impl Region {
    #[must_use]
    pub fn new(bbox: BoundingBox, label: impl Into<String>) -> Self {
        Self {
            bbox,
            label: label.into(),
        }
    }

    /// Key derived from the bounding box only; two labels sharing geometry
    /// share a key.
    #[must_use]
    pub fn cache_key(&self) -> String {
        self.bbox.cache_key()
    }
}

/// One entry of the preset table.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetRegion {
    pub name: String,
    pub label: String,
    pub bbox: BoundingBox,
}

impl PresetRegion {
    #[must_use]
    pub fn to_region(&self) -> Region {
        Region::new(self.bbox, self.label.clone())
    }
}

#[derive(Debug, Deserialize)]
struct PresetRegionFile {
    name: String,
    label: String,
    bbox: String,
}

/// Fixed mapping from preset names to bounding boxes.
#[derive(Debug, Clone)]
pub struct PresetRegions {
    presets: Vec<PresetRegion>,
    default_name: String,
}

impl PresetRegions {
    /// The built-in Île-de-France presets.
    #[must_use]
    pub fn builtin() -> Self {
        let table = [
            ("Paris", "Paris (75)", (48.815, 2.224, 48.902, 2.469)),
            ("Saint-Ouen", "Saint-Ouen (93)", (48.895, 2.318, 48.915, 2.350)),
            (
                "Neuilly",
                "Neuilly-sur-Seine (92)",
                (48.877, 2.252, 48.895, 2.288),
            ),
            (
                "Boulogne",
                "Boulogne-Billancourt (92)",
                (48.825, 2.224, 48.847, 2.256),
            ),
            ("Versailles", "Versailles (78)", (48.790, 2.110, 48.820, 2.160)),
            ("IDF", "Île-de-France (Tout)", (48.0, 1.4, 49.2, 3.6)),
        ];

        let presets = table
            .into_iter()
            .map(|(name, label, (s, w, n, e))| PresetRegion {
                name: name.to_string(),
                label: label.to_string(),
                bbox: BoundingBox::from_swne(s, w, n, e),
            })
            .collect();

        Self {
            presets,
            default_name: DEFAULT_PRESET.to_string(),
        }
    }

    /// Parses a YAML list of `{ name, label, bbox: "south,west,north,east" }`.
    ///
    /// The first entry becomes the default until [`Self::with_default`] is
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RegionsFile`] on malformed YAML, an empty list,
    /// or an invalid bounding box.
    pub fn from_yaml_str(yaml: &str, origin: &str) -> Result<Self, ConfigError> {
        let file_err = |reason: String| ConfigError::RegionsFile {
            path: origin.to_string(),
            reason,
        };

        let entries: Vec<PresetRegionFile> =
            serde_yaml::from_str(yaml).map_err(|e| file_err(e.to_string()))?;
        if entries.is_empty() {
            return Err(file_err("no presets defined".to_string()));
        }

        let presets = entries
            .into_iter()
            .map(|entry| {
                let bbox = BoundingBox::parse_swne(&entry.bbox)
                    .map_err(|e| file_err(format!("preset '{}': {e}", entry.name)))?;
                Ok(PresetRegion {
                    name: entry.name,
                    label: entry.label,
                    bbox,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let default_name = presets[0].name.clone();
        Ok(Self {
            presets,
            default_name,
        })
    }

    /// Reads presets from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RegionsFile`] if the file cannot be read or parsed.
    pub fn load_yaml(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let yaml = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionsFile {
            path: origin.clone(),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&yaml, &origin)
    }

    /// Sets the fallback preset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] when `name` is not in the table.
    pub fn with_default(mut self, name: &str) -> Result<Self, ConfigError> {
        let preset = self.find(name).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: "DINESCOUT_DEFAULT_REGION".to_string(),
            reason: format!("'{name}' is not a known preset"),
        })?;
        self.default_name = preset.name.clone();
        Ok(self)
    }

    fn find(&self, name: &str) -> Option<&PresetRegion> {
        let name = name.trim();
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Looks up a preset by name (ASCII case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::UnknownPreset`] when no preset matches.
    pub fn resolve(&self, name: &str) -> Result<Region, DiscoveryError> {
        self.find(name)
            .map(PresetRegion::to_region)
            .ok_or_else(|| DiscoveryError::UnknownPreset(name.to_string()))
    }

    /// Like [`Self::resolve`], but an unknown name falls back to the default
    /// preset instead of failing.
    #[must_use]
    pub fn resolve_or_default(&self, name: &str) -> Region {
        match self.resolve(name) {
            Ok(region) => region,
            Err(error) => {
                tracing::warn!(%error, fallback = %self.default_name, "falling back to default region");
                self.default_region()
            }
        }
    }

    #[must_use]
    pub fn default_region(&self) -> Region {
        self.find(&self.default_name)
            .unwrap_or(&self.presets[0])
            .to_region()
    }

    #[must_use]
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    pub fn iter(&self) -> impl Iterator<Item = &PresetRegion> {
        self.presets.iter()
    }
}

impl Default for PresetRegions {
    fn default() -> Self {
        Self::builtin()
    }
}
