pub mod app_config;
pub mod config;
pub mod error;
pub mod filter;
pub mod query;
pub mod region;
pub mod venue;

pub use app_config::{AppConfig, Environment, ProviderKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, DiscoveryError};
pub use filter::{CategoryFilter, FilterState, SortOrder};
pub use query::{query, visible_pages, QueryPage, PAGE_SIZE};
pub use region::{BoundingBox, PresetRegion, PresetRegions, Region, DEFAULT_PRESET};
pub use venue::{ImageTheme, Venue, VenueCategory, VenueDetail};
