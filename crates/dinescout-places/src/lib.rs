pub mod error;
pub mod explorer;
pub mod geoapify;
pub mod geocode;
mod http;
pub mod overpass;
pub mod rating;
pub mod source;

pub use error::PlacesError;
pub use explorer::{Explorer, LoadOutcome, LoadStatus};
pub use geoapify::GeoapifyClient;
pub use geocode::Geocoder;
pub use overpass::OverpassClient;
pub use rating::{FixedRating, RandomRating, RatingProvider};
pub use source::{DetailSource, PlacesProvider, VenueSource, CATEGORY_ALLOW_LIST, NO_NAME};
