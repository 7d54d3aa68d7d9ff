//! Local cache of normalized venue lists, keyed by region geometry.

pub mod error;
pub mod result_cache;
pub mod store;

pub use error::CacheError;
pub use result_cache::{
    CacheEntry, CacheLookup, ResultCache, CACHE_KEY_PREFIX, DEFAULT_TTL_SECS,
};
pub use store::{FileStore, KeyValueStore, MemoryStore};
