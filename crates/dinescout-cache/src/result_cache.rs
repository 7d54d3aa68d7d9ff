//! Time-limited cache of normalized venue lists.
//!
//! Entries are stored as JSON `{ "data": [...], "timestamp": <epoch ms> }`
//! under `dinescout_cache_<bbox key>`. An entry is served while it is
//! younger than the TTL; older, unreadable or corrupt entries behave as
//! misses and are overwritten by the next successful fetch. Nothing is
//! ever deleted.

use chrono::{DateTime, Duration, Utc};
use dinescout_core::{Region, Venue};
use serde::{Deserialize, Serialize};

use crate::store::KeyValueStore;

/// Namespace prefix of every cache key.
pub const CACHE_KEY_PREFIX: &str = "dinescout_cache_";

/// Validity window: 24 hours.
pub const DEFAULT_TTL_SECS: u64 = 24 * 60 * 60;

/// Serialized form of one cached venue list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: Vec<Venue>,
    /// Fetch time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Hit(Vec<Venue>),
    Miss,
}

impl CacheLookup {
    #[must_use]
    pub fn into_hit(self) -> Option<Vec<Venue>> {
        match self {
            Self::Hit(venues) => Some(venues),
            Self::Miss => None,
        }
    }
}

pub struct ResultCache<S> {
    store: S,
    ttl: Duration,
}

impl<S: KeyValueStore> ResultCache<S> {
    /// Cache with the default 24-hour validity window.
    pub fn new(store: S) -> Self {
        Self::with_ttl_secs(store, DEFAULT_TTL_SECS)
    }

    pub fn with_ttl_secs(store: S, ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self { store, ttl }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store key for a region: namespace prefix plus the bounding-box key.
    #[must_use]
    pub fn key_for(region: &Region) -> String {
        format!("{CACHE_KEY_PREFIX}{}", region.cache_key())
    }

    pub fn get(&self, region: &Region) -> CacheLookup {
        self.get_at(region, Utc::now())
    }

    /// Looks up `region` as if the current time were `now`.
    pub fn get_at(&self, region: &Region, now: DateTime<Utc>) -> CacheLookup {
        let key = Self::key_for(region);

        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key, "cache miss");
                return CacheLookup::Miss;
            }
            Err(error) => {
                tracing::warn!(key, %error, "cache read failed; treating as miss");
                return CacheLookup::Miss;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(key, %error, "corrupt cache entry; treating as miss");
                return CacheLookup::Miss;
            }
        };

        let age = now.timestamp_millis().saturating_sub(entry.timestamp);
        if age < self.ttl.num_milliseconds() {
            tracing::debug!(key, age_ms = age, count = entry.data.len(), "cache hit");
            CacheLookup::Hit(entry.data)
        } else {
            tracing::debug!(key, age_ms = age, "cache entry expired");
            CacheLookup::Miss
        }
    }

    pub fn put(&self, region: &Region, venues: &[Venue]) {
        self.put_at(region, venues, Utc::now());
    }

    /// Stores `venues` for `region` stamped with `fetched_at`.
    ///
    /// Write failures are logged and otherwise ignored; the cache is an
    /// optimisation and never fails the fetch that produced the data.
    pub fn put_at(&self, region: &Region, venues: &[Venue], fetched_at: DateTime<Utc>) {
        let key = Self::key_for(region);
        let entry = CacheEntry {
            data: venues.to_vec(),
            timestamp: fetched_at.timestamp_millis(),
        };

        let body = match serde_json::to_string(&entry) {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(key, %error, "failed to serialize cache entry");
                return;
            }
        };

        if let Err(error) = self.store.put(&key, &body) {
            tracing::warn!(key, %error, "cache write failed");
        } else {
            tracing::debug!(key, count = venues.len(), "cache populated");
        }
    }
}
