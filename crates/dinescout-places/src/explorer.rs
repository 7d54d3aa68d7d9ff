//! Session orchestration: active region, loaded venues, and filter state.
//!
//! Region loads go cache first, then provider. Every load takes a new
//! generation number; a response is applied only when no other load has
//! started since, otherwise it is dropped as [`LoadOutcome::Superseded`].

use std::sync::{Mutex, PoisonError};

use dinescout_cache::{CacheLookup, KeyValueStore, ResultCache};
use dinescout_core::{
    query, CategoryFilter, DiscoveryError, FilterState, PresetRegions, QueryPage, Region,
    SortOrder, Venue, VenueDetail,
};

use crate::geocode::Geocoder;
use crate::source::{DetailSource, VenueSource};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(DiscoveryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The region was already active and loaded (or loading).
    Unchanged,
    Cached { count: usize },
    Fetched { count: usize },
    /// A newer load started while this one was in flight.
    Superseded,
}

#[derive(Debug, Default)]
struct ExplorerState {
    active: Option<Region>,
    venues: Vec<Venue>,
    filter: FilterState,
    status: LoadStatus,
    generation: u64,
}

impl ExplorerState {
    fn is_active(&self, key: &str) -> bool {
        self.active.as_ref().is_some_and(|r| r.cache_key() == key)
    }
}

pub struct Explorer<S, K> {
    source: S,
    cache: ResultCache<K>,
    presets: PresetRegions,
    state: Mutex<ExplorerState>,
}

impl<S, K> Explorer<S, K>
where
    S: VenueSource,
    K: KeyValueStore,
{
    pub fn new(source: S, cache: ResultCache<K>, presets: PresetRegions) -> Self {
        Self {
            source,
            cache,
            presets,
            state: Mutex::new(ExplorerState::default()),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ExplorerState) -> R) -> R {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Activates a preset by name, falling back to the default preset for
    /// unknown names.
    ///
    /// # Errors
    ///
    /// See [`Explorer::load_region`].
    pub async fn select_preset(&self, name: &str) -> Result<LoadOutcome, DiscoveryError> {
        let region = self.presets.resolve_or_default(name);
        self.load_region(region).await
    }

    /// Geocodes `query` and activates the resulting region. On any geocoding
    /// error the active region and its venues stay as they were.
    ///
    /// # Errors
    ///
    /// Returns the geocoder's `NotFound` / `FetchFailed`, or any error from
    /// [`Explorer::load_region`].
    pub async fn search_city(
        &self,
        geocoder: &Geocoder,
        query: &str,
    ) -> Result<LoadOutcome, DiscoveryError> {
        let region = geocoder.resolve_free_text(query).await?;
        self.load_region(region).await
    }

    /// Makes `region` active and loads its venues, from cache when fresh.
    ///
    /// Reselecting the region that is already loaded (or loading) is a
    /// no-op. A failed region can be retried.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`DiscoveryError`] when the fetch fails and
    /// no newer load has started. The status becomes
    /// [`LoadStatus::Failed`] and the venue list is empty.
    pub async fn load_region(&self, region: Region) -> Result<LoadOutcome, DiscoveryError> {
        let key = region.cache_key();

        let started = self.with_state(|state| {
            if state.is_active(&key)
                && matches!(state.status, LoadStatus::Ready | LoadStatus::Loading)
            {
                return None;
            }
            state.generation += 1;
            state.active = Some(region.clone());
            state.venues.clear();
            state.filter.reset_page();
            state.status = LoadStatus::Loading;
            Some(state.generation)
        });
        let Some(generation) = started else {
            tracing::debug!(region = %region.label, "region already active");
            return Ok(LoadOutcome::Unchanged);
        };

        if let CacheLookup::Hit(venues) = self.cache.get(&region) {
            let count = venues.len();
            return Ok(self.apply(generation, &region, venues, LoadOutcome::Cached { count }));
        }

        match self.source.fetch_venues(&region).await {
            Ok(venues) => {
                self.cache.put(&region, &venues);
                let count = venues.len();
                Ok(self.apply(generation, &region, venues, LoadOutcome::Fetched { count }))
            }
            Err(error) => {
                let applied = self.with_state(|state| {
                    if state.generation != generation {
                        return false;
                    }
                    state.venues.clear();
                    state.status = LoadStatus::Failed(error.clone());
                    true
                });
                if applied {
                    Err(error)
                } else {
                    tracing::debug!(region = %region.label, %error, "discarding failure for superseded region");
                    Ok(LoadOutcome::Superseded)
                }
            }
        }
    }

    fn apply(
        &self,
        generation: u64,
        region: &Region,
        venues: Vec<Venue>,
        outcome: LoadOutcome,
    ) -> LoadOutcome {
        let applied = self.with_state(|state| {
            if state.generation != generation {
                return false;
            }
            state.venues = venues;
            state.status = LoadStatus::Ready;
            true
        });

        if applied {
            tracing::info!(region = %region.label, ?outcome, "region loaded");
            outcome
        } else {
            tracing::debug!(region = %region.label, "discarding response for superseded region");
            LoadOutcome::Superseded
        }
    }

    pub fn set_search_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.with_state(|state| state.filter.set_search_text(text));
    }

    pub fn set_category(&self, category: CategoryFilter) {
        self.with_state(|state| state.filter.set_category(category));
    }

    pub fn set_sort(&self, sort: SortOrder) {
        self.with_state(|state| state.filter.set_sort(sort));
    }

    pub fn set_page(&self, page: usize) {
        self.with_state(|state| state.filter.set_page(page));
    }

    /// Runs the query engine over the loaded venues.
    #[must_use]
    pub fn current_page(&self) -> QueryPage {
        self.with_state(|state| query(&state.venues, &state.filter))
    }

    #[must_use]
    pub fn active_region(&self) -> Option<Region> {
        self.with_state(|state| state.active.clone())
    }

    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.with_state(|state| state.status.clone())
    }

    #[must_use]
    pub fn filter(&self) -> FilterState {
        self.with_state(|state| state.filter.clone())
    }

    #[must_use]
    pub fn venue_count(&self) -> usize {
        self.with_state(|state| state.venues.len())
    }

    pub fn presets(&self) -> &PresetRegions {
        &self.presets
    }

    pub fn cache(&self) -> &ResultCache<K> {
        &self.cache
    }
}

impl<S, K> Explorer<S, K>
where
    S: VenueSource + DetailSource,
    K: KeyValueStore,
{
    /// Fetches the detail record for `id`. Not cached.
    ///
    /// # Errors
    ///
    /// `NotFound` when the provider has no usable record, `FetchFailed` when
    /// the request fails.
    pub async fn detail(&self, id: &str) -> Result<VenueDetail, DiscoveryError> {
        self.source.fetch_detail(id).await
    }
}
