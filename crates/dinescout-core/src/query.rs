//! Client-side search, filter, sort and pagination over a venue list.
//!
//! [`query`] is a pure function of the venue slice and the
//! [`FilterState`]; calling it twice with the same inputs yields the same
//! page.

use crate::filter::{FilterState, SortOrder};
use crate::venue::Venue;

/// Venues per page in the list view.
pub const PAGE_SIZE: usize = 12;

/// Maximum number of page buttons shown in the pagination strip.
const MAX_VISIBLE_PAGES: usize = 5;

/// One page of filtered results.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage {
    pub items: Vec<Venue>,
    /// The page that was requested (always ≥ 1).
    pub page: usize,
    pub total_pages: usize,
    /// Number of venues that passed search and category filtering.
    pub total_matches: usize,
}

/// Runs the list pipeline: name search, category filter, stable rating
/// sort, then a [`PAGE_SIZE`] slice.
///
/// A page past the end yields an empty `items` vector.
#[must_use]
pub fn query(venues: &[Venue], filter: &FilterState) -> QueryPage {
    let needle = filter.search_text().to_lowercase();
    let category = filter.category();

    let mut matches: Vec<&Venue> = venues
        .iter()
        .filter(|v| v.name.to_lowercase().contains(&needle))
        .filter(|v| category.matches(v.category))
        .collect();

    // `sort_by` is stable, so equal ratings keep their input order.
    match filter.sort() {
        SortOrder::RatingDesc => matches.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortOrder::RatingAsc => matches.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
    }

    let total_matches = matches.len();
    let page = filter.page().max(1);
    let start = (page - 1).saturating_mul(PAGE_SIZE);

    let items = matches
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    QueryPage {
        items,
        page,
        total_pages: total_matches.div_ceil(PAGE_SIZE),
        total_matches,
    }
}

/// Page numbers rendered in the pagination strip: the first
/// `min(5, total_pages)` pages. Empty when there is a single page or none.
#[must_use]
pub fn visible_pages(total_pages: usize) -> Vec<usize> {
    if total_pages <= 1 {
        return Vec::new();
    }
    (1..=total_pages.min(MAX_VISIBLE_PAGES)).collect()
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
