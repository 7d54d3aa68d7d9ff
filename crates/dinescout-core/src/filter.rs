//! User-controlled list state, passed explicitly into [`crate::query`].

use crate::venue::VenueCategory;

/// Category selector value; `All` disables the category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(VenueCategory),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, category: VenueCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    #[must_use]
    pub const fn display_label(self) -> &'static str {
        match self {
            Self::All => "Tout voir",
            Self::Only(category) => category.display_label(),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse::<VenueCategory>().map(Self::Only)
        }
    }
}

/// Rating sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    RatingDesc,
    RatingAsc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desc" | "rating-desc" => Ok(Self::RatingDesc),
            "asc" | "rating-asc" => Ok(Self::RatingAsc),
            other => Err(format!("unknown sort order '{other}' (expected desc or asc)")),
        }
    }
}

/// Search text, category, sort order and current page.
///
/// Changing search text, category or sort through the setters moves the
/// page back to 1. `page` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    search_text: String,
    category: CategoryFilter,
    sort: SortOrder,
    page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category: CategoryFilter::All,
            sort: SortOrder::RatingDesc,
            page: 1,
        }
    }
}

impl FilterState {
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    #[must_use]
    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.search_text {
            self.search_text = text;
            self.page = 1;
        }
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        if category != self.category {
            self.category = category;
            self.page = 1;
        }
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        if sort != self.sort {
            self.sort = sort;
            self.page = 1;
        }
    }

    /// Selects a page; `0` is treated as `1`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    #[must_use]
    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.set_search_text(text);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.set_category(category);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.set_sort(sort);
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }
}
