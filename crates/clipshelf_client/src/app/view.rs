//! Which slice of history is on screen.

use crate::backend::ClipScope;
use clipshelf_core::models::CategoryFilter;

/// The active category filter plus the search text.
///
/// A query that is not blank overrides the category as the data source until
/// it is cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewContext {
    pub active_category: CategoryFilter,
    pub search_query: String,
}

impl ViewContext {
    /// Whether the search text decides the displayed set.
    pub fn is_searching(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    /// The fetch that reproduces this view.
    pub fn scope(&self) -> ClipScope {
        if self.is_searching() {
            ClipScope::Search(self.search_query.clone())
        } else {
            ClipScope::Category(self.active_category)
        }
    }

    /// Whether the sync loop may refresh this view: unfiltered and no search text.
    pub fn allows_sync(&self) -> bool {
        self.active_category == CategoryFilter::All && self.search_query.is_empty()
    }
}
