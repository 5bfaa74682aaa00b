//! Category selection and debounced search.

use crate::app::{ClipShelfApp, FetchReason, SEARCH_DEBOUNCE};
use clipshelf_core::models::CategoryFilter;
use std::time::Instant;

impl ClipShelfApp {
    /// Records new search text; the search itself waits for the debounce.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.set_search_query_at(query, Instant::now());
    }

    /// Like [`ClipShelfApp::set_search_query`] with an explicit input instant.
    pub fn set_search_query_at(&mut self, query: impl Into<String>, now: Instant) {
        let query = query.into();
        if query == self.view.search_query {
            return;
        }
        self.view.search_query = query;
        self.search_last_input_at = Some(now);
    }

    /// Issues the pending search once the input has been quiet for
    /// [`SEARCH_DEBOUNCE`].
    ///
    /// Blank text reverts the view to the active category.
    pub(in crate::app) fn maybe_dispatch_search(&mut self, now: Instant) {
        let Some(last_input_at) = self.search_last_input_at else {
            return;
        };
        if now.saturating_duration_since(last_input_at) < SEARCH_DEBOUNCE {
            self.query_perf.search_skipped_debounce =
                self.query_perf.search_skipped_debounce.saturating_add(1);
            return;
        }
        self.search_last_input_at = None;
        let reason = if self.view.is_searching() {
            FetchReason::Search
        } else {
            FetchReason::SearchCleared
        };
        self.dispatch_fetch(self.view.scope(), None, reason);
    }

    /// Switches the category filter and fetches it right away.
    ///
    /// Any search text is cleared and a pending debounce is dropped, so the
    /// category becomes the data source again.
    pub fn select_category(&mut self, filter: CategoryFilter) {
        self.view.active_category = filter;
        self.view.search_query.clear();
        self.search_last_input_at = None;
        self.dispatch_fetch(self.view.scope(), None, FetchReason::CategorySwitch);
    }
}
