//! Periodic background sync of the unfiltered listing.

use crate::app::{ClipShelfApp, FetchReason, PERF_LOG_INTERVAL, SYNC_INTERVAL};
use crate::backend::ClipScope;
use std::time::Instant;
use tracing::{debug, info};

impl ClipShelfApp {
    /// Runs one sync tick when [`SYNC_INTERVAL`] has elapsed.
    ///
    /// A tick refreshes the cache only while the view is unfiltered with no
    /// search text. A tick that finds the previous poll still unanswered is
    /// skipped rather than queued, so slow backends never accumulate polls.
    pub(in crate::app) fn maybe_sync_tick(&mut self, now: Instant) {
        if now.saturating_duration_since(self.sync.last_tick_at) < SYNC_INTERVAL {
            return;
        }
        self.sync.last_tick_at = now;

        if !self.view.allows_sync() {
            self.query_perf.polls_suppressed = self.query_perf.polls_suppressed.saturating_add(1);
            return;
        }
        if let Some(request_id) = self.sync.poll_in_flight {
            self.query_perf.polls_skipped_in_flight =
                self.query_perf.polls_skipped_in_flight.saturating_add(1);
            debug!(request_id, "previous sync poll still in flight; skipping tick");
            return;
        }
        let scope = ClipScope::all();
        let known_revision = self.cache.revision_for(&scope);
        self.sync.poll_in_flight = self.dispatch_fetch(scope, known_revision, FetchReason::Poll);
    }

    pub(in crate::app) fn maybe_log_perf(&mut self, now: Instant) {
        if !self.perf_log_enabled
            || now.saturating_duration_since(self.last_perf_log_at) < PERF_LOG_INTERVAL
        {
            return;
        }
        self.last_perf_log_at = now;
        let perf = &self.query_perf;
        info!(
            target: "clipshelf_client::perf",
            fetches_sent = perf.fetches_sent,
            results_applied = perf.results_applied,
            stale_drops = perf.stale_drops,
            unchanged_polls = perf.unchanged_polls,
            polls_sent = perf.polls_sent,
            polls_suppressed = perf.polls_suppressed,
            polls_skipped_in_flight = perf.polls_skipped_in_flight,
            searches_sent = perf.searches_sent,
            search_skipped_debounce = perf.search_skipped_debounce,
            last_roundtrip_ms = perf.last_roundtrip_ms,
            "listing sync perf"
        );
    }
}
