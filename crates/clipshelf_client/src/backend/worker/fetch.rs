//! Listing/search fetches for the backend worker.

use super::{report_failure, WorkerState};
use crate::backend::{ClipScope, CoreErrorSource, CoreEvent};
use clipshelf_core::models::CategoryFilter;
use std::time::Instant;
use tracing::debug;

pub(super) fn handle_fetch_clips(
    state: &mut WorkerState,
    request_id: u64,
    scope: ClipScope,
    known_revision: Option<u64>,
    limit: usize,
) {
    let started = Instant::now();
    // Read the revision before listing: a capture racing the listing then
    // shows up as a newer revision on the next poll instead of being missed.
    let revision = match state.gateway.data_revision() {
        Ok(revision) => revision,
        Err(err) => {
            report_failure(
                state,
                CoreErrorSource::FetchClips { request_id, scope },
                "Load",
                err,
            );
            return;
        }
    };
    if known_revision == Some(revision) {
        debug!(request_id, revision, "clip listing unchanged");
        let _ = state
            .evt_tx
            .send(CoreEvent::ClipsUnchanged { request_id, scope });
        return;
    }

    let result = match &scope {
        ClipScope::Category(CategoryFilter::All) => state.gateway.get_all_clips(limit),
        ClipScope::Category(CategoryFilter::Only(category)) => {
            state.gateway.get_clips_by_category(*category, limit)
        }
        ClipScope::Search(query) => state.gateway.search_clips(query, limit),
    };
    match result {
        Ok(items) => {
            debug!(
                request_id,
                revision,
                items = items.len(),
                elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
                "clip listing fetched"
            );
            let _ = state.evt_tx.send(CoreEvent::ClipsLoaded {
                request_id,
                scope,
                revision,
                items,
            });
        }
        Err(err) => {
            let label = match scope {
                ClipScope::Search(_) => "Search",
                ClipScope::Category(_) => "Load",
            };
            report_failure(
                state,
                CoreErrorSource::FetchClips { request_id, scope },
                label,
                err,
            );
        }
    }
}
