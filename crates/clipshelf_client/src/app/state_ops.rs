//! State transitions for backend events and listing fetches.

mod search;
mod sync;

use super::{ClipShelfApp, FetchReason};
use crate::backend::{ClipScope, CoreCmd, CoreErrorSource, CoreEvent};
use clipshelf_core::models::Clip;
use std::time::Instant;
use tracing::{debug, warn};

impl ClipShelfApp {
    pub(super) fn apply_event(&mut self, event: CoreEvent) {
        match event {
            CoreEvent::CategoryInfoLoaded { info } => {
                self.category_info = info;
            }
            CoreEvent::CategorySettingsLoaded { settings } => {
                self.category_settings = settings;
            }
            CoreEvent::PasswordStateLoaded {
                locked,
                passkey_set,
            } => self.apply_password_state(locked, passkey_set),
            CoreEvent::ThemeLoaded { theme } => {
                self.theme = theme;
            }
            CoreEvent::ClipsLoaded {
                request_id,
                scope,
                revision,
                items,
            } => self.apply_clips_loaded(request_id, scope, revision, items),
            CoreEvent::ClipsUnchanged { request_id, .. } => {
                self.finish_request(request_id);
                self.query_perf.unchanged_polls = self.query_perf.unchanged_polls.saturating_add(1);
            }
            CoreEvent::ActionApplied { id, action } => self.handle_action_applied(id, action),
            CoreEvent::ClipContentSaved { clip } => self.handle_content_saved(clip),
            CoreEvent::ClipAdded { id, category } => self.handle_clip_added(id, category),
            CoreEvent::CategoryToggled { category, enabled } => {
                self.category_settings.insert(category, enabled);
            }
            CoreEvent::PasskeySetup { accepted } => self.handle_passkey_setup(accepted),
            CoreEvent::PasskeyVerified { verified } => self.handle_passkey_verified(verified),
            CoreEvent::PasswordsLocked => self.handle_passwords_locked(),
            CoreEvent::CleanupFinished { removed } => self.handle_cleanup_finished(removed),
            CoreEvent::ExportReady { json } => self.handle_export_ready(json),
            CoreEvent::ExportWritten { path } => self.handle_export_written(path),
            CoreEvent::ThemeSaved { theme } => {
                debug!(mode = theme.mode.as_str(), style = %theme.style, "theme saved");
            }
            CoreEvent::Error { source, message } => self.apply_error(source, message),
        }
    }

    fn apply_error(&mut self, source: CoreErrorSource, message: String) {
        match source {
            CoreErrorSource::FetchClips { request_id, scope } => {
                self.finish_request(request_id);
                if request_id < self.latest_view_request {
                    debug!(request_id, ?scope, "ignoring failure of superseded fetch");
                    return;
                }
                warn!("clip fetch failed: {}", message);
                self.set_status(message);
            }
            CoreErrorSource::SaveContent { id, conflict } => {
                self.handle_save_failed(id, conflict, message);
            }
            CoreErrorSource::Passkey => self.handle_passkey_failed(message),
            CoreErrorSource::Action { .. }
            | CoreErrorSource::SessionInfo
            | CoreErrorSource::AddClip
            | CoreErrorSource::Settings
            | CoreErrorSource::Maintenance
            | CoreErrorSource::Theme => {
                warn!("backend error: {}", message);
                self.set_status(message);
            }
        }
    }

    fn apply_clips_loaded(
        &mut self,
        request_id: u64,
        scope: ClipScope,
        revision: u64,
        items: Vec<Clip>,
    ) {
        self.finish_request(request_id);
        if request_id < self.latest_view_request {
            self.query_perf.stale_drops = self.query_perf.stale_drops.saturating_add(1);
            debug!(
                request_id,
                latest = self.latest_view_request,
                "dropping stale clip listing"
            );
            return;
        }
        self.query_perf.results_applied = self.query_perf.results_applied.saturating_add(1);
        self.cache.replace_from(scope, revision, items);
        self.sync_preview_with_cache();
    }

    fn finish_request(&mut self, request_id: u64) {
        if self.sync.poll_in_flight == Some(request_id) {
            self.sync.poll_in_flight = None;
        }
        if let Some((sent_id, sent_at)) = self.request_sent_at {
            if sent_id == request_id {
                self.query_perf.last_roundtrip_ms =
                    Some(u64::try_from(sent_at.elapsed().as_millis()).unwrap_or(u64::MAX));
                self.request_sent_at = None;
            }
        }
    }

    /// Sends a listing fetch and marks it as the newest view request.
    ///
    /// # Returns
    /// The request id, or `None` when the backend channel is closed.
    pub(super) fn dispatch_fetch(
        &mut self,
        scope: ClipScope,
        known_revision: Option<u64>,
        reason: FetchReason,
    ) -> Option<u64> {
        let request_id = self.next_request_id.saturating_add(1);
        let limit = match scope {
            ClipScope::Search(_) => self.config.search_limit,
            ClipScope::Category(_) => self.config.list_limit,
        };
        let searching = matches!(scope, ClipScope::Search(_));
        let command = CoreCmd::FetchClips {
            request_id,
            scope,
            known_revision,
            limit,
        };
        if self.backend.cmd_tx.send(command).is_err() {
            warn!("{} failed: backend channel closed", reason.label());
            self.set_status(format!("{} failed: backend unavailable.", reason.label()));
            return None;
        }
        self.next_request_id = request_id;
        self.latest_view_request = request_id;
        self.request_sent_at = Some((request_id, Instant::now()));
        self.query_perf.fetches_sent = self.query_perf.fetches_sent.saturating_add(1);
        if reason == FetchReason::Poll {
            self.query_perf.polls_sent = self.query_perf.polls_sent.saturating_add(1);
        }
        if searching {
            self.query_perf.searches_sent = self.query_perf.searches_sent.saturating_add(1);
        }
        debug!(request_id, ?reason, "clip fetch dispatched");
        Some(request_id)
    }

    /// Refetches whatever the current view shows.
    pub(super) fn reload_view(&mut self) {
        self.dispatch_fetch(self.view.scope(), None, FetchReason::Reload);
    }

    /// Forces a full reload of the current view.
    pub fn request_refresh(&mut self) {
        self.reload_view();
    }
}
