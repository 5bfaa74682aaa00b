//! Read-only accessors used by drivers, rendering, and tests.

use super::{
    ClipCache, ClipShelfApp, PendingConfirm, PreviewSession, QueryPerfCounters, UnlockDialog,
    ViewContext, VisibilityGate,
};
use clipshelf_core::models::{CategoryInfoMap, CategorySettings, ThemeSettings};
use std::path::Path;

impl ClipShelfApp {
    pub fn cache(&self) -> &ClipCache {
        &self.cache
    }

    pub fn view(&self) -> &ViewContext {
        &self.view
    }

    pub fn gate(&self) -> VisibilityGate {
        self.gate
    }

    pub fn passkey_set(&self) -> bool {
        self.passkey_set
    }

    pub fn unlock_dialog(&self) -> &UnlockDialog {
        &self.unlock_dialog
    }

    pub fn preview(&self) -> &PreviewSession {
        &self.preview
    }

    pub fn pending_confirm(&self) -> PendingConfirm {
        self.pending_confirm
    }

    pub fn category_info(&self) -> &CategoryInfoMap {
        &self.category_info
    }

    pub fn category_settings(&self) -> &CategorySettings {
        &self.category_settings
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    /// Current status banner text, if it has not expired.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Live toast texts, oldest first.
    pub fn toast_texts(&self) -> Vec<&str> {
        self.toasts.iter().map(|toast| toast.text.as_str()).collect()
    }

    pub fn last_export_path(&self) -> Option<&Path> {
        self.last_export_path.as_deref()
    }

    pub fn last_export_bytes(&self) -> Option<usize> {
        self.last_export_bytes
    }

    pub fn query_perf(&self) -> &QueryPerfCounters {
        &self.query_perf
    }

    /// Whether a sync poll is awaiting its answer.
    pub fn poll_in_flight(&self) -> bool {
        self.sync.poll_in_flight.is_some()
    }
}
