//! Capture settings, manual snippets, maintenance, and theme.

use super::{ClipShelfApp, PendingConfirm};
use crate::backend::CoreCmd;
use clipshelf_core::models::{Category, ClipId, ThemeMode, ThemeSettings};
use std::path::PathBuf;
use tracing::{debug, info};

impl ClipShelfApp {
    /// Turns capture of one category on or off.
    pub fn set_category_capture(&mut self, category: Category, enabled: bool) {
        if self
            .backend
            .cmd_tx
            .send(CoreCmd::SetCategoryEnabled { category, enabled })
            .is_err()
        {
            self.set_status("Settings update failed: backend unavailable.");
        }
    }

    /// Stores a snippet typed by the user.
    pub fn add_snippet(&mut self, content: &str, category: Category) {
        let content = content.trim();
        if content.is_empty() {
            self.set_status("Please enter a snippet to add.");
            return;
        }
        let command = CoreCmd::ManualAddClip {
            content: content.to_string(),
            category,
        };
        if self.backend.cmd_tx.send(command).is_err() {
            self.set_status("Add snippet failed: backend unavailable.");
        }
    }

    /// Arms the cleanup of old unpinned clips using the configured age.
    pub fn request_cleanup(&mut self) {
        self.pending_confirm = PendingConfirm::Cleanup {
            days: self.config.cleanup_days,
        };
    }

    /// Requests the JSON export blob.
    pub fn export_clips(&mut self) {
        if self.backend.cmd_tx.send(CoreCmd::ExportClips).is_err() {
            self.set_status("Export failed: backend unavailable.");
        }
    }

    /// Requests a JSON export written to the export directory.
    pub fn export_clips_to_file(&mut self) {
        if self.backend.cmd_tx.send(CoreCmd::ExportClipsToFile).is_err() {
            self.set_status("Export failed: backend unavailable.");
        }
    }

    /// Switches light/dark, keeping the style when the new mode offers it.
    pub fn switch_theme_mode(&mut self, mode: ThemeMode) {
        let theme = self.theme.with_mode(mode);
        self.apply_theme(theme);
    }

    pub fn toggle_theme_mode(&mut self) {
        self.switch_theme_mode(self.theme.mode.toggled());
    }

    /// Picks a style from the current mode's catalog.
    pub fn select_theme_style(&mut self, style: &str) {
        match self.theme.with_style(style) {
            Ok(theme) => self.apply_theme(theme),
            Err(err) => self.set_status(format!("Theme not changed: {}", err)),
        }
    }

    /// Applies a theme locally, then persists it.
    fn apply_theme(&mut self, theme: ThemeSettings) {
        if theme == self.theme {
            return;
        }
        self.theme = theme.clone();
        if self
            .backend
            .cmd_tx
            .send(CoreCmd::SetTheme { theme })
            .is_err()
        {
            self.set_status("Theme not saved: backend unavailable.");
        }
    }

    pub(super) fn handle_clip_added(&mut self, id: ClipId, category: Category) {
        debug!(id, category = category.as_str(), "snippet added");
        self.notify("Snippet added!");
        if self.view.active_category.includes(category) {
            self.reload_view();
        }
    }

    pub(super) fn handle_cleanup_finished(&mut self, removed: usize) {
        self.notify(format!(
            "Deleted {} old clip{}",
            removed,
            if removed == 1 { "" } else { "s" }
        ));
        self.reload_view();
    }

    pub(super) fn handle_export_ready(&mut self, json: String) {
        self.last_export_bytes = Some(json.len());
        self.notify(format!("Clips exported ({} bytes)", json.len()));
    }

    pub(super) fn handle_export_written(&mut self, path: PathBuf) {
        info!(path = %path.display(), "export written");
        self.set_status(format!("Export completed! File saved at: {}", path.display()));
        self.last_export_path = Some(path);
    }
}
