//! Backend gateway contract.
//!
//! Everything the client knows about capture, persistence, and passkey storage
//! goes through [`ClipGateway`]. Implementations are driven from the client's
//! backend worker thread, one call at a time.

mod memory;

pub use memory::MemoryGateway;

use crate::models::{
    Category, CategoryInfoMap, CategorySettings, Clip, ClipId, ThemeMode, ThemeSettings,
};
use crate::AppError;
use std::path::PathBuf;

/// Operations exposed by the clipboard-history backend.
///
/// Every method may fail; callers treat failures as "state unchanged".
pub trait ClipGateway: Send {
    /// Monotonic counter bumped whenever any clip is added, changed, or removed.
    fn data_revision(&self) -> Result<u64, AppError>;

    fn get_category_info(&self) -> Result<CategoryInfoMap, AppError>;

    /// Newest clips across every category, pinned clips first.
    fn get_all_clips(&self, limit: usize) -> Result<Vec<Clip>, AppError>;

    fn get_clips_by_category(&self, category: Category, limit: usize)
        -> Result<Vec<Clip>, AppError>;

    /// Substring search over clip content, newest first.
    fn search_clips(&self, query: &str, limit: usize) -> Result<Vec<Clip>, AppError>;

    /// Flip the pinned flag.
    ///
    /// # Returns
    /// The new pinned state.
    fn toggle_pin(&self, id: ClipId) -> Result<bool, AppError>;

    /// Flip the favorite flag.
    ///
    /// # Returns
    /// The new favorite state.
    fn toggle_favorite(&self, id: ClipId) -> Result<bool, AppError>;

    /// # Returns
    /// `true` when a clip was removed.
    fn delete_clip(&self, id: ClipId) -> Result<bool, AppError>;

    /// Place the clip's content on the system clipboard.
    ///
    /// # Returns
    /// `false` when the backend could not produce the content (e.g. locked).
    fn copy_clip(&self, id: ClipId) -> Result<bool, AppError>;

    /// Replace a clip's content.
    ///
    /// When `expected_revision` is set and no longer matches the stored
    /// revision, the write is refused with [`AppError::Conflict`].
    ///
    /// # Returns
    /// The clip as stored after the update.
    fn update_clip_content(
        &self,
        id: ClipId,
        content: &str,
        expected_revision: Option<u64>,
    ) -> Result<Clip, AppError>;

    /// Store a user-entered snippet.
    fn manual_add_clip(&self, content: &str, category: Category) -> Result<ClipId, AppError>;

    fn get_category_settings(&self) -> Result<CategorySettings, AppError>;

    fn set_category_enabled(&self, category: Category, enabled: bool) -> Result<(), AppError>;

    fn is_password_locked(&self) -> Result<bool, AppError>;

    fn is_passkey_set(&self) -> Result<bool, AppError>;

    /// # Returns
    /// `false` when a passkey already exists.
    fn setup_passkey(&self, passkey: &str) -> Result<bool, AppError>;

    /// # Returns
    /// `true` when the passkey matched and the password category is now unlocked.
    fn verify_passkey(&self, passkey: &str) -> Result<bool, AppError>;

    fn lock_passwords(&self) -> Result<(), AppError>;

    /// Delete unpinned clips older than `days`.
    ///
    /// # Returns
    /// Number of clips removed.
    fn cleanup_old_clips(&self, days: u32) -> Result<usize, AppError>;

    /// Serialized JSON snapshot of the history.
    fn export_clips(&self) -> Result<String, AppError>;

    /// Write the JSON snapshot to disk.
    ///
    /// # Returns
    /// Path of the written file.
    fn export_clips_to_file(&self) -> Result<PathBuf, AppError>;

    fn get_theme_settings(&self) -> Result<ThemeSettings, AppError>;

    fn set_theme(&self, mode: ThemeMode, style: &str) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests;
