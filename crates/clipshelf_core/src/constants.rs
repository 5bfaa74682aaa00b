//! Shared constants used across ClipShelf crates.

/// Default number of clips returned by list/category fetches.
pub const DEFAULT_LIST_CLIPS_LIMIT: usize = 100;
/// Default upper bound for search result sets.
pub const DEFAULT_SEARCH_CLIPS_LIMIT: usize = 50;
/// Upper bound on clips included in a JSON export.
pub const DEFAULT_EXPORT_LIMIT: usize = 10_000;

/// Default age threshold, in days, for the cleanup action.
pub const DEFAULT_CLEANUP_DAYS: u32 = 30;

/// Minimum accepted passkey length for the password category.
pub const MIN_PASSKEY_LEN: usize = 4;

/// File name prefix for exports written by the backend.
pub const EXPORT_FILE_PREFIX: &str = "clipboard_export";
