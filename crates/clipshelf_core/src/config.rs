//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_CLEANUP_DAYS, DEFAULT_LIST_CLIPS_LIMIT, DEFAULT_SEARCH_CLIPS_LIMIT};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for ClipShelf.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub export_dir: String,
    pub list_limit: usize,
    pub search_limit: usize,
    pub cleanup_days: u32,
    pub demo_seed: bool,
    pub sync_perf_log: bool,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    std::env::current_dir().ok()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values resolve to `default`.
pub fn env_flag_or(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(default)
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env_flag_or(name, false)
}

fn env_number<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            export_dir: env::var("CLIPSHELF_EXPORT_DIR")
                .map(expand_tilde)
                .unwrap_or_else(|_| {
                    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
                    home.join(".cache")
                        .join("clipshelf")
                        .join("exports")
                        .to_string_lossy()
                        .to_string()
                }),
            list_limit: env_number("CLIPSHELF_LIST_LIMIT", DEFAULT_LIST_CLIPS_LIMIT).max(1),
            search_limit: env_number("CLIPSHELF_SEARCH_LIMIT", DEFAULT_SEARCH_CLIPS_LIMIT).max(1),
            cleanup_days: env_number("CLIPSHELF_CLEANUP_DAYS", DEFAULT_CLEANUP_DAYS),
            demo_seed: env_flag_or("CLIPSHELF_DEMO_SEED", true),
            sync_perf_log: env_flag_enabled("CLIPSHELF_SYNC_PERF_LOG"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: ".".to_string(),
            list_limit: DEFAULT_LIST_CLIPS_LIMIT,
            search_limit: DEFAULT_SEARCH_CLIPS_LIMIT,
            cleanup_days: DEFAULT_CLEANUP_DAYS,
            demo_seed: false,
            sync_perf_log: false,
        }
    }
}
