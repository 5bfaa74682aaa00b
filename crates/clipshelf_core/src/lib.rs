//! Core domain library for ClipShelf (config, models, backend gateway contract).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across ClipShelf crates.
pub mod constants;
/// Process-global environment helpers for tests.
pub mod env;
/// Application error type shared by the gateway and the client.
pub mod error;
/// Backend gateway contract and the in-memory reference backend.
pub mod gateway;
/// Clip, category and theme models.
pub mod models;

pub use config::Config;
pub use constants::{
    DEFAULT_CLEANUP_DAYS, DEFAULT_EXPORT_LIMIT, DEFAULT_LIST_CLIPS_LIMIT,
    DEFAULT_SEARCH_CLIPS_LIMIT, MIN_PASSKEY_LEN,
};
pub use error::AppError;
pub use gateway::{ClipGateway, MemoryGateway};
