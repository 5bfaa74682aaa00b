//! Data models exchanged with the backend gateway.

/// Category enum, filters, and per-category rendering info.
pub mod category;
/// Clip records and timestamp handling.
pub mod clip;
/// Theme mode/style catalog and persisted settings.
pub mod theme;

pub use category::{Category, CategoryFilter, CategoryInfo, CategoryInfoMap, CategorySettings};
pub use clip::{Clip, ClipId};
pub use theme::{ThemeMode, ThemeSettings, ThemeStyle};
