//! Clip categories, category filters, and category display metadata.

use crate::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fixed classification assigned to every clip by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Url,
    Email,
    Phone,
    Password,
    Code,
    Text,
}

impl Category {
    /// Every category in sidebar order.
    pub const ALL: [Category; 6] = [
        Category::Url,
        Category::Email,
        Category::Phone,
        Category::Password,
        Category::Code,
        Category::Text,
    ];

    /// Wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Password => "password",
            Self::Code => "code",
            Self::Text => "text",
        }
    }

    /// Parse a category name, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value))
    }

    /// Backend palette color for the category.
    pub fn default_color(self) -> &'static str {
        match self {
            Self::Url => "#3B82F6",
            Self::Email => "#10B981",
            Self::Phone => "#F59E0B",
            Self::Password => "#EF4444",
            Self::Code => "#8B5CF6",
            Self::Text => FALLBACK_CATEGORY_COLOR,
        }
    }

    /// Backend palette icon for the category.
    pub fn default_icon(self) -> &'static str {
        match self {
            Self::Url => "🔗",
            Self::Email => "📧",
            Self::Phone => "📞",
            Self::Password => "🔒",
            Self::Code => "💻",
            Self::Text => FALLBACK_CATEGORY_ICON,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| AppError::BadRequest(format!("unknown category '{}'", value)))
    }
}

/// Category half of the view context: everything, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Wire name; `"all"` for the unfiltered view.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }

    /// Parse `"all"` or a category name.
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        Category::parse(value).map(Self::Only)
    }

    /// Whether a clip of `category` belongs to this filter.
    pub fn includes(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fallback color for categories missing from the loaded info map.
pub const FALLBACK_CATEGORY_COLOR: &str = "#6B7280";
/// Fallback icon for categories missing from the loaded info map.
pub const FALLBACK_CATEGORY_ICON: &str = "📝";

/// Rendering metadata for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub color: String,
    pub icon: String,
}

impl CategoryInfo {
    /// Info used when the backend did not describe a category.
    pub fn fallback() -> Self {
        Self {
            color: FALLBACK_CATEGORY_COLOR.to_string(),
            icon: FALLBACK_CATEGORY_ICON.to_string(),
        }
    }

    /// The backend's built-in palette entry for `category`.
    pub fn for_category(category: Category) -> Self {
        Self {
            color: category.default_color().to_string(),
            icon: category.default_icon().to_string(),
        }
    }
}

/// Category display metadata keyed by category, loaded once per session.
pub type CategoryInfoMap = BTreeMap<Category, CategoryInfo>;

/// Capture-enabled flag per category.
pub type CategorySettings = BTreeMap<Category, bool>;
