//! Theme catalog and persisted theme settings.

use crate::AppError;
use serde::{Deserialize, Serialize};

/// Light or dark presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// One entry in a mode's style catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub preview: &'static str,
}

const fn style(id: &'static str, name: &'static str, preview: &'static str) -> ThemeStyle {
    ThemeStyle { id, name, preview }
}

const LIGHT_STYLES: &[ThemeStyle] = &[
    style("sunrise", "Sunrise", "🌅"),
    style("mint", "Mint Fresh", "🌿"),
    style("peach", "Peach Blossom", "🍑"),
    style("cotton", "Cotton Candy", "🍭"),
    style("sky", "Sky Breeze", "☁️"),
    style("lemonade", "Lemonade", "🍋"),
    style("vanilla", "Vanilla Cream", "🍦"),
    style("rainbow", "Pastel Rainbow", "🌈"),
    style("ocean", "Ocean Foam", "🌊"),
    style("lily", "Lily Garden", "🌸"),
];

const DARK_STYLES: &[ThemeStyle] = &[
    style("midnight", "Midnight Blue", "🌃"),
    style("crimson", "Crimson Night", "🌹"),
    style("charcoal", "Charcoal", "⬛"),
    style("emerald", "Emerald Dark", "💚"),
    style("amethyst", "Amethyst", "💜"),
    style("slate", "Slate", "🌫️"),
    style("burnt", "Burnt Orange", "🔥"),
    style("cosmic", "Cosmic Black", "✨"),
    style("deepocean", "Deep Ocean", "🐋"),
    style("mystic", "Mystic Berry", "🔮"),
];

impl ThemeMode {
    /// Wire name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse `light` / `dark`, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Styles offered for this mode, in display order.
    pub fn catalog(self) -> &'static [ThemeStyle] {
        match self {
            Self::Light => LIGHT_STYLES,
            Self::Dark => DARK_STYLES,
        }
    }

    /// Look up a style id in this mode's catalog.
    pub fn style(self, id: &str) -> Option<&'static ThemeStyle> {
        self.catalog().iter().find(|style| style.id == id)
    }

    fn default_style(self) -> &'static ThemeStyle {
        &self.catalog()[0]
    }
}

/// Persisted presentation settings. Purely cosmetic; never touches clip data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSettings {
    pub mode: ThemeMode,
    pub style: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Light,
            style: ThemeMode::Light.default_style().id.to_string(),
        }
    }
}

impl ThemeSettings {
    /// Whether the style belongs to the mode's catalog.
    pub fn is_valid(&self) -> bool {
        self.mode.style(&self.style).is_some()
    }

    /// Repair a stored pair whose style is not in the mode's catalog.
    pub fn normalized(mut self) -> Self {
        if !self.is_valid() {
            let lowered = self.style.trim().to_ascii_lowercase();
            self.style = match self.mode.style(&lowered) {
                Some(style) => style.id.to_string(),
                None => self.mode.default_style().id.to_string(),
            };
        }
        self
    }

    /// Switch mode, keeping the style when the new mode offers it.
    pub fn with_mode(&self, mode: ThemeMode) -> Self {
        Self {
            mode,
            style: self.style.clone(),
        }
        .normalized()
    }

    /// Select a style from the current mode's catalog.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] when the style is not offered for the mode.
    pub fn with_style(&self, style: &str) -> Result<Self, AppError> {
        let entry = self.mode.style(style.trim()).ok_or_else(|| {
            AppError::BadRequest(format!(
                "style '{}' is not available in {} mode",
                style.trim(),
                self.mode.as_str()
            ))
        })?;
        Ok(Self {
            mode: self.mode,
            style: entry.id.to_string(),
        })
    }
}
