//! Clip records mirrored from the backend.

use super::category::Category;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned clip identifier.
pub type ClipId = i64;

/// One captured or manually added clipboard entry.
///
/// The client never creates or destroys clips; it only mirrors what the
/// backend returns for the active view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    pub id: ClipId,
    pub content: String,
    pub category: Category,
    /// Creation instant on the backend clock, UTC without an offset on the wire.
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_pinned: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_favorite: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_encrypted: bool,
    /// Bumped by the backend on every mutation of this clip.
    #[serde(default)]
    pub revision: u64,
}

impl Clip {
    /// Build an unpinned, unfavorited clip stamped with the current time.
    pub fn new(id: ClipId, content: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            content: content.into(),
            category,
            timestamp: Utc::now().naive_utc(),
            is_pinned: false,
            is_favorite: false,
            is_encrypted: false,
            revision: 0,
        }
    }

    /// Creation instant interpreted as UTC.
    pub fn timestamp_utc(&self) -> DateTime<Utc> {
        self.timestamp.and_utc()
    }

    /// Whether this clip belongs to the passkey-gated category.
    pub fn is_password(&self) -> bool {
        self.category == Category::Password
    }
}

/// Parse a backend timestamp in either `T`-separated or space-separated form.
///
/// # Errors
/// Returns the parse error from the `T`-separated attempt when neither form matches.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|err| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f").map_err(|_| err))
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(de::Error::custom)
    }
}

// SQLite-backed gateways report flags as 0/1.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    })
}
