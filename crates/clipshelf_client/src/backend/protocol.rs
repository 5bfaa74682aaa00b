//! Protocol types for the backend worker.

use clipshelf_core::models::{
    Category, CategoryFilter, CategoryInfoMap, CategorySettings, Clip, ClipId, ThemeSettings,
};
use std::path::PathBuf;

/// Which slice of history a fetch targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipScope {
    /// Everything in a category filter (`All` or one category).
    Category(CategoryFilter),
    /// Backend search results for a query, ignoring the category filter.
    Search(String),
}

impl ClipScope {
    /// The unfiltered listing the sync loop refreshes.
    pub fn all() -> Self {
        Self::Category(CategoryFilter::All)
    }
}

/// Per-clip mutations offered on every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipAction {
    TogglePin,
    ToggleFavorite,
    Delete,
    Copy,
}

impl ClipAction {
    /// Human label used in status messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::TogglePin => "Pin",
            Self::ToggleFavorite => "Favorite",
            Self::Delete => "Delete",
            Self::Copy => "Copy",
        }
    }
}

/// Commands issued by the UI thread for the backend worker to execute.
#[derive(Debug)]
pub enum CoreCmd {
    /// Load category info, capture settings, password state, and theme.
    LoadSessionInfo,
    /// Fetch a full snapshot for `scope`.
    ///
    /// With `known_revision` set, the worker answers [`CoreEvent::ClipsUnchanged`]
    /// instead of refetching when the backend revision still matches.
    FetchClips {
        request_id: u64,
        scope: ClipScope,
        known_revision: Option<u64>,
        limit: usize,
    },
    /// Pin/favorite/delete/copy one clip.
    ApplyAction { id: ClipId, action: ClipAction },
    /// Persist edited content, guarded by the revision the edit started from.
    UpdateClipContent {
        id: ClipId,
        content: String,
        base_revision: Option<u64>,
    },
    /// Store a user-entered snippet.
    ManualAddClip { content: String, category: Category },
    SetCategoryEnabled { category: Category, enabled: bool },
    SetupPasskey { passkey: String },
    VerifyPasskey { passkey: String },
    LockPasswords,
    CleanupOldClips { days: u32 },
    ExportClips,
    ExportClipsToFile,
    SetTheme { theme: ThemeSettings },
}

/// Identifies which in-flight request a backend failure belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreErrorSource {
    SessionInfo,
    FetchClips { request_id: u64, scope: ClipScope },
    Action { id: ClipId, action: ClipAction },
    SaveContent { id: ClipId, conflict: bool },
    AddClip,
    Settings,
    Passkey,
    Maintenance,
    Theme,
}

/// Events produced by the backend worker and drained by the UI thread.
#[derive(Debug)]
pub enum CoreEvent {
    CategoryInfoLoaded { info: CategoryInfoMap },
    CategorySettingsLoaded { settings: CategorySettings },
    PasswordStateLoaded { locked: bool, passkey_set: bool },
    ThemeLoaded { theme: ThemeSettings },
    /// Snapshot for a fetch, tagged with the backend revision read before listing.
    ClipsLoaded {
        request_id: u64,
        scope: ClipScope,
        revision: u64,
        items: Vec<Clip>,
    },
    /// The backend revision matched `known_revision`; nothing was listed.
    ClipsUnchanged { request_id: u64, scope: ClipScope },
    ActionApplied { id: ClipId, action: ClipAction },
    ClipContentSaved { clip: Clip },
    ClipAdded { id: ClipId, category: Category },
    CategoryToggled { category: Category, enabled: bool },
    PasskeySetup { accepted: bool },
    PasskeyVerified { verified: bool },
    PasswordsLocked,
    CleanupFinished { removed: usize },
    ExportReady { json: String },
    ExportWritten { path: PathBuf },
    ThemeSaved { theme: ThemeSettings },
    /// A backend failure occurred.
    Error {
        source: CoreErrorSource,
        message: String,
    },
}
