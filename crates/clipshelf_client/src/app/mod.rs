//! Client-side state for the clipboard history view.
//!
//! [`ClipShelfApp`] owns every piece of UI state and talks to the backend worker
//! only through channels, so no call on it ever blocks on gateway I/O. A driver
//! (the console loop, or a test) calls [`ClipShelfApp::tick`] repeatedly; each
//! tick drains backend events, fires the search debounce, and runs the sync loop.

mod cache;
mod mutations;
mod preview;
pub mod render;
mod settings;
mod state_accessors;
mod state_feedback;
mod state_ops;
mod view;
mod visibility;

pub use cache::ClipCache;
pub use mutations::PendingConfirm;
pub use preview::PreviewSession;
pub use view::ViewContext;
pub use visibility::{UnlockDialog, VisibilityGate};

use crate::backend::{BackendHandle, CoreCmd};
use clipshelf_core::models::{CategoryInfoMap, CategorySettings, ThemeSettings};
use clipshelf_core::Config;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::warn;

/// Period of the background sync loop.
pub const SYNC_INTERVAL: Duration = Duration::from_millis(2000);
/// Quiet period after the last search keystroke before a search is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
/// Characters of clip content shown on a card before truncation.
pub const CARD_PREVIEW_CHARS: usize = 200;
/// Shown instead of the content of a masked password clip.
pub const MASKED_PLACEHOLDER: &str = "•••••••• (locked)";

const STATUS_TTL: Duration = Duration::from_secs(5);
const TOAST_TTL: Duration = Duration::from_secs(4);
const TOAST_LIMIT: usize = 4;
const PERF_LOG_INTERVAL: Duration = Duration::from_secs(30);

/// Clipboard history client state.
///
/// All mutation goes through methods on this type; rendering reads it via
/// [`ClipShelfApp::render`] and never changes it.
pub struct ClipShelfApp {
    backend: BackendHandle,
    config: Config,
    cache: ClipCache,
    view: ViewContext,
    category_info: CategoryInfoMap,
    category_settings: CategorySettings,
    theme: ThemeSettings,
    gate: VisibilityGate,
    passkey_set: bool,
    unlock_dialog: UnlockDialog,
    preview: PreviewSession,
    pending_confirm: PendingConfirm,
    sync: SyncState,
    search_last_input_at: Option<Instant>,
    next_request_id: u64,
    latest_view_request: u64,
    request_sent_at: Option<(u64, Instant)>,
    last_export_path: Option<PathBuf>,
    last_export_bytes: Option<usize>,
    status: Option<StatusMessage>,
    toasts: VecDeque<ToastMessage>,
    query_perf: QueryPerfCounters,
    perf_log_enabled: bool,
    last_perf_log_at: Instant,
}

#[derive(Debug)]
struct SyncState {
    last_tick_at: Instant,
    poll_in_flight: Option<u64>,
}

/// Why a listing fetch was issued; used for counters and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchReason {
    Startup,
    Poll,
    CategorySwitch,
    Search,
    SearchCleared,
    Reload,
}

impl FetchReason {
    fn label(self) -> &'static str {
        match self {
            Self::Startup => "Initial load",
            Self::Poll => "Sync",
            Self::CategorySwitch => "Category load",
            Self::Search => "Search",
            Self::SearchCleared => "Category load",
            Self::Reload => "Refresh",
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
struct ToastMessage {
    text: String,
    expires_at: Instant,
}

/// Counters for listing traffic, logged periodically when perf logging is on.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryPerfCounters {
    pub fetches_sent: u64,
    pub results_applied: u64,
    pub stale_drops: u64,
    pub unchanged_polls: u64,
    pub polls_sent: u64,
    pub polls_suppressed: u64,
    pub polls_skipped_in_flight: u64,
    pub searches_sent: u64,
    pub search_skipped_debounce: u64,
    pub last_roundtrip_ms: Option<u64>,
}

impl ClipShelfApp {
    /// Builds the app and queues the startup loads.
    ///
    /// Session info (category colors, capture settings, password state, theme)
    /// and the unfiltered listing are requested immediately; their results
    /// arrive on later ticks.
    pub fn new(backend: BackendHandle, config: Config) -> Self {
        let now = Instant::now();
        let perf_log_enabled = config.sync_perf_log;
        let mut app = Self {
            backend,
            config,
            cache: ClipCache::default(),
            view: ViewContext::default(),
            category_info: CategoryInfoMap::new(),
            category_settings: CategorySettings::new(),
            theme: ThemeSettings::default(),
            gate: VisibilityGate::Locked,
            passkey_set: false,
            unlock_dialog: UnlockDialog::Closed,
            preview: PreviewSession::Closed,
            pending_confirm: PendingConfirm::None,
            sync: SyncState {
                last_tick_at: now,
                poll_in_flight: None,
            },
            search_last_input_at: None,
            next_request_id: 0,
            latest_view_request: 0,
            request_sent_at: None,
            last_export_path: None,
            last_export_bytes: None,
            status: None,
            toasts: VecDeque::new(),
            query_perf: QueryPerfCounters::default(),
            perf_log_enabled,
            last_perf_log_at: now,
        };
        if app.backend.cmd_tx.send(CoreCmd::LoadSessionInfo).is_err() {
            warn!("backend unavailable at startup");
            app.set_status("Backend unavailable.");
        }
        app.dispatch_fetch(app.view.scope(), None, FetchReason::Startup);
        app
    }

    /// Advances the app using the current instant.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advances the app as of `now`.
    ///
    /// Drains every pending backend event, then fires a due search debounce and
    /// a due sync tick, in that order.
    pub fn tick_at(&mut self, now: Instant) {
        self.expire_feedback(now);
        while let Ok(event) = self.backend.evt_rx.try_recv() {
            self.apply_event(event);
        }
        self.maybe_dispatch_search(now);
        self.maybe_sync_tick(now);
        self.maybe_log_perf(now);
    }
}

#[cfg(test)]
mod tests;
