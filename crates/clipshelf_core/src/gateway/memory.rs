//! In-memory backend used by the binary and by tests.
//!
//! Mirrors the observable behavior of the capture service: listings are
//! pinned-first then newest-first, search is a case-insensitive substring
//! match, toggles report the new flag, and cleanup never removes pinned clips.

use super::ClipGateway;
use crate::constants::{DEFAULT_EXPORT_LIMIT, EXPORT_FILE_PREFIX, MIN_PASSKEY_LEN};
use crate::models::{
    Category, CategoryInfo, CategoryInfoMap, CategorySettings, Clip, ClipId, ThemeMode,
    ThemeSettings,
};
use crate::AppError;
use chrono::{Duration as ChronoDuration, NaiveDateTime, Utc};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

#[derive(Debug)]
struct MemoryState {
    clips: Vec<Clip>,
    next_id: ClipId,
    revision: u64,
    category_settings: CategorySettings,
    passkey_digest: Option<String>,
    password_locked: bool,
    theme: ThemeSettings,
    clipboard: Option<String>,
    offline: bool,
    export_dir: PathBuf,
    calls: Vec<&'static str>,
}

impl MemoryState {
    fn find_mut(&mut self, id: ClipId) -> Result<&mut Clip, AppError> {
        self.clips
            .iter_mut()
            .find(|clip| clip.id == id)
            .ok_or(AppError::NotFound)
    }

    fn insert(&mut self, content: String, category: Category, timestamp: NaiveDateTime) -> ClipId {
        let id = self.next_id;
        self.next_id += 1;
        let mut clip = Clip::new(id, content, category);
        clip.timestamp = timestamp;
        clip.is_encrypted = category == Category::Password && self.passkey_digest.is_some();
        self.clips.push(clip);
        self.revision += 1;
        id
    }

    fn listing(&self, filter: impl Fn(&Clip) -> bool, limit: usize) -> Vec<Clip> {
        let mut out: Vec<Clip> = self.clips.iter().filter(|clip| filter(clip)).cloned().collect();
        out.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then(b.timestamp.cmp(&a.timestamp))
                .then(b.id.cmp(&a.id))
        });
        out.truncate(limit);
        out
    }
}

fn passkey_digest(passkey: &str) -> String {
    blake3::hash(passkey.as_bytes()).to_hex().to_string()
}

/// Shareable in-memory [`ClipGateway`].
///
/// Clones share state, so a test can hand one clone to the backend worker and
/// keep another to simulate clipboard captures happening outside the UI.
#[derive(Debug, Clone)]
pub struct MemoryGateway {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryGateway {
    /// Create an empty backend that writes exports into `export_dir`.
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        let category_settings = Category::ALL.into_iter().map(|c| (c, true)).collect();
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                clips: Vec::new(),
                next_id: 1,
                revision: 0,
                category_settings,
                passkey_digest: None,
                password_locked: true,
                theme: ThemeSettings::default(),
                clipboard: None,
                offline: false,
                export_dir: export_dir.into(),
                calls: Vec::new(),
            })),
        }
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, MemoryState>, AppError> {
        self.state
            .lock()
            .map_err(|_| AppError::Gateway("memory backend state poisoned".to_string()))
    }

    fn call<T>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut MemoryState) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut state = self.lock_state()?;
        state.calls.push(op);
        if state.offline {
            return Err(AppError::Gateway(format!("{}: backend unreachable", op)));
        }
        f(&mut state)
    }

    /// Record a clipboard capture, as the monitoring service would.
    ///
    /// Empty content, disabled categories, and exact duplicates are ignored.
    ///
    /// # Returns
    /// The new clip id, or `None` when the capture was skipped.
    pub fn capture(&self, content: &str, category: Category) -> Option<ClipId> {
        self.capture_at(content, category, Utc::now().naive_utc())
    }

    /// Like [`MemoryGateway::capture`] with an explicit creation instant.
    pub fn capture_at(
        &self,
        content: &str,
        category: Category,
        timestamp: NaiveDateTime,
    ) -> Option<ClipId> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        let mut state = self.lock_state().ok()?;
        if !state.category_settings.get(&category).copied().unwrap_or(true) {
            debug!("capture skipped: category '{}' disabled", category);
            return None;
        }
        if state.clips.iter().any(|clip| clip.content == content) {
            return None;
        }
        Some(state.insert(content.to_string(), category, timestamp))
    }

    /// Populate a handful of sample clips spread over the last few days.
    pub fn seed_demo(&self) {
        let now = Utc::now().naive_utc();
        let samples: [(&str, Category, i64); 7] = [
            ("https://docs.rs/crossbeam-channel", Category::Url, 3 * 24 * 60),
            ("team@example.com", Category::Email, 2 * 24 * 60),
            ("+1 (555) 010-4477", Category::Phone, 26 * 60),
            ("wifi password: correct-horse-battery", Category::Password, 5 * 60),
            ("fn main() {\n    println!(\"hello\");\n}\n", Category::Code, 45),
            ("Remember to rotate the staging certificates", Category::Text, 12),
            ("Lunch at noon?", Category::Text, 1),
        ];
        for (content, category, minutes_ago) in samples {
            let _ = self.capture_at(content, category, now - ChronoDuration::minutes(minutes_ago));
        }
        info!("memory backend seeded with {} demo clips", samples.len());
    }

    /// Make every subsequent gateway call fail (or succeed again).
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.lock_state() {
            state.offline = offline;
        }
    }

    /// Last content placed on the simulated system clipboard.
    pub fn clipboard_contents(&self) -> Option<String> {
        self.lock_state().ok().and_then(|state| state.clipboard.clone())
    }

    /// Names of gateway operations invoked so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock_state()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }

    /// Number of times `op` has been invoked.
    pub fn call_count(&self, op: &str) -> usize {
        self.calls().iter().filter(|name| **name == op).count()
    }
}

impl ClipGateway for MemoryGateway {
    fn data_revision(&self) -> Result<u64, AppError> {
        self.call("data_revision", |state| Ok(state.revision))
    }

    fn get_category_info(&self) -> Result<CategoryInfoMap, AppError> {
        self.call("get_category_info", |_| {
            Ok(Category::ALL
                .into_iter()
                .map(|category| (category, CategoryInfo::for_category(category)))
                .collect())
        })
    }

    fn get_all_clips(&self, limit: usize) -> Result<Vec<Clip>, AppError> {
        self.call("get_all_clips", |state| Ok(state.listing(|_| true, limit)))
    }

    fn get_clips_by_category(
        &self,
        category: Category,
        limit: usize,
    ) -> Result<Vec<Clip>, AppError> {
        self.call("get_clips_by_category", |state| {
            Ok(state.listing(|clip| clip.category == category, limit))
        })
    }

    fn search_clips(&self, query: &str, limit: usize) -> Result<Vec<Clip>, AppError> {
        self.call("search_clips", |state| {
            let needle = query.to_lowercase();
            let mut out: Vec<Clip> = state
                .clips
                .iter()
                .filter(|clip| clip.content.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
            out.truncate(limit);
            Ok(out)
        })
    }

    fn toggle_pin(&self, id: ClipId) -> Result<bool, AppError> {
        self.call("toggle_pin", |state| {
            let clip = state.find_mut(id)?;
            clip.is_pinned = !clip.is_pinned;
            clip.revision += 1;
            let pinned = clip.is_pinned;
            state.revision += 1;
            Ok(pinned)
        })
    }

    fn toggle_favorite(&self, id: ClipId) -> Result<bool, AppError> {
        self.call("toggle_favorite", |state| {
            let clip = state.find_mut(id)?;
            clip.is_favorite = !clip.is_favorite;
            clip.revision += 1;
            let favorite = clip.is_favorite;
            state.revision += 1;
            Ok(favorite)
        })
    }

    fn delete_clip(&self, id: ClipId) -> Result<bool, AppError> {
        self.call("delete_clip", |state| {
            let before = state.clips.len();
            state.clips.retain(|clip| clip.id != id);
            let removed = state.clips.len() != before;
            if removed {
                state.revision += 1;
            }
            Ok(removed)
        })
    }

    fn copy_clip(&self, id: ClipId) -> Result<bool, AppError> {
        self.call("copy_clip", |state| {
            let locked = state.password_locked;
            let Some(clip) = state.clips.iter().find(|clip| clip.id == id) else {
                return Ok(false);
            };
            if clip.is_encrypted && locked {
                return Ok(false);
            }
            state.clipboard = Some(clip.content.clone());
            Ok(true)
        })
    }

    fn update_clip_content(
        &self,
        id: ClipId,
        content: &str,
        expected_revision: Option<u64>,
    ) -> Result<Clip, AppError> {
        self.call("update_clip_content", |state| {
            if content.trim().is_empty() {
                return Err(AppError::BadRequest("content cannot be empty".to_string()));
            }
            let clip = state.find_mut(id)?;
            if let Some(expected) = expected_revision {
                if clip.revision != expected {
                    return Err(AppError::Conflict {
                        id,
                        expected,
                        actual: clip.revision,
                    });
                }
            }
            clip.content = content.to_string();
            clip.revision += 1;
            let updated = clip.clone();
            state.revision += 1;
            Ok(updated)
        })
    }

    fn manual_add_clip(&self, content: &str, category: Category) -> Result<ClipId, AppError> {
        self.call("manual_add_clip", |state| {
            let content = content.trim();
            if content.is_empty() {
                return Err(AppError::BadRequest("snippet cannot be empty".to_string()));
            }
            Ok(state.insert(content.to_string(), category, Utc::now().naive_utc()))
        })
    }

    fn get_category_settings(&self) -> Result<CategorySettings, AppError> {
        self.call("get_category_settings", |state| Ok(state.category_settings.clone()))
    }

    fn set_category_enabled(&self, category: Category, enabled: bool) -> Result<(), AppError> {
        self.call("set_category_enabled", |state| {
            state.category_settings.insert(category, enabled);
            Ok(())
        })
    }

    fn is_password_locked(&self) -> Result<bool, AppError> {
        self.call("is_password_locked", |state| Ok(state.password_locked))
    }

    fn is_passkey_set(&self) -> Result<bool, AppError> {
        self.call("is_passkey_set", |state| Ok(state.passkey_digest.is_some()))
    }

    fn setup_passkey(&self, passkey: &str) -> Result<bool, AppError> {
        self.call("setup_passkey", |state| {
            if state.passkey_digest.is_some() {
                return Ok(false);
            }
            if passkey.chars().count() < MIN_PASSKEY_LEN {
                return Err(AppError::BadRequest(format!(
                    "passkey must be at least {} characters",
                    MIN_PASSKEY_LEN
                )));
            }
            state.passkey_digest = Some(passkey_digest(passkey));
            state.password_locked = false;
            Ok(true)
        })
    }

    fn verify_passkey(&self, passkey: &str) -> Result<bool, AppError> {
        self.call("verify_passkey", |state| {
            let matches = state
                .passkey_digest
                .as_deref()
                .is_some_and(|digest| digest == passkey_digest(passkey));
            if matches {
                state.password_locked = false;
            }
            Ok(matches)
        })
    }

    fn lock_passwords(&self) -> Result<(), AppError> {
        self.call("lock_passwords", |state| {
            state.password_locked = true;
            Ok(())
        })
    }

    fn cleanup_old_clips(&self, days: u32) -> Result<usize, AppError> {
        self.call("cleanup_old_clips", |state| {
            // An age past the calendar range keeps everything.
            let cutoff = Utc::now()
                .naive_utc()
                .checked_sub_signed(ChronoDuration::days(i64::from(days)))
                .unwrap_or(NaiveDateTime::MIN);
            let before = state.clips.len();
            state
                .clips
                .retain(|clip| clip.is_pinned || clip.timestamp >= cutoff);
            let removed = before - state.clips.len();
            if removed > 0 {
                state.revision += 1;
            }
            Ok(removed)
        })
    }

    fn export_clips(&self) -> Result<String, AppError> {
        self.call("export_clips", |state| {
            let clips = state.listing(|_| true, DEFAULT_EXPORT_LIMIT);
            Ok(serde_json::to_string_pretty(&clips)?)
        })
    }

    fn export_clips_to_file(&self) -> Result<PathBuf, AppError> {
        self.call("export_clips_to_file", |state| {
            let clips = state.listing(|_| true, DEFAULT_EXPORT_LIMIT);
            let payload = serde_json::to_string_pretty(&clips)?;
            std::fs::create_dir_all(&state.export_dir)?;
            let stamp = Utc::now().format("%Y%m%d_%H%M%S");
            let mut path = state
                .export_dir
                .join(format!("{}_{}.json", EXPORT_FILE_PREFIX, stamp));
            let mut suffix = 1;
            while path.exists() {
                path = state
                    .export_dir
                    .join(format!("{}_{}_{}.json", EXPORT_FILE_PREFIX, stamp, suffix));
                suffix += 1;
            }
            std::fs::write(&path, payload)?;
            info!("exported {} clips to {}", clips.len(), path.display());
            Ok(path)
        })
    }

    fn get_theme_settings(&self) -> Result<ThemeSettings, AppError> {
        self.call("get_theme_settings", |state| Ok(state.theme.clone()))
    }

    fn set_theme(&self, mode: ThemeMode, style: &str) -> Result<(), AppError> {
        self.call("set_theme", |state| {
            let theme = ThemeSettings {
                mode,
                style: style.to_string(),
            };
            if !theme.is_valid() {
                return Err(AppError::BadRequest(format!(
                    "style '{}' is not available in {} mode",
                    style,
                    mode.as_str()
                )));
            }
            state.theme = theme;
            Ok(())
        })
    }
}
