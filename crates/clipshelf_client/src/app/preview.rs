//! Full-content preview and in-place editing of a single clip.

use super::ClipShelfApp;
use crate::backend::{ClipAction, CoreCmd};
use clipshelf_core::models::{Clip, ClipId};
use tracing::{debug, warn};

/// The single preview/edit slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreviewSession {
    #[default]
    Closed,
    Viewing {
        clip: Clip,
    },
    Editing {
        clip: Clip,
        /// Content when editing began; saves compare against this, not the cache.
        baseline: String,
        /// Revision when editing began; sent so concurrent writes are detected.
        baseline_revision: u64,
        pending: String,
        save_in_flight: bool,
        /// Set on entering edit mode; the driver consumes it to move focus
        /// into the editor.
        focus_editor: bool,
    },
}

impl PreviewSession {
    /// The clip bound to the session, if any.
    pub fn clip(&self) -> Option<&Clip> {
        match self {
            Self::Closed => None,
            Self::Viewing { clip } | Self::Editing { clip, .. } => Some(clip),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }
}

impl ClipShelfApp {
    /// Opens the full-content view for a cached clip.
    ///
    /// # Returns
    /// `false` when the clip is unknown, masked, or another clip is being edited.
    pub fn open_preview(&mut self, id: ClipId) -> bool {
        if self.preview.is_editing() {
            self.set_status("Finish or cancel the current edit first.");
            return false;
        }
        let Some(clip) = self.cache.get(id) else {
            debug!(id, "preview requested for clip not in view");
            return false;
        };
        if self.gate.masks(clip) {
            return false;
        }
        self.preview = PreviewSession::Viewing { clip: clip.clone() };
        true
    }

    /// A plain click on a card: opens the preview unless the clip is masked.
    pub fn activate_card(&mut self, id: ClipId) -> bool {
        self.open_preview(id)
    }

    /// Switches from viewing to editing, seeding the editor with the content.
    pub fn begin_edit(&mut self) {
        let PreviewSession::Viewing { clip } = &self.preview else {
            return;
        };
        let clip = clip.clone();
        self.preview = PreviewSession::Editing {
            baseline: clip.content.clone(),
            baseline_revision: clip.revision,
            pending: clip.content.clone(),
            save_in_flight: false,
            focus_editor: true,
            clip,
        };
    }

    /// Consumes the pending editor focus request.
    ///
    /// # Returns
    /// `true` once after [`ClipShelfApp::begin_edit`], then `false`.
    pub fn take_editor_focus(&mut self) -> bool {
        match &mut self.preview {
            PreviewSession::Editing { focus_editor, .. } => std::mem::take(focus_editor),
            _ => false,
        }
    }

    /// Replaces the pending edit text.
    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        if let PreviewSession::Editing {
            pending,
            save_in_flight: false,
            ..
        } = &mut self.preview
        {
            *pending = text.into();
        }
    }

    /// Discards pending edits and returns to viewing.
    pub fn cancel_edit(&mut self) {
        if let PreviewSession::Editing { clip, .. } = &self.preview {
            self.preview = PreviewSession::Viewing { clip: clip.clone() };
        }
    }

    /// Saves the pending edit.
    ///
    /// Blank text is rejected locally; text identical to the baseline just
    /// leaves editing. Anything else is sent with the baseline revision.
    pub fn save_edit(&mut self) {
        let PreviewSession::Editing {
            clip,
            baseline,
            baseline_revision,
            pending,
            save_in_flight,
            ..
        } = &mut self.preview
        else {
            return;
        };
        if *save_in_flight {
            return;
        }
        let content = pending.trim().to_string();
        if content.is_empty() {
            self.set_status("Content cannot be empty.");
            return;
        }
        if content == *baseline {
            let clip = clip.clone();
            self.preview = PreviewSession::Viewing { clip };
            return;
        }
        *save_in_flight = true;
        let command = CoreCmd::UpdateClipContent {
            id: clip.id,
            content,
            base_revision: Some(*baseline_revision),
        };
        if self.backend.cmd_tx.send(command).is_err() {
            if let PreviewSession::Editing { save_in_flight, .. } = &mut self.preview {
                *save_in_flight = false;
            }
            self.set_status("Save failed: backend unavailable.");
        }
    }

    /// Closes the preview, discarding any pending edit.
    pub fn close_preview(&mut self) {
        self.preview = PreviewSession::Closed;
    }

    /// Copies the previewed clip through the backend.
    pub fn copy_preview(&mut self) {
        if let Some(id) = self.preview.clip().map(|clip| clip.id) {
            self.request_action(id, ClipAction::Copy);
        }
    }

    pub(super) fn handle_content_saved(&mut self, saved: Clip) {
        self.cache.apply_saved(&saved);
        let bound = self.preview.clip().map(|clip| clip.id) == Some(saved.id);
        if bound {
            self.preview = PreviewSession::Viewing {
                clip: saved.clone(),
            };
        }
        self.notify("Clip updated!");
        self.reload_view();
    }

    pub(super) fn handle_save_failed(&mut self, id: ClipId, conflict: bool, message: String) {
        warn!(id, conflict, "clip save failed: {}", message);
        if let PreviewSession::Editing {
            clip,
            save_in_flight,
            ..
        } = &mut self.preview
        {
            if clip.id == id {
                *save_in_flight = false;
            }
        }
        self.set_status(message);
    }

    /// Keeps a read-only preview in step with a fresh snapshot.
    ///
    /// An editing session keeps its own copy until saved or cancelled.
    pub(super) fn sync_preview_with_cache(&mut self) {
        if let PreviewSession::Viewing { clip } = &mut self.preview {
            if let Some(fresh) = self.cache.get(clip.id) {
                if *fresh != *clip {
                    *clip = fresh.clone();
                }
            }
        }
        let masked = self.preview.clip().is_some_and(|clip| self.gate.masks(clip));
        if masked {
            self.preview = PreviewSession::Closed;
        }
    }
}
