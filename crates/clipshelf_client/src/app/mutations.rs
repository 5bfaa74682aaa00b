//! Per-clip actions and the confirmation step for destructive ones.

use super::ClipShelfApp;
use crate::backend::{ClipAction, CoreCmd};
use clipshelf_core::models::ClipId;
use tracing::{debug, warn};

/// A destructive operation waiting for the user to confirm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PendingConfirm {
    #[default]
    None,
    DeleteClip {
        id: ClipId,
    },
    Cleanup {
        days: u32,
    },
}

impl PendingConfirm {
    /// Question shown to the user.
    pub fn prompt(self) -> Option<String> {
        match self {
            Self::None => None,
            Self::DeleteClip { .. } => Some("Delete this clip?".to_string()),
            Self::Cleanup { days } => Some(format!(
                "Delete all unpinned clips older than {} days?",
                days
            )),
        }
    }
}

impl ClipShelfApp {
    /// Requests an action on a clip.
    ///
    /// Delete only arms a confirmation; everything else is sent immediately.
    pub fn request_action(&mut self, id: ClipId, action: ClipAction) {
        if action == ClipAction::Delete {
            self.pending_confirm = PendingConfirm::DeleteClip { id };
            return;
        }
        self.send_action(id, action);
    }

    /// Runs the armed destructive operation.
    pub fn confirm_pending(&mut self) {
        match std::mem::take(&mut self.pending_confirm) {
            PendingConfirm::None => {}
            PendingConfirm::DeleteClip { id } => self.send_action(id, ClipAction::Delete),
            PendingConfirm::Cleanup { days } => {
                if self
                    .backend
                    .cmd_tx
                    .send(CoreCmd::CleanupOldClips { days })
                    .is_err()
                {
                    self.set_status("Cleanup failed: backend unavailable.");
                }
            }
        }
    }

    /// Drops the armed operation without touching the backend.
    pub fn cancel_pending(&mut self) {
        self.pending_confirm = PendingConfirm::None;
    }

    fn send_action(&mut self, id: ClipId, action: ClipAction) {
        if self
            .backend
            .cmd_tx
            .send(CoreCmd::ApplyAction { id, action })
            .is_err()
        {
            warn!(id, ?action, "backend channel closed");
            self.set_status(format!("{} failed: backend unavailable.", action.label()));
        }
    }

    pub(super) fn handle_action_applied(&mut self, id: ClipId, action: ClipAction) {
        debug!(id, ?action, "clip action applied");
        match action {
            ClipAction::Copy => self.notify("Copied to clipboard!"),
            ClipAction::Delete => {
                if self.preview.clip().map(|clip| clip.id) == Some(id) {
                    self.close_preview();
                }
                self.reload_view();
            }
            ClipAction::TogglePin | ClipAction::ToggleFavorite => self.reload_view(),
        }
    }
}
