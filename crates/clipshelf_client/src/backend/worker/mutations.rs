//! Clip mutation handlers for the backend worker.

use super::{report_failure, send_error, WorkerState};
use crate::backend::{ClipAction, CoreErrorSource, CoreEvent};
use clipshelf_core::models::{Category, ClipId};
use clipshelf_core::AppError;
use tracing::{error, info};

pub(super) fn handle_apply_action(state: &mut WorkerState, id: ClipId, action: ClipAction) {
    let source = CoreErrorSource::Action { id, action };
    let result = match action {
        ClipAction::TogglePin => state.gateway.toggle_pin(id).map(|_| true),
        ClipAction::ToggleFavorite => state.gateway.toggle_favorite(id).map(|_| true),
        ClipAction::Delete => state.gateway.delete_clip(id),
        ClipAction::Copy => state.gateway.copy_clip(id),
    };
    match result {
        Ok(true) => {
            let _ = state.evt_tx.send(CoreEvent::ActionApplied { id, action });
        }
        Ok(false) => {
            let reason = match action {
                ClipAction::Copy => "clip content unavailable",
                _ => "clip not found",
            };
            send_error(
                &state.evt_tx,
                source,
                format!("{} failed: {}", action.label(), reason),
            );
        }
        Err(err) => report_failure(state, source, action.label(), err),
    }
}

pub(super) fn handle_update_content(
    state: &mut WorkerState,
    id: ClipId,
    content: String,
    base_revision: Option<u64>,
) {
    match state
        .gateway
        .update_clip_content(id, content.as_str(), base_revision)
    {
        Ok(clip) => {
            let _ = state.evt_tx.send(CoreEvent::ClipContentSaved { clip });
        }
        Err(err) => {
            let conflict = err.is_conflict();
            let message = match &err {
                AppError::Conflict { .. } => {
                    "Clip changed since editing started; reopen it to see the latest content."
                        .to_string()
                }
                other => format!("Failed to update clip: {}", other),
            };
            error!("backend update failed: {}", err);
            send_error(
                &state.evt_tx,
                CoreErrorSource::SaveContent { id, conflict },
                message,
            );
        }
    }
}

pub(super) fn handle_manual_add(state: &mut WorkerState, content: String, category: Category) {
    match state.gateway.manual_add_clip(content.as_str(), category) {
        Ok(id) => {
            let _ = state.evt_tx.send(CoreEvent::ClipAdded { id, category });
        }
        Err(err) => report_failure(state, CoreErrorSource::AddClip, "Add snippet", err),
    }
}

pub(super) fn handle_cleanup(state: &mut WorkerState, days: u32) {
    match state.gateway.cleanup_old_clips(days) {
        Ok(removed) => {
            info!(days, removed, "cleaned up old clips");
            let _ = state.evt_tx.send(CoreEvent::CleanupFinished { removed });
        }
        Err(err) => report_failure(state, CoreErrorSource::Maintenance, "Cleanup", err),
    }
}
