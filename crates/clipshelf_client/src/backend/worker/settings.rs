//! Session info, passkey, export, and theme handlers for the backend worker.

use super::{report_failure, WorkerState};
use crate::backend::{CoreErrorSource, CoreEvent};
use clipshelf_core::models::{Category, ThemeSettings};
use tracing::info;

/// Loads everything the client needs before the first render.
///
/// Each piece reports independently so one failing call does not hide the rest.
pub(super) fn handle_load_session_info(state: &mut WorkerState) {
    match state.gateway.get_category_info() {
        Ok(info) => {
            let _ = state.evt_tx.send(CoreEvent::CategoryInfoLoaded { info });
        }
        Err(err) => report_failure(
            state,
            CoreErrorSource::SessionInfo,
            "Load category info",
            err,
        ),
    }
    match state.gateway.get_category_settings() {
        Ok(settings) => {
            let _ = state
                .evt_tx
                .send(CoreEvent::CategorySettingsLoaded { settings });
        }
        Err(err) => report_failure(state, CoreErrorSource::SessionInfo, "Load settings", err),
    }
    let password_state = state.gateway.is_password_locked().and_then(|locked| {
        state
            .gateway
            .is_passkey_set()
            .map(|passkey_set| (locked, passkey_set))
    });
    match password_state {
        Ok((locked, passkey_set)) => {
            let _ = state.evt_tx.send(CoreEvent::PasswordStateLoaded {
                locked,
                passkey_set,
            });
        }
        Err(err) => report_failure(
            state,
            CoreErrorSource::SessionInfo,
            "Load password state",
            err,
        ),
    }
    match state.gateway.get_theme_settings() {
        Ok(theme) => {
            let _ = state.evt_tx.send(CoreEvent::ThemeLoaded {
                theme: theme.normalized(),
            });
        }
        Err(err) => report_failure(state, CoreErrorSource::Theme, "Load theme", err),
    }
}

pub(super) fn handle_set_category_enabled(
    state: &mut WorkerState,
    category: Category,
    enabled: bool,
) {
    match state.gateway.set_category_enabled(category, enabled) {
        Ok(()) => {
            let _ = state
                .evt_tx
                .send(CoreEvent::CategoryToggled { category, enabled });
        }
        Err(err) => report_failure(state, CoreErrorSource::Settings, "Update settings", err),
    }
}

pub(super) fn handle_setup_passkey(state: &mut WorkerState, passkey: String) {
    match state.gateway.setup_passkey(passkey.as_str()) {
        Ok(accepted) => {
            info!(accepted, "passkey setup finished");
            let _ = state.evt_tx.send(CoreEvent::PasskeySetup { accepted });
        }
        Err(err) => report_failure(state, CoreErrorSource::Passkey, "Passkey setup", err),
    }
}

pub(super) fn handle_verify_passkey(state: &mut WorkerState, passkey: String) {
    match state.gateway.verify_passkey(passkey.as_str()) {
        Ok(verified) => {
            let _ = state.evt_tx.send(CoreEvent::PasskeyVerified { verified });
        }
        Err(err) => report_failure(state, CoreErrorSource::Passkey, "Unlock", err),
    }
}

pub(super) fn handle_lock_passwords(state: &mut WorkerState) {
    match state.gateway.lock_passwords() {
        Ok(()) => {
            let _ = state.evt_tx.send(CoreEvent::PasswordsLocked);
        }
        Err(err) => report_failure(state, CoreErrorSource::Passkey, "Lock", err),
    }
}

pub(super) fn handle_export(state: &mut WorkerState) {
    match state.gateway.export_clips() {
        Ok(json) => {
            let _ = state.evt_tx.send(CoreEvent::ExportReady { json });
        }
        Err(err) => report_failure(state, CoreErrorSource::Maintenance, "Export", err),
    }
}

pub(super) fn handle_export_to_file(state: &mut WorkerState) {
    match state.gateway.export_clips_to_file() {
        Ok(path) => {
            info!(path = %path.display(), "exported clips");
            let _ = state.evt_tx.send(CoreEvent::ExportWritten { path });
        }
        Err(err) => report_failure(state, CoreErrorSource::Maintenance, "Export", err),
    }
}

pub(super) fn handle_set_theme(state: &mut WorkerState, theme: ThemeSettings) {
    match state.gateway.set_theme(theme.mode, theme.style.as_str()) {
        Ok(()) => {
            let _ = state.evt_tx.send(CoreEvent::ThemeSaved { theme });
        }
        Err(err) => report_failure(state, CoreErrorSource::Theme, "Save theme", err),
    }
}
