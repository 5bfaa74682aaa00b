//! Background worker thread for gateway access.

mod fetch;
mod mutations;
mod settings;

use crate::backend::{CoreCmd, CoreErrorSource, CoreEvent};
use clipshelf_core::ClipGateway;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread;
use tracing::{debug, error};

/// Handle for sending commands to, and receiving events from, the backend worker.
pub struct BackendHandle {
    pub cmd_tx: Sender<CoreCmd>,
    pub evt_rx: Receiver<CoreEvent>,
}

impl BackendHandle {
    /// Wraps caller-owned channels so app tests can script backend traffic.
    pub fn from_test_channels(cmd_tx: Sender<CoreCmd>, evt_rx: Receiver<CoreEvent>) -> Self {
        Self { cmd_tx, evt_rx }
    }
}

pub(super) struct WorkerState {
    pub(super) gateway: Box<dyn ClipGateway>,
    pub(super) evt_tx: Sender<CoreEvent>,
}

pub(super) fn send_error(evt_tx: &Sender<CoreEvent>, source: CoreErrorSource, message: String) {
    let _ = evt_tx.send(CoreEvent::Error { source, message });
}

/// Spawn the backend worker thread that performs blocking gateway calls.
///
/// Commands are handled strictly in arrival order, so a mutation followed by
/// a reload observes the mutation.
///
/// # Returns
/// A [`BackendHandle`] containing the command sender and event receiver.
///
/// # Errors
/// Returns an error if the worker thread cannot be spawned.
pub fn spawn_backend<G>(gateway: G) -> std::io::Result<BackendHandle>
where
    G: ClipGateway + 'static,
{
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();

    let mut state = WorkerState {
        gateway: Box::new(gateway),
        evt_tx,
    };
    thread::Builder::new()
        .name("clipshelf-backend".to_string())
        .spawn(move || {
            for cmd in cmd_rx.iter() {
                dispatch(&mut state, cmd);
            }
            debug!("backend command channel closed; worker exiting");
        })?;

    Ok(BackendHandle { cmd_tx, evt_rx })
}

fn dispatch(state: &mut WorkerState, cmd: CoreCmd) {
    match cmd {
        CoreCmd::LoadSessionInfo => settings::handle_load_session_info(state),
        CoreCmd::FetchClips {
            request_id,
            scope,
            known_revision,
            limit,
        } => fetch::handle_fetch_clips(state, request_id, scope, known_revision, limit),
        CoreCmd::ApplyAction { id, action } => mutations::handle_apply_action(state, id, action),
        CoreCmd::UpdateClipContent {
            id,
            content,
            base_revision,
        } => mutations::handle_update_content(state, id, content, base_revision),
        CoreCmd::ManualAddClip { content, category } => {
            mutations::handle_manual_add(state, content, category)
        }
        CoreCmd::SetCategoryEnabled { category, enabled } => {
            settings::handle_set_category_enabled(state, category, enabled)
        }
        CoreCmd::SetupPasskey { passkey } => settings::handle_setup_passkey(state, passkey),
        CoreCmd::VerifyPasskey { passkey } => settings::handle_verify_passkey(state, passkey),
        CoreCmd::LockPasswords => settings::handle_lock_passwords(state),
        CoreCmd::CleanupOldClips { days } => mutations::handle_cleanup(state, days),
        CoreCmd::ExportClips => settings::handle_export(state),
        CoreCmd::ExportClipsToFile => settings::handle_export_to_file(state),
        CoreCmd::SetTheme { theme } => settings::handle_set_theme(state, theme),
    }
}

/// Logs a failed gateway call and forwards it to the UI thread.
pub(super) fn report_failure(
    state: &WorkerState,
    source: CoreErrorSource,
    label: &str,
    err: impl std::fmt::Display,
) {
    error!("backend {} failed: {}", label.to_ascii_lowercase(), err);
    send_error(&state.evt_tx, source, format!("{} failed: {}", label, err));
}
