//! Passkey gate over the password category.

use super::{ClipShelfApp, PreviewSession};
use crate::backend::CoreCmd;
use clipshelf_core::models::{Clip, ClipId};
use clipshelf_core::MIN_PASSKEY_LEN;
use tracing::{debug, info, warn};

/// Whether password clips may be shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisibilityGate {
    #[default]
    Locked,
    Unlocked,
}

impl VisibilityGate {
    /// A clip is masked iff it is a password clip and the gate is locked.
    pub fn masks(self, clip: &Clip) -> bool {
        self == Self::Locked && clip.is_password()
    }
}

/// The passkey prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UnlockDialog {
    #[default]
    Closed,
    Open {
        /// The masked clip whose reveal affordance opened the prompt.
        reveal_clip: Option<ClipId>,
        /// Inline error from the previous attempt.
        error: Option<String>,
        verifying: bool,
    },
}

impl ClipShelfApp {
    /// Whether the clip would be masked on screen right now.
    pub fn is_masked(&self, clip: &Clip) -> bool {
        self.gate.masks(clip)
    }

    /// The reveal affordance on a card.
    ///
    /// Opens the passkey prompt for a masked clip; for anything already
    /// visible it opens the preview instead.
    pub fn reveal_clip(&mut self, id: ClipId) {
        let masked = self.cache.get(id).is_some_and(|clip| self.gate.masks(clip));
        if masked {
            self.unlock_dialog = UnlockDialog::Open {
                reveal_clip: Some(id),
                error: None,
                verifying: false,
            };
        } else {
            self.open_preview(id);
        }
    }

    /// Opens the passkey prompt without a target clip.
    pub fn open_unlock_dialog(&mut self) {
        if self.gate == VisibilityGate::Unlocked {
            return;
        }
        self.unlock_dialog = UnlockDialog::Open {
            reveal_clip: None,
            error: None,
            verifying: false,
        };
    }

    pub fn close_unlock_dialog(&mut self) {
        self.unlock_dialog = UnlockDialog::Closed;
    }

    /// Sends the entered passkey for verification.
    pub fn submit_passkey(&mut self, passkey: impl Into<String>) {
        let passkey = passkey.into();
        let UnlockDialog::Open {
            error, verifying, ..
        } = &mut self.unlock_dialog
        else {
            debug!("passkey submitted with no unlock prompt open");
            return;
        };
        if *verifying {
            return;
        }
        if passkey.is_empty() {
            *error = Some("Enter your passkey.".to_string());
            return;
        }
        *error = None;
        *verifying = true;
        if self
            .backend
            .cmd_tx
            .send(CoreCmd::VerifyPasskey { passkey })
            .is_err()
        {
            self.handle_passkey_failed("Unlock failed: backend unavailable.".to_string());
        }
    }

    /// Relocks the password category.
    pub fn lock_passwords(&mut self) {
        if self.backend.cmd_tx.send(CoreCmd::LockPasswords).is_err() {
            self.set_status("Lock failed: backend unavailable.");
        }
    }

    /// Creates the passkey; only valid while none exists.
    pub fn setup_passkey(&mut self, passkey: impl Into<String>) {
        let passkey = passkey.into();
        if self.passkey_set {
            self.set_status("A passkey is already configured.");
            return;
        }
        if passkey.chars().count() < MIN_PASSKEY_LEN {
            self.set_status(format!(
                "Passkey must be at least {} characters.",
                MIN_PASSKEY_LEN
            ));
            return;
        }
        if self
            .backend
            .cmd_tx
            .send(CoreCmd::SetupPasskey { passkey })
            .is_err()
        {
            self.set_status("Passkey setup failed: backend unavailable.");
        }
    }

    pub(super) fn apply_password_state(&mut self, locked: bool, passkey_set: bool) {
        self.passkey_set = passkey_set;
        self.set_gate(if locked {
            VisibilityGate::Locked
        } else {
            VisibilityGate::Unlocked
        });
    }

    pub(super) fn handle_passkey_verified(&mut self, verified: bool) {
        if verified {
            info!("password category unlocked");
            let reveal = match std::mem::take(&mut self.unlock_dialog) {
                UnlockDialog::Open { reveal_clip, .. } => reveal_clip,
                UnlockDialog::Closed => None,
            };
            self.set_gate(VisibilityGate::Unlocked);
            self.reload_view();
            self.notify("Passwords unlocked");
            // The clip behind the reveal affordance opens straight away.
            if let Some(id) = reveal {
                self.open_preview(id);
            }
            return;
        }
        if let UnlockDialog::Open {
            error, verifying, ..
        } = &mut self.unlock_dialog
        {
            *error = Some(if self.passkey_set {
                "Incorrect passkey.".to_string()
            } else {
                "No passkey configured yet.".to_string()
            });
            *verifying = false;
        }
    }

    pub(super) fn handle_passkey_setup(&mut self, accepted: bool) {
        self.passkey_set = true;
        if !accepted {
            self.set_status("A passkey is already configured.");
            return;
        }
        self.set_gate(VisibilityGate::Unlocked);
        self.reload_view();
        self.notify("Passkey created");
    }

    pub(super) fn handle_passwords_locked(&mut self) {
        self.set_gate(VisibilityGate::Locked);
        self.reload_view();
        self.notify("Passwords locked");
    }

    pub(super) fn handle_passkey_failed(&mut self, message: String) {
        warn!("passkey operation failed: {}", message);
        match &mut self.unlock_dialog {
            UnlockDialog::Open {
                error, verifying, ..
            } => {
                *error = Some(message);
                *verifying = false;
            }
            UnlockDialog::Closed => self.set_status(message),
        }
    }

    /// Applies a gate change; a preview of a now-masked clip is closed.
    fn set_gate(&mut self, gate: VisibilityGate) {
        self.gate = gate;
        let shows_masked = self
            .preview
            .clip()
            .is_some_and(|clip| self.gate.masks(clip));
        if shows_masked {
            self.preview = PreviewSession::Closed;
        }
    }
}
