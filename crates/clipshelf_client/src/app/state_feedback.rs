//! Status banner and toast notifications.

use super::{ClipShelfApp, StatusMessage, ToastMessage, STATUS_TTL, TOAST_LIMIT, TOAST_TTL};
use std::time::Instant;

impl ClipShelfApp {
    /// Sets the status banner message and mirrors it into the toast queue.
    pub(super) fn set_status(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.status = Some(StatusMessage {
            text: text.clone(),
            expires_at: Instant::now() + STATUS_TTL,
        });
        self.push_toast(text);
    }

    /// Short-lived success notification; does not touch the status banner.
    pub(super) fn notify(&mut self, text: impl Into<String>) {
        self.push_toast(text.into());
    }

    fn push_toast(&mut self, text: String) {
        let now = Instant::now();
        if let Some(last) = self.toasts.back_mut() {
            if last.text == text {
                last.expires_at = now + TOAST_TTL;
                return;
            }
        }
        self.toasts.push_back(ToastMessage {
            text,
            expires_at: now + TOAST_TTL,
        });
        while self.toasts.len() > TOAST_LIMIT {
            self.toasts.pop_front();
        }
    }

    pub(super) fn expire_feedback(&mut self, now: Instant) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.expires_at <= now)
        {
            self.status = None;
        }
        self.toasts.retain(|toast| toast.expires_at > now);
    }
}
