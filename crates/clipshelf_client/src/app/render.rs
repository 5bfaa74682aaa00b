//! Pure projection of app state into something a driver can draw.
//!
//! Nothing here mutates [`ClipShelfApp`]; the same state always renders the
//! same [`ScreenView`] for a given clock.

use super::{
    ClipShelfApp, PendingConfirm, PreviewSession, UnlockDialog, CARD_PREVIEW_CHARS,
    MASKED_PLACEHOLDER,
};
use chrono::{DateTime, Local, Utc};
use clipshelf_core::models::{CategoryInfo, Clip, ClipId};
use std::fmt;

/// One frame's worth of display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub theme: String,
    pub active_category: &'static str,
    pub search_query: String,
    pub locked: bool,
    pub count_label: String,
    pub cards: Vec<ClipCard>,
    pub empty_message: Option<&'static str>,
    pub modal: ModalView,
    pub status: Option<String>,
    pub toasts: Vec<String>,
}

/// A clip as shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipCard {
    pub id: ClipId,
    pub icon: String,
    pub color: String,
    pub category: &'static str,
    pub body: String,
    pub masked: bool,
    /// Masked cards offer a reveal affordance instead of opening on click.
    pub revealable: bool,
    pub pinned: bool,
    pub favorite: bool,
    pub pin_label: &'static str,
    pub favorite_label: &'static str,
    pub timestamp: String,
}

/// At most one overlay is shown; confirmations win over prompts over previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    None,
    Preview {
        id: ClipId,
        title: String,
        body: String,
        editing: bool,
        saving: bool,
        /// The editor should take keyboard focus on this frame.
        focus_editor: bool,
    },
    Unlock {
        error: Option<String>,
        verifying: bool,
    },
    Confirm {
        prompt: String,
    },
}

/// "0 clips", "1 clip", "N clips".
pub fn count_label(count: usize) -> String {
    format!("{} clip{}", count, if count == 1 { "" } else { "s" })
}

/// Card body text: a fixed placeholder when masked, otherwise the content cut
/// at [`CARD_PREVIEW_CHARS`] characters with an ellipsis.
pub fn card_body(content: &str, masked: bool) -> String {
    if masked {
        return MASKED_PLACEHOLDER.to_string();
    }
    match content.char_indices().nth(CARD_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

/// Coarse age of a clip relative to `now`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(then).num_seconds();
    if secs < 60 {
        "just now".to_string()
    } else if secs < 60 * 60 {
        format!("{}m ago", secs / 60)
    } else if secs < 24 * 60 * 60 {
        format!("{}h ago", secs / 3600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

fn card_timestamp(clip: &Clip, now: DateTime<Utc>) -> String {
    let then = clip.timestamp_utc();
    format!(
        "{} ({})",
        then.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        time_ago(then, now)
    )
}

impl ClipShelfApp {
    /// Renders the current state.
    pub fn render(&self) -> ScreenView {
        self.render_at(Utc::now())
    }

    /// Renders the current state with relative times measured from `now`.
    pub fn render_at(&self, now: DateTime<Utc>) -> ScreenView {
        let cards: Vec<ClipCard> = self
            .cache
            .current_view()
            .iter()
            .map(|clip| self.card_for(clip, now))
            .collect();
        let empty_message = match (cards.is_empty(), self.view.is_searching()) {
            (false, _) => None,
            (true, true) => Some("No clips match your search."),
            (true, false) => Some("No clips found."),
        };
        ScreenView {
            theme: format!("{}/{}", self.theme.mode.as_str(), self.theme.style),
            active_category: self.view.active_category.as_str(),
            search_query: self.view.search_query.clone(),
            locked: self.gate == super::VisibilityGate::Locked,
            count_label: count_label(cards.len()),
            cards,
            empty_message,
            modal: self.modal_view(),
            status: self.status_text().map(ToString::to_string),
            toasts: self
                .toast_texts()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    fn category_style(&self, clip: &Clip) -> CategoryInfo {
        self.category_info
            .get(&clip.category)
            .cloned()
            .unwrap_or_else(CategoryInfo::fallback)
    }

    fn card_for(&self, clip: &Clip, now: DateTime<Utc>) -> ClipCard {
        let masked = self.gate.masks(clip);
        let style = self.category_style(clip);
        ClipCard {
            id: clip.id,
            icon: style.icon,
            color: style.color,
            category: clip.category.as_str(),
            body: card_body(&clip.content, masked),
            masked,
            revealable: masked,
            pinned: clip.is_pinned,
            favorite: clip.is_favorite,
            pin_label: if clip.is_pinned { "unpin" } else { "pin" },
            favorite_label: if clip.is_favorite {
                "unfavorite"
            } else {
                "favorite"
            },
            timestamp: card_timestamp(clip, now),
        }
    }

    fn modal_view(&self) -> ModalView {
        if let Some(prompt) = self.pending_confirm.prompt() {
            return ModalView::Confirm { prompt };
        }
        if let UnlockDialog::Open {
            error, verifying, ..
        } = &self.unlock_dialog
        {
            return ModalView::Unlock {
                error: error.clone(),
                verifying: *verifying,
            };
        }
        match &self.preview {
            PreviewSession::Closed => ModalView::None,
            PreviewSession::Viewing { clip } => ModalView::Preview {
                id: clip.id,
                title: self.preview_title(clip),
                body: clip.content.clone(),
                editing: false,
                saving: false,
                focus_editor: false,
            },
            PreviewSession::Editing {
                clip,
                pending,
                save_in_flight,
                focus_editor,
                ..
            } => ModalView::Preview {
                id: clip.id,
                title: self.preview_title(clip),
                body: pending.clone(),
                editing: true,
                saving: *save_in_flight,
                focus_editor: *focus_editor,
            },
        }
    }

    fn preview_title(&self, clip: &Clip) -> String {
        format!("{} {} clip", self.category_style(clip).icon, clip.category)
    }
}

impl fmt::Display for ScreenView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lock = if self.locked { "locked" } else { "unlocked" };
        write!(
            f,
            "[{}] category: {} | passwords {} | {}",
            self.theme, self.active_category, lock, self.count_label
        )?;
        if !self.search_query.is_empty() {
            write!(f, " | search: {:?}", self.search_query)?;
        }
        writeln!(f)?;
        if let Some(message) = self.empty_message {
            writeln!(f, "  {}", message)?;
        }
        for card in &self.cards {
            let mut flags = String::new();
            if card.pinned {
                flags.push_str(" [pinned]");
            }
            if card.favorite {
                flags.push_str(" [fav]");
            }
            if card.revealable {
                flags.push_str(" [reveal]");
            }
            let first_line = card.body.lines().next().unwrap_or_default();
            writeln!(
                f,
                "  #{:<4} {} {:<8} {}{}  {}",
                card.id, card.icon, card.category, first_line, flags, card.timestamp
            )?;
        }
        match &self.modal {
            ModalView::None => {}
            ModalView::Preview {
                id,
                title,
                body,
                editing,
                saving,
                focus_editor,
            } => {
                let mode = match (editing, saving) {
                    (true, true) => "editing, saving...",
                    (true, false) => "editing",
                    _ => "viewing",
                };
                writeln!(f, "--- {} #{} ({}) ---", title, id, mode)?;
                writeln!(f, "{}", body)?;
                if *focus_editor {
                    writeln!(f, "  (edit with `text <content>`, then `save` or `cancel`)")?;
                }
                writeln!(f, "---")?;
            }
            ModalView::Unlock { error, verifying } => {
                writeln!(f, "--- unlock passwords: enter passkey ---")?;
                if *verifying {
                    writeln!(f, "  verifying...")?;
                }
                if let Some(error) = error {
                    writeln!(f, "  ! {}", error)?;
                }
            }
            ModalView::Confirm { prompt } => {
                writeln!(f, "--- {} (yes/no) ---", prompt)?;
            }
        }
        if let Some(status) = &self.status {
            writeln!(f, "status: {}", status)?;
        }
        for toast in &self.toasts {
            if self.status.as_deref() != Some(toast.as_str()) {
                writeln!(f, "> {}", toast)?;
            }
        }
        Ok(())
    }
}
