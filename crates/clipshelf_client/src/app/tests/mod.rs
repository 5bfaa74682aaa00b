//! App state tests driven through scripted backend channels.

use super::*;
use crate::backend::{ClipAction, ClipScope, CoreCmd, CoreErrorSource, CoreEvent};
use chrono::{Duration as ChronoDuration, NaiveDateTime, Utc};
use clipshelf_core::models::{Category, CategoryFilter, Clip, ClipId};
use crossbeam_channel::{unbounded, Receiver, Sender};

mod mutations_and_settings;
mod search_and_filters;

struct TestHarness {
    app: ClipShelfApp,
    cmd_rx: Receiver<CoreCmd>,
    evt_tx: Sender<CoreEvent>,
}

/// A listing fetch as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SentFetch {
    request_id: u64,
    scope: ClipScope,
    known_revision: Option<u64>,
}

fn minutes_ago(minutes: i64) -> NaiveDateTime {
    Utc::now().naive_utc() - ChronoDuration::minutes(minutes)
}

fn clip(id: ClipId, content: &str, category: Category) -> Clip {
    let mut clip = Clip::new(id, content, category);
    clip.timestamp = minutes_ago(id);
    clip
}

/// Three clips in backend order: a pinned note, a password, a url.
fn sample_clips() -> Vec<Clip> {
    let mut pinned = clip(1, "pinned note", Category::Text);
    pinned.is_pinned = true;
    vec![
        pinned,
        clip(2, "db password: hunter2", Category::Password),
        clip(3, "https://example.com", Category::Url),
    ]
}

fn drain_cmds(rx: &Receiver<CoreCmd>) -> Vec<CoreCmd> {
    rx.try_iter().collect()
}

fn fetches(cmds: &[CoreCmd]) -> Vec<SentFetch> {
    cmds.iter()
        .filter_map(|cmd| match cmd {
            CoreCmd::FetchClips {
                request_id,
                scope,
                known_revision,
                ..
            } => Some(SentFetch {
                request_id: *request_id,
                scope: scope.clone(),
                known_revision: *known_revision,
            }),
            _ => None,
        })
        .collect()
}

fn non_fetch_count(cmds: &[CoreCmd]) -> usize {
    cmds.iter()
        .filter(|cmd| !matches!(cmd, CoreCmd::FetchClips { .. }))
        .count()
}

/// Fresh app with the startup traffic already drained and unanswered.
fn make_app() -> TestHarness {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();
    let app = ClipShelfApp::new(
        crate::backend::BackendHandle::from_test_channels(cmd_tx, evt_rx),
        Config::default(),
    );
    let startup = drain_cmds(&cmd_rx);
    assert!(matches!(startup.first(), Some(CoreCmd::LoadSessionInfo)));
    assert_eq!(fetches(&startup).len(), 1);
    TestHarness {
        app,
        cmd_rx,
        evt_tx,
    }
}

/// App whose startup fetch was answered with `clips` at backend revision 1.
fn make_loaded_app(clips: Vec<Clip>) -> TestHarness {
    let mut harness = make_app();
    let request_id = harness.app.latest_view_request;
    harness.app.apply_event(CoreEvent::ClipsLoaded {
        request_id,
        scope: ClipScope::all(),
        revision: 1,
        items: clips,
    });
    harness
}

impl TestHarness {
    /// Delivers an event through the channel and drains it without letting
    /// the sync timer or the search debounce fire.
    fn deliver(&mut self, event: CoreEvent) {
        self.evt_tx.send(event).expect("send event");
        self.pump();
    }

    fn pump(&mut self) {
        let now = self.app.sync.last_tick_at;
        self.app.tick_at(now);
    }

    /// Answers a fetch with `items` at `revision`.
    fn answer(&mut self, fetch: &SentFetch, revision: u64, items: Vec<Clip>) {
        self.deliver(CoreEvent::ClipsLoaded {
            request_id: fetch.request_id,
            scope: fetch.scope.clone(),
            revision,
            items,
        });
    }

    fn sent(&self) -> Vec<CoreCmd> {
        drain_cmds(&self.cmd_rx)
    }

    fn cached_ids(&self) -> Vec<ClipId> {
        self.app
            .cache
            .current_view()
            .iter()
            .map(|clip| clip.id)
            .collect()
    }
}
