use super::*;
use chrono::{Duration as ChronoDuration, Utc};
use tempfile::TempDir;

fn gateway() -> (MemoryGateway, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    (MemoryGateway::new(dir.path().join("exports")), dir)
}

#[test]
fn listing_puts_pinned_first_then_newest() {
    let (gw, _dir) = gateway();
    let now = Utc::now().naive_utc();
    let old = gw
        .capture_at("old", Category::Text, now - ChronoDuration::hours(2))
        .expect("old");
    let mid = gw
        .capture_at("mid", Category::Text, now - ChronoDuration::hours(1))
        .expect("mid");
    let new = gw.capture_at("new", Category::Url, now).expect("new");

    assert!(gw.toggle_pin(old).expect("pin"));
    let ids: Vec<ClipId> = gw
        .get_all_clips(10)
        .expect("list")
        .iter()
        .map(|clip| clip.id)
        .collect();
    assert_eq!(ids, vec![old, new, mid]);

    let texts = gw.get_clips_by_category(Category::Text, 10).expect("by category");
    assert_eq!(texts.len(), 2);
    assert_eq!(gw.get_all_clips(1).expect("limited").len(), 1);
}

#[test]
fn capture_skips_duplicates_empty_and_disabled_categories() {
    let (gw, _dir) = gateway();
    assert!(gw.capture("hello", Category::Text).is_some());
    assert!(gw.capture("hello", Category::Text).is_none());
    assert!(gw.capture("   ", Category::Text).is_none());

    gw.set_category_enabled(Category::Phone, false).expect("disable");
    assert!(gw.capture("555-0100", Category::Phone).is_none());
    assert_eq!(
        gw.get_category_settings().expect("settings").get(&Category::Phone),
        Some(&false)
    );
}

#[test]
fn search_is_case_insensitive_substring() {
    let (gw, _dir) = gateway();
    gw.capture("Rust is fun", Category::Text);
    gw.capture("python snippets", Category::Code);
    let hits = gw.search_clips("RUST", 50).expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].content, "Rust is fun");
}

#[test]
fn revision_tracks_mutations_and_guards_updates() {
    let (gw, _dir) = gateway();
    let start = gw.data_revision().expect("revision");
    let id = gw.capture("draft", Category::Text).expect("capture");
    assert_eq!(gw.data_revision().expect("revision"), start + 1);

    let updated = gw.update_clip_content(id, "final", Some(0)).expect("update");
    assert_eq!(updated.content, "final");
    assert_eq!(updated.revision, 1);

    let err = gw
        .update_clip_content(id, "stale write", Some(0))
        .expect_err("stale revision must conflict");
    assert!(err.is_conflict());
    assert_eq!(
        gw.get_all_clips(10).expect("list")[0].content,
        "final",
        "conflicting write must not land"
    );

    // Unchecked writes still go through.
    gw.update_clip_content(id, "forced", None).expect("unchecked update");
    assert!(matches!(
        gw.update_clip_content(99, "x", None),
        Err(AppError::NotFound)
    ));
}

#[test]
fn passkey_setup_verify_and_lock() {
    let (gw, _dir) = gateway();
    assert!(gw.is_password_locked().expect("locked"));
    assert!(!gw.verify_passkey("anything").expect("verify without passkey"));
    assert!(gw.setup_passkey("abc").is_err(), "too short");

    assert!(gw.setup_passkey("open-sesame").expect("setup"));
    assert!(gw.is_passkey_set().expect("set"));
    assert!(!gw.is_password_locked().expect("unlocked after setup"));
    assert!(!gw.setup_passkey("second").expect("second setup refused"));

    gw.lock_passwords().expect("lock");
    assert!(gw.is_password_locked().expect("locked"));
    assert!(!gw.verify_passkey("wrong").expect("wrong passkey"));
    assert!(gw.is_password_locked().expect("still locked"));
    assert!(gw.verify_passkey("open-sesame").expect("right passkey"));
    assert!(!gw.is_password_locked().expect("unlocked"));
}

#[test]
fn copy_refuses_encrypted_clip_while_locked() {
    let (gw, _dir) = gateway();
    gw.setup_passkey("open-sesame").expect("setup");
    let id = gw.capture("db password: s3cret", Category::Password).expect("capture");
    gw.lock_passwords().expect("lock");

    assert!(!gw.copy_clip(id).expect("copy while locked"));
    assert_eq!(gw.clipboard_contents(), None);

    gw.verify_passkey("open-sesame").expect("unlock");
    assert!(gw.copy_clip(id).expect("copy while unlocked"));
    assert_eq!(gw.clipboard_contents().as_deref(), Some("db password: s3cret"));
}

#[test]
fn cleanup_spares_pinned_and_recent_clips() {
    let (gw, _dir) = gateway();
    let now = Utc::now().naive_utc();
    let ancient = gw
        .capture_at("ancient", Category::Text, now - ChronoDuration::days(40))
        .expect("ancient");
    let pinned = gw
        .capture_at("pinned ancient", Category::Text, now - ChronoDuration::days(40))
        .expect("pinned");
    gw.capture_at("fresh", Category::Text, now).expect("fresh");
    gw.toggle_pin(pinned).expect("pin");

    assert_eq!(gw.cleanup_old_clips(30).expect("cleanup"), 1);
    let ids: Vec<ClipId> = gw.get_all_clips(10).expect("list").iter().map(|c| c.id).collect();
    assert!(!ids.contains(&ancient));
    assert!(ids.contains(&pinned));
    assert_eq!(ids.len(), 2);
}

#[test]
fn cleanup_with_out_of_range_age_removes_nothing() {
    let (gw, _dir) = gateway();
    let now = Utc::now().naive_utc();
    gw.capture_at("ancient", Category::Text, now - ChronoDuration::days(4000))
        .expect("ancient");
    gw.capture_at("fresh", Category::Text, now).expect("fresh");

    assert_eq!(gw.cleanup_old_clips(u32::MAX).expect("cleanup"), 0);
    assert_eq!(gw.get_all_clips(10).expect("list after cleanup").len(), 2);
}

#[test]
fn export_writes_json_file() {
    let (gw, dir) = gateway();
    gw.capture("one", Category::Text);
    gw.capture("https://two.example", Category::Url);

    let blob = gw.export_clips().expect("export blob");
    let parsed: Vec<Clip> = serde_json::from_str(&blob).expect("parse export");
    assert_eq!(parsed.len(), 2);

    let first = gw.export_clips_to_file().expect("export file");
    let second = gw.export_clips_to_file().expect("export file again");
    assert_ne!(first, second, "exports in the same second must not collide");
    assert!(first.starts_with(dir.path()));
    let written = std::fs::read_to_string(&first).expect("read export");
    assert_eq!(written, blob);
}

#[test]
fn theme_round_trips_and_rejects_foreign_styles() {
    let (gw, _dir) = gateway();
    assert_eq!(gw.get_theme_settings().expect("theme"), ThemeSettings::default());
    gw.set_theme(ThemeMode::Dark, "emerald").expect("set theme");
    let theme = gw.get_theme_settings().expect("theme");
    assert_eq!(theme.mode, ThemeMode::Dark);
    assert_eq!(theme.style, "emerald");
    assert!(gw.set_theme(ThemeMode::Dark, "mint").is_err());
}

#[test]
fn offline_backend_fails_every_call_but_records_it() {
    let (gw, _dir) = gateway();
    gw.set_offline(true);
    assert!(matches!(gw.get_all_clips(10), Err(AppError::Gateway(_))));
    assert!(gw.toggle_pin(1).is_err());
    gw.set_offline(false);
    assert!(gw.get_all_clips(10).is_ok());
    assert_eq!(gw.call_count("get_all_clips"), 2);
    assert_eq!(gw.call_count("toggle_pin"), 1);
}
