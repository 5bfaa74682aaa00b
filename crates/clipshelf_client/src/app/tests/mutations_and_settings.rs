use super::*;
use clipshelf_core::models::ThemeMode;
use std::path::PathBuf;

#[test]
fn delete_without_confirmation_touches_nothing() {
    let mut harness = make_loaded_app(sample_clips());
    harness.app.request_action(3, ClipAction::Delete);
    assert_eq!(
        harness.app.pending_confirm(),
        PendingConfirm::DeleteClip { id: 3 }
    );
    assert!(harness.sent().is_empty());

    harness.app.cancel_pending();
    assert_eq!(harness.app.pending_confirm(), PendingConfirm::None);
    assert!(harness.sent().is_empty());
    assert_eq!(harness.cached_ids(), vec![1, 2, 3]);
}

#[test]
fn confirmed_delete_issues_one_delete_then_one_refresh() {
    let mut harness = make_loaded_app(sample_clips());
    harness.app.request_action(3, ClipAction::Delete);
    harness.app.confirm_pending();
    let sent = harness.sent();
    assert!(matches!(
        sent.as_slice(),
        [CoreCmd::ApplyAction {
            id: 3,
            action: ClipAction::Delete
        }]
    ));

    harness.deliver(CoreEvent::ActionApplied {
        id: 3,
        action: ClipAction::Delete,
    });
    let sent = harness.sent();
    assert_eq!(non_fetch_count(&sent), 0);
    let refresh = fetches(&sent);
    assert_eq!(refresh.len(), 1);
    harness.answer(&refresh[0], 2, sample_clips()[..2].to_vec());
    assert_eq!(harness.cached_ids(), vec![1, 2]);
}

#[test]
fn delete_of_previewed_clip_closes_preview() {
    let mut harness = make_loaded_app(sample_clips());
    assert!(harness.app.open_preview(3));
    harness.app.request_action(3, ClipAction::Delete);
    harness.app.confirm_pending();
    harness.deliver(CoreEvent::ActionApplied {
        id: 3,
        action: ClipAction::Delete,
    });
    assert_eq!(*harness.app.preview(), PreviewSession::Closed);
}

#[test]
fn pin_and_favorite_reload_the_view() {
    let mut harness = make_loaded_app(sample_clips());
    harness.app.request_action(3, ClipAction::TogglePin);
    harness.app.request_action(3, ClipAction::ToggleFavorite);
    assert_eq!(non_fetch_count(&harness.sent()), 2);

    harness.deliver(CoreEvent::ActionApplied {
        id: 3,
        action: ClipAction::TogglePin,
    });
    harness.deliver(CoreEvent::ActionApplied {
        id: 3,
        action: ClipAction::ToggleFavorite,
    });
    assert_eq!(fetches(&harness.sent()).len(), 2);
}

#[test]
fn copy_notifies_without_reload() {
    let mut harness = make_loaded_app(sample_clips());
    harness.app.request_action(3, ClipAction::Copy);
    harness.sent();
    harness.deliver(CoreEvent::ActionApplied {
        id: 3,
        action: ClipAction::Copy,
    });
    assert!(harness.sent().is_empty());
    assert!(harness
        .app
        .toast_texts()
        .contains(&"Copied to clipboard!"));
}

#[test]
fn copy_from_preview_targets_bound_clip() {
    let mut harness = make_loaded_app(sample_clips());
    assert!(harness.app.open_preview(1));
    harness.app.copy_preview();
    assert!(matches!(
        harness.sent().as_slice(),
        [CoreCmd::ApplyAction {
            id: 1,
            action: ClipAction::Copy
        }]
    ));
}

#[test]
fn failed_action_leaves_state_unchanged() {
    let mut harness = make_loaded_app(sample_clips());
    let generation = harness.app.cache().generation();
    harness.app.request_action(1, ClipAction::TogglePin);
    harness.sent();
    harness.deliver(CoreEvent::Error {
        source: CoreErrorSource::Action {
            id: 1,
            action: ClipAction::TogglePin,
        },
        message: "Pin failed: backend unreachable".to_string(),
    });
    assert!(harness.sent().is_empty());
    assert_eq!(harness.app.cache().generation(), generation);
    assert_eq!(
        harness.app.status_text(),
        Some("Pin failed: backend unreachable")
    );
}

#[test]
fn manual_add_validates_and_reloads_matching_view() {
    let mut harness = make_loaded_app(sample_clips());
    harness.app.add_snippet("   ", Category::Text);
    assert!(harness.sent().is_empty());
    assert_eq!(
        harness.app.status_text(),
        Some("Please enter a snippet to add.")
    );

    harness.app.add_snippet("  let x = 1;  ", Category::Code);
    assert!(matches!(
        harness.sent().as_slice(),
        [CoreCmd::ManualAddClip { content, category: Category::Code }] if content == "let x = 1;"
    ));
    harness.deliver(CoreEvent::ClipAdded {
        id: 9,
        category: Category::Code,
    });
    assert_eq!(fetches(&harness.sent()).len(), 1, "all view includes code");

    harness
        .app
        .select_category(CategoryFilter::Only(Category::Url));
    harness.sent();
    harness.deliver(CoreEvent::ClipAdded {
        id: 10,
        category: Category::Code,
    });
    assert!(harness.sent().is_empty(), "url view does not show code");
}

#[test]
fn cleanup_requires_confirmation_and_reports_count() {
    let mut harness = make_loaded_app(sample_clips());
    harness.app.request_cleanup();
    assert_eq!(
        harness.app.pending_confirm(),
        PendingConfirm::Cleanup {
            days: clipshelf_core::DEFAULT_CLEANUP_DAYS
        }
    );
    assert!(harness.sent().is_empty());

    harness.app.confirm_pending();
    assert!(matches!(
        harness.sent().as_slice(),
        [CoreCmd::CleanupOldClips { days: 30 }]
    ));
    harness.deliver(CoreEvent::CleanupFinished { removed: 1 });
    assert!(harness.app.toast_texts().contains(&"Deleted 1 old clip"));
    assert_eq!(fetches(&harness.sent()).len(), 1);
}

#[test]
fn category_capture_toggle_updates_settings_on_ack() {
    let mut harness = make_loaded_app(sample_clips());
    harness.app.set_category_capture(Category::Email, false);
    assert!(matches!(
        harness.sent().as_slice(),
        [CoreCmd::SetCategoryEnabled {
            category: Category::Email,
            enabled: false
        }]
    ));
    assert_eq!(harness.app.category_settings().get(&Category::Email), None);
    harness.deliver(CoreEvent::CategoryToggled {
        category: Category::Email,
        enabled: false,
    });
    assert_eq!(
        harness.app.category_settings().get(&Category::Email),
        Some(&false)
    );
}

#[test]
fn exports_are_reported() {
    let mut harness = make_loaded_app(sample_clips());
    harness.app.export_clips();
    harness.app.export_clips_to_file();
    let sent = harness.sent();
    assert!(matches!(
        sent.as_slice(),
        [CoreCmd::ExportClips, CoreCmd::ExportClipsToFile]
    ));

    harness.deliver(CoreEvent::ExportReady {
        json: "[]".to_string(),
    });
    assert_eq!(harness.app.last_export_bytes(), Some(2));

    let path = PathBuf::from("/tmp/clipboard_export_20240101_000000.json");
    harness.deliver(CoreEvent::ExportWritten { path: path.clone() });
    assert_eq!(harness.app.last_export_path(), Some(path.as_path()));
    assert!(harness
        .app
        .status_text()
        .is_some_and(|text| text.starts_with("Export completed!")));
}

#[test]
fn theme_changes_apply_locally_and_persist() {
    let mut harness = make_loaded_app(sample_clips());
    harness.app.toggle_theme_mode();
    assert_eq!(harness.app.theme().mode, ThemeMode::Dark);
    assert_eq!(harness.app.theme().style, "midnight");
    match harness.sent().as_slice() {
        [CoreCmd::SetTheme { theme }] => assert_eq!(theme, harness.app.theme()),
        other => panic!("unexpected commands: {:?}", other),
    }

    harness.app.select_theme_style("cosmic");
    assert_eq!(harness.app.theme().style, "cosmic");
    assert_eq!(harness.sent().len(), 1);

    harness.app.select_theme_style("sunrise");
    assert_eq!(harness.app.theme().style, "cosmic", "light style rejected in dark mode");
    assert!(harness.sent().is_empty());

    harness.app.switch_theme_mode(ThemeMode::Dark);
    assert!(harness.sent().is_empty(), "no-op switch is not persisted");
}
