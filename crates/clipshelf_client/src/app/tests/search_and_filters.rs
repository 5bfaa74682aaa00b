use super::*;

#[test]
fn typing_burst_issues_one_search_with_final_text() {
    let mut harness = make_loaded_app(sample_clips());
    let t0 = harness.app.sync.last_tick_at;
    // One second of typing: a keystroke every 100ms, frames every 50ms.
    let typed = "clipboard h";
    for step in 0..=20u64 {
        let at = t0 + Duration::from_millis(step * 50);
        if step % 2 == 0 {
            let chars = usize::try_from(step / 2 + 1).expect("small index");
            harness.app.set_search_query_at(&typed[..chars], at);
        }
        harness.app.tick_at(at);
    }
    assert_eq!(harness.app.view().search_query, typed);
    assert!(fetches(&harness.sent()).is_empty());

    let last_input = t0 + Duration::from_millis(1000);
    harness
        .app
        .tick_at(last_input + SEARCH_DEBOUNCE - Duration::from_millis(1));
    assert!(fetches(&harness.sent()).is_empty());

    harness.app.tick_at(last_input + SEARCH_DEBOUNCE);
    let sent = fetches(&harness.sent());
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].scope, ClipScope::Search(typed.to_string()));
    assert!(harness.app.query_perf().search_skipped_debounce > 0);

    harness.app.tick_at(last_input + SEARCH_DEBOUNCE * 3);
    assert!(fetches(&harness.sent()).is_empty(), "debounce fires once");
}

#[test]
fn search_results_replace_cache() {
    let mut harness = make_loaded_app(sample_clips());
    let t0 = harness.app.sync.last_tick_at;
    harness.app.set_search_query_at("example", t0);
    harness.app.tick_at(t0 + SEARCH_DEBOUNCE);
    let sent = fetches(&harness.sent());
    harness.answer(&sent[0], 1, vec![clip(3, "https://example.com", Category::Url)]);
    assert_eq!(harness.cached_ids(), vec![3]);
}

#[test]
fn clearing_search_reverts_to_active_category() {
    let mut harness = make_loaded_app(sample_clips());
    let t0 = harness.app.sync.last_tick_at;
    harness.app.set_search_query_at("rust", t0);
    harness.app.tick_at(t0 + SEARCH_DEBOUNCE);
    harness.sent();

    let t1 = t0 + SEARCH_DEBOUNCE * 2;
    harness.app.set_search_query_at("   ", t1);
    harness.app.tick_at(t1 + SEARCH_DEBOUNCE);
    let sent = fetches(&harness.sent());
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].scope, ClipScope::Category(CategoryFilter::All));
}

#[test]
fn identical_text_does_not_rearm_debounce() {
    let mut harness = make_loaded_app(sample_clips());
    let t0 = harness.app.sync.last_tick_at;
    harness.app.set_search_query_at("rust", t0);
    harness
        .app
        .set_search_query_at("rust", t0 + Duration::from_millis(250));
    harness.app.tick_at(t0 + SEARCH_DEBOUNCE);
    assert_eq!(fetches(&harness.sent()).len(), 1);
}

#[test]
fn category_round_trip_issues_two_fetches_and_restores_listing() {
    let mut harness = make_loaded_app(sample_clips());
    let before = harness.app.cache().current_view().to_vec();

    harness
        .app
        .select_category(CategoryFilter::Only(Category::Password));
    let to_password = fetches(&harness.sent());
    assert_eq!(to_password.len(), 1);
    harness.answer(
        &to_password[0],
        1,
        vec![clip(2, "db password: hunter2", Category::Password)],
    );
    assert_eq!(harness.cached_ids(), vec![2]);

    harness.app.select_category(CategoryFilter::All);
    let back = fetches(&harness.sent());
    assert_eq!(back.len(), 1);
    assert_eq!(back[0].scope, ClipScope::all());
    harness.answer(&back[0], 1, before.clone());
    assert_eq!(harness.app.cache().current_view(), before.as_slice());
}

#[test]
fn category_switch_clears_search_and_cancels_pending_debounce() {
    let mut harness = make_loaded_app(sample_clips());
    let t0 = harness.app.sync.last_tick_at;
    harness.app.set_search_query_at("pass", t0);
    harness
        .app
        .select_category(CategoryFilter::Only(Category::Code));
    assert_eq!(harness.app.view().search_query, "");

    harness.app.tick_at(t0 + SEARCH_DEBOUNCE * 2);
    let sent = fetches(&harness.sent());
    assert_eq!(sent.len(), 1, "only the category fetch");
    assert_eq!(
        sent[0].scope,
        ClipScope::Category(CategoryFilter::Only(Category::Code))
    );
}

#[test]
fn search_uses_search_limit() {
    let mut harness = make_loaded_app(sample_clips());
    let t0 = harness.app.sync.last_tick_at;
    harness.app.set_search_query_at("x", t0);
    harness.app.tick_at(t0 + SEARCH_DEBOUNCE);
    let limits: Vec<usize> = harness
        .sent()
        .into_iter()
        .filter_map(|cmd| match cmd {
            CoreCmd::FetchClips { limit, .. } => Some(limit),
            _ => None,
        })
        .collect();
    assert_eq!(limits, vec![clipshelf_core::DEFAULT_SEARCH_CLIPS_LIMIT]);
}
