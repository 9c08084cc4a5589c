use std::sync::Once;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use quickopen_core::{
    update, AppState, Effect, Msg, QuickOpenSettings, SearchPhase, SearchQuery, SearchResult,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(quickopen_logging::initialize_for_tests);
}

fn at(t0: Instant, ms: u64) -> Instant {
    t0 + Duration::from_millis(ms)
}

fn type_text(state: AppState, text: &str, now: Instant) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::InputChanged {
            input: text.to_string(),
            now,
        },
    )
}

fn activate(state: AppState, text: &str, now: Instant) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::Activated {
            input: text.to_string(),
            now,
        },
    )
}

fn wake(state: AppState, now: Instant) -> (AppState, Vec<Effect>) {
    let token = state.wake_token();
    update(state, Msg::Wake { token, now })
}

fn issued_keyword(effects: &[Effect]) -> Option<&str> {
    effects.iter().find_map(|effect| match effect {
        Effect::IssueQuery { query, .. } => Some(query.keyword.as_str()),
        _ => None,
    })
}

#[test]
fn activation_queries_immediately_with_empty_keyword() {
    init_logging();
    let t0 = Instant::now();

    let (state, effects) = update(
        AppState::new(),
        Msg::Activated {
            input: String::new(),
            now: t0,
        },
    );

    let defaults = QuickOpenSettings::default();
    assert_eq!(
        effects,
        vec![Effect::IssueQuery {
            attempt: 1,
            query: SearchQuery {
                base_path: String::new(),
                exclude_names: defaults.excludes.clone(),
                exclude_paths: Vec::new(),
                max_results: defaults.max_load,
                keyword: String::new(),
            },
        }]
    );
    assert_eq!(state.phase(), SearchPhase::Querying);
    assert_eq!(state.last_stable_keyword(), "");
    assert_eq!(state.last_issued_at(), Some(t0));
}

#[test]
fn input_within_min_interval_cools_for_remaining_time() {
    init_logging();
    let t0 = Instant::now();
    let (state, _) = update(
        AppState::new(),
        Msg::Activated {
            input: String::new(),
            now: t0,
        },
    );

    let (state, effects) = type_text(state, "a", at(t0, 500));

    assert_eq!(state.phase(), SearchPhase::Cooling);
    assert_eq!(
        effects,
        vec![Effect::ScheduleWake {
            token: state.wake_token(),
            after: Duration::from_millis(1500),
        }]
    );
}

#[test]
fn cooling_then_settling_then_query() {
    init_logging();
    let t0 = Instant::now();
    let (state, _) = update(
        AppState::new(),
        Msg::Activated {
            input: String::new(),
            now: t0,
        },
    );
    let (state, _) = type_text(state, "a", at(t0, 500));

    let (state, effects) = wake(state, at(t0, 2000));
    assert_eq!(state.phase(), SearchPhase::Settling);
    assert_eq!(
        effects,
        vec![Effect::ScheduleWake {
            token: state.wake_token(),
            after: Duration::from_millis(1000),
        }]
    );

    let (state, effects) = wake(state, at(t0, 3000));
    assert_eq!(issued_keyword(&effects), Some("a"));
    assert_eq!(state.phase(), SearchPhase::Querying);
    assert_eq!(state.last_stable_keyword(), "a");
    assert_eq!(state.last_issued_at(), Some(at(t0, 3000)));
}

#[test]
fn first_keystroke_without_prior_query_settles_directly() {
    init_logging();
    let t0 = Instant::now();

    let (state, effects) = type_text(AppState::new(), "a", t0);

    assert_eq!(state.phase(), SearchPhase::Settling);
    assert_eq!(
        effects,
        vec![Effect::ScheduleWake {
            token: state.wake_token(),
            after: Duration::from_millis(1000),
        }]
    );
}

#[test]
fn input_change_during_settle_aborts_the_attempt() {
    init_logging();
    let t0 = Instant::now();
    let (state, _) = type_text(AppState::new(), "a", t0);
    let stale_token = state.wake_token();

    let (state, _) = type_text(state, "ab", at(t0, 400));
    assert_ne!(state.wake_token(), stale_token);

    let (state, effects) = update(
        state,
        Msg::Wake {
            token: stale_token,
            now: at(t0, 1000),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), SearchPhase::Settling);
    assert_eq!(state.last_issued_at(), None);

    let (state, effects) = wake(state, at(t0, 1400));
    assert_eq!(issued_keyword(&effects), Some("ab"));
    assert_eq!(state.last_stable_keyword(), "ab");
}

#[test]
fn identical_input_event_is_ignored() {
    init_logging();
    let t0 = Instant::now();
    let (state, _) = type_text(AppState::new(), "a", t0);
    let token = state.wake_token();

    let (state, effects) = type_text(state, "a", at(t0, 300));

    assert!(effects.is_empty());
    assert_eq!(state.wake_token(), token);
    assert_eq!(state.phase(), SearchPhase::Settling);
}

#[test]
fn reverting_to_last_stable_keyword_rests() {
    init_logging();
    let t0 = Instant::now();
    let (state, _) = update(
        AppState::new(),
        Msg::Activated {
            input: "x".to_string(),
            now: t0,
        },
    );
    let (state, _) = type_text(state, "xy", at(t0, 100));
    assert_eq!(state.phase(), SearchPhase::Cooling);

    let (state, effects) = type_text(state, "x", at(t0, 200));
    assert!(effects.is_empty());
    // The activation query is still in flight.
    assert_eq!(state.phase(), SearchPhase::Querying);

    let (state, effects) = update(
        state,
        Msg::QueryCompleted {
            attempt: 1,
            outcome: Ok(SearchResult::default()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), SearchPhase::Idle);
}

#[test]
fn whitespace_in_keyword_is_preserved() {
    init_logging();
    let t0 = Instant::now();
    let (state, _) = type_text(AppState::new(), "  a b ", t0);

    let (_state, effects) = wake(state, at(t0, 1000));

    assert_eq!(issued_keyword(&effects), Some("  a b "));
}

#[test]
fn relative_search_uses_browse_path() {
    init_logging();
    let t0 = Instant::now();
    let settings = QuickOpenSettings {
        relative_search: true,
        ..QuickOpenSettings::default()
    };
    let (state, _) = update(AppState::new(), Msg::SettingsChanged(settings));
    let (state, _) = update(state, Msg::BrowsePathChanged("notebooks/sub".to_string()));

    let (state, effects) = update(
        state,
        Msg::Activated {
            input: String::new(),
            now: t0,
        },
    );
    match &effects[..] {
        [Effect::IssueQuery { query, .. }] => assert_eq!(query.base_path, "notebooks/sub"),
        other => panic!("unexpected effects {other:?}"),
    }

    let (state, _) = update(state, Msg::SettingsChanged(QuickOpenSettings::default()));
    let (_state, effects) = activate(state, "", at(t0, 10));
    match &effects[..] {
        [Effect::IssueQuery { query, .. }] => assert_eq!(query.base_path, ""),
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn settings_change_applies_to_next_query() {
    init_logging();
    let t0 = Instant::now();
    let settings = QuickOpenSettings {
        relative_search: false,
        excludes: vec!["*.tmp".to_string()],
        exclude_paths: vec!["build".to_string()],
        max_load: 50,
    };
    let (state, _) = update(AppState::new(), Msg::SettingsChanged(settings));

    let (_state, effects) = activate(state, "", t0);

    assert_eq!(
        effects,
        vec![Effect::IssueQuery {
            attempt: 1,
            query: SearchQuery {
                base_path: String::new(),
                exclude_names: vec!["*.tmp".to_string()],
                exclude_paths: vec!["build".to_string()],
                max_results: 50,
                keyword: String::new(),
            },
        }]
    );
}
