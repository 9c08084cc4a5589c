use std::time::Instant;

use crate::{normalize_path, AppState, Effect, Msg, SearchPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Activated { input, now } => {
            // Activation always queries, bypassing interval and settle checks.
            state.replace_input(input);
            let (attempt, query) = state.issue_query(now);
            vec![Effect::IssueQuery { attempt, query }]
        }
        Msg::InputChanged { input, now } => {
            if input == state.input() {
                return (state, Vec::new());
            }
            state.replace_input(input);
            evaluate(&mut state, now)
        }
        Msg::Wake { token, now } => {
            if token != state.wake_token() {
                // Superseded by a newer input; the attempt is dropped silently.
                return (state, Vec::new());
            }
            match state.phase() {
                SearchPhase::Cooling => evaluate(&mut state, now),
                SearchPhase::Settling => settle(&mut state, now),
                SearchPhase::Idle | SearchPhase::Querying => Vec::new(),
            }
        }
        Msg::QueryCompleted { attempt, outcome } => {
            if !state.is_current_attempt(attempt) {
                return (state, Vec::new());
            }
            state.finish_attempt();
            match outcome {
                Ok(result) => state.apply_result(&result),
                Err(failure) => state.apply_failure(failure),
            }
            Vec::new()
        }
        Msg::EntrySelected { activation_id } => {
            vec![
                Effect::CollapseSidebar,
                Effect::OpenDocument {
                    path: normalize_path(&activation_id),
                },
            ]
        }
        Msg::SettingsChanged(settings) => {
            state.set_settings(settings);
            Vec::new()
        }
        Msg::BrowsePathChanged(path) => {
            state.set_browse_path(path);
            Vec::new()
        }
    };

    (state, effects)
}

/// Decides between resting, cooling down and settling for the current input.
fn evaluate(state: &mut AppState, now: Instant) -> Vec<Effect> {
    if state.input_is_stable() {
        state.enter_rest();
        return Vec::new();
    }
    if let Some(remaining) = state.cooldown_remaining(now) {
        state.enter_cooling();
        return vec![Effect::ScheduleWake {
            token: state.wake_token(),
            after: remaining,
        }];
    }
    state.enter_settling();
    vec![Effect::ScheduleWake {
        token: state.wake_token(),
        after: state.timing().settle_delay,
    }]
}

/// Issues the query if the captured keyword survived the settle delay.
fn settle(state: &mut AppState, now: Instant) -> Vec<Effect> {
    match state.take_settling_keyword() {
        Some(keyword) if keyword == state.input() => {
            let (attempt, query) = state.issue_query(now);
            vec![Effect::IssueQuery { attempt, query }]
        }
        _ => {
            state.enter_rest();
            Vec::new()
        }
    }
}
