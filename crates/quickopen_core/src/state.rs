use std::fmt;
use std::time::{Duration, Instant};

use crate::view_model::{AppViewModel, ViewEntry};
use crate::{CoordinatorTiming, QuickOpenSettings, SearchQuery, SearchResult};

pub type AttemptId = u64;

/// Input generation a scheduled wake belongs to.
///
/// Every effective input change (and every activation) starts a new
/// generation; a wake carrying an older one is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WakeToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    /// Waiting for the minimum interval since the last query to pass.
    Cooling,
    /// Waiting for the captured keyword to stay unchanged for the settle delay.
    Settling,
    /// The latest query is in flight.
    Querying,
}

/// Why a query attempt produced no result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFailure {
    /// Network failure or non-success status.
    Transport(String),
    /// The response body could not be decoded.
    Parse(String),
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryFailure::Transport(message) => write!(f, "transport error: {message}"),
            QueryFailure::Parse(message) => write!(f, "parse error: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct IssuedAttempt {
    id: AttemptId,
    keyword: String,
    in_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    settings: QuickOpenSettings,
    timing: CoordinatorTiming,
    browse_path: String,
    input: String,
    last_stable_keyword: String,
    last_issued_at: Option<Instant>,
    generation: u64,
    phase: SearchPhase,
    settling_keyword: Option<String>,
    next_attempt: AttemptId,
    latest_attempt: Option<IssuedAttempt>,
    entries: Vec<ViewEntry>,
    rendered_keyword: Option<String>,
    scan_seconds: Option<f64>,
    last_error: Option<QueryFailure>,
    queries_issued: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: QuickOpenSettings, timing: CoordinatorTiming) -> Self {
        Self {
            settings,
            timing,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            input: self.input.clone(),
            rendered_keyword: self.rendered_keyword.clone(),
            entries: self.entries.clone(),
            scan_seconds: self.scan_seconds,
            last_error: self.last_error.as_ref().map(ToString::to_string),
            queries_issued: self.queries_issued,
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn last_stable_keyword(&self) -> &str {
        &self.last_stable_keyword
    }

    pub fn last_issued_at(&self) -> Option<Instant> {
        self.last_issued_at
    }

    pub fn timing(&self) -> CoordinatorTiming {
        self.timing
    }

    pub fn wake_token(&self) -> WakeToken {
        WakeToken(self.generation)
    }

    pub(crate) fn set_settings(&mut self, settings: QuickOpenSettings) {
        self.settings = settings;
    }

    pub(crate) fn set_browse_path(&mut self, path: String) {
        self.browse_path = path;
    }

    /// Replaces the input snapshot and starts a new generation.
    pub(crate) fn replace_input(&mut self, input: String) {
        self.input = input;
        self.generation = self.generation.wrapping_add(1);
        self.settling_keyword = None;
    }

    pub(crate) fn input_is_stable(&self) -> bool {
        self.input == self.last_stable_keyword
    }

    /// Time left before another query may be issued, if any.
    pub(crate) fn cooldown_remaining(&self, now: Instant) -> Option<Duration> {
        let issued_at = self.last_issued_at?;
        let elapsed = now.saturating_duration_since(issued_at);
        (elapsed < self.timing.min_interval).then(|| self.timing.min_interval - elapsed)
    }

    /// Phase to fall back to when no wake is pending.
    pub(crate) fn enter_rest(&mut self) {
        self.settling_keyword = None;
        self.phase = if self.latest_attempt.as_ref().is_some_and(|a| a.in_flight) {
            SearchPhase::Querying
        } else {
            SearchPhase::Idle
        };
    }

    pub(crate) fn enter_cooling(&mut self) {
        self.settling_keyword = None;
        self.phase = SearchPhase::Cooling;
    }

    pub(crate) fn enter_settling(&mut self) {
        self.settling_keyword = Some(self.input.clone());
        self.phase = SearchPhase::Settling;
    }

    pub(crate) fn take_settling_keyword(&mut self) -> Option<String> {
        self.settling_keyword.take()
    }

    /// Records the current input as stable and builds the query for it.
    pub(crate) fn issue_query(&mut self, now: Instant) -> (AttemptId, SearchQuery) {
        let keyword = self.input.clone();
        self.last_stable_keyword = keyword.clone();
        self.last_issued_at = Some(now);
        self.next_attempt += 1;
        let attempt = self.next_attempt;
        self.latest_attempt = Some(IssuedAttempt {
            id: attempt,
            keyword: keyword.clone(),
            in_flight: true,
        });
        self.settling_keyword = None;
        self.phase = SearchPhase::Querying;
        self.queries_issued += 1;

        let base_path = if self.settings.relative_search {
            self.browse_path.clone()
        } else {
            String::new()
        };
        let query = SearchQuery {
            base_path,
            exclude_names: self.settings.excludes.clone(),
            exclude_paths: self.settings.exclude_paths.clone(),
            max_results: self.settings.max_load,
            keyword,
        };
        (attempt, query)
    }

    /// Whether a response for `attempt` may still be applied.
    ///
    /// Only the most recently issued attempt qualifies, and only while its
    /// keyword is still the last stable keyword.
    pub fn is_current_attempt(&self, attempt: AttemptId) -> bool {
        self.latest_attempt
            .as_ref()
            .is_some_and(|a| a.id == attempt && a.keyword == self.last_stable_keyword)
    }

    pub(crate) fn finish_attempt(&mut self) {
        if let Some(latest) = self.latest_attempt.as_mut() {
            latest.in_flight = false;
        }
        if self.phase == SearchPhase::Querying {
            self.phase = SearchPhase::Idle;
        }
    }

    pub(crate) fn apply_result(&mut self, result: &SearchResult) {
        self.entries = ViewEntry::from_result(result);
        self.rendered_keyword = Some(self.last_stable_keyword.clone());
        self.scan_seconds = Some(result.scan_seconds);
        self.last_error = None;
        self.dirty = true;
    }

    /// Records the failure for the view model. Rendered entries stay as they
    /// are, so the view is not marked dirty.
    pub(crate) fn apply_failure(&mut self, failure: QueryFailure) {
        self.last_error = Some(failure);
    }
}
