//! Drives the pure state machine against a virtual clock: wakes fire when
//! due and queries complete after a per-keyword latency.
use std::sync::Once;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use quickopen_core::{update, AppState, AttemptId, Effect, Msg, SearchResult, WakeToken};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(quickopen_logging::initialize_for_tests);
}

enum Pending {
    Wake(WakeToken),
    Response(AttemptId, String),
}

struct Driver {
    state: Option<AppState>,
    t0: Instant,
    now: Instant,
    queue: Vec<(Instant, Pending)>,
    issued: Vec<(Duration, String)>,
    latency: Box<dyn Fn(&str) -> Duration>,
}

impl Driver {
    fn new() -> Self {
        Self::with_latency(|_| Duration::from_millis(50))
    }

    fn with_latency(latency: impl Fn(&str) -> Duration + 'static) -> Self {
        let t0 = Instant::now();
        Self {
            state: Some(AppState::new()),
            t0,
            now: t0,
            queue: Vec::new(),
            issued: Vec::new(),
            latency: Box::new(latency),
        }
    }

    fn state(&self) -> &AppState {
        self.state.as_ref().unwrap()
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = self.state.take().unwrap();
        let (state, effects) = update(state, msg);
        self.state = Some(state);
        for effect in effects {
            match effect {
                Effect::ScheduleWake { token, after } => {
                    self.queue.push((self.now + after, Pending::Wake(token)));
                }
                Effect::IssueQuery { attempt, query } => {
                    self.issued
                        .push((self.now - self.t0, query.keyword.clone()));
                    let due = self.now + (self.latency)(&query.keyword);
                    self.queue
                        .push((due, Pending::Response(attempt, query.keyword)));
                }
                Effect::CollapseSidebar | Effect::OpenDocument { .. } => {}
            }
        }
    }

    fn advance_to(&mut self, ms: u64) {
        let target = self.t0 + Duration::from_millis(ms);
        loop {
            let next = self
                .queue
                .iter()
                .enumerate()
                .filter(|(_, (due, _))| *due <= target)
                .min_by_key(|(_, (due, _))| *due)
                .map(|(index, _)| index);
            let Some(index) = next else { break };
            let (due, pending) = self.queue.remove(index);
            self.now = due;
            let msg = match pending {
                Pending::Wake(token) => Msg::Wake { token, now: due },
                Pending::Response(attempt, keyword) => Msg::QueryCompleted {
                    attempt,
                    outcome: Ok(SearchResult::from_categories(
                        vec![(keyword, vec!["hit.txt"])],
                        0.0,
                    )),
                },
            };
            self.dispatch(msg);
        }
        self.now = target;
    }

    fn activate_at(&mut self, ms: u64, text: &str) {
        self.advance_to(ms);
        let now = self.now;
        self.dispatch(Msg::Activated {
            input: text.to_string(),
            now,
        });
    }

    fn type_at(&mut self, ms: u64, text: &str) {
        self.advance_to(ms);
        let now = self.now;
        self.dispatch(Msg::InputChanged {
            input: text.to_string(),
            now,
        });
    }

    fn issued_keywords(&self) -> Vec<&str> {
        self.issued.iter().map(|(_, k)| k.as_str()).collect()
    }

    fn rendered_keyword(&self) -> Option<String> {
        self.state().view().rendered_keyword
    }
}

#[test]
fn slow_typing_converges_on_final_keyword() {
    init_logging();
    let mut driver = Driver::new();
    driver.activate_at(0, "");
    driver.type_at(100, "a");
    driver.type_at(3100, "ab");
    driver.type_at(6100, "abc");
    driver.advance_to(20_000);

    assert_eq!(driver.issued_keywords(), vec!["", "a", "ab", "abc"]);
    assert_eq!(driver.rendered_keyword().as_deref(), Some("abc"));
}

#[test]
fn burst_typing_issues_one_query_for_the_settled_keyword() {
    init_logging();
    let mut driver = Driver::new();
    for (ms, text) in [(0, "h"), (200, "he"), (400, "hel"), (600, "hell"), (800, "hello")] {
        driver.type_at(ms, text);
    }
    driver.advance_to(10_000);

    assert_eq!(driver.issued, vec![(Duration::from_millis(1800), "hello".to_string())]);
    assert_eq!(driver.rendered_keyword().as_deref(), Some("hello"));
}

#[test]
fn queries_never_violate_min_interval() {
    init_logging();
    let mut driver = Driver::new();
    driver.activate_at(0, "");

    // Deterministic pseudo-random keystroke gaps between 0 and 2.5 s.
    let mut seed: u64 = 0x5eed;
    let mut ms = 0;
    let mut text = String::new();
    for i in 0..200 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ms += (seed >> 33) % 2500;
        text.push(char::from(b'a' + (i % 26) as u8));
        if seed % 7 == 0 {
            text.clear();
        }
        driver.type_at(ms, &text);
    }
    driver.advance_to(ms + 10_000);

    let min_interval = Duration::from_millis(2000);
    for pair in driver.issued.windows(2) {
        assert!(
            pair[1].0 - pair[0].0 >= min_interval,
            "queries at {:?} and {:?} are too close",
            pair[0].0,
            pair[1].0
        );
    }
    assert_eq!(driver.rendered_keyword(), Some(text));
}

#[test]
fn each_stable_keyword_is_queried_at_most_once() {
    init_logging();
    let mut driver = Driver::new();
    driver.activate_at(0, "");
    driver.type_at(2500, "a");
    // Nothing changes for a long time: no polling queries.
    driver.advance_to(30_000);

    assert_eq!(driver.issued_keywords(), vec!["", "a"]);
}

#[test]
fn late_response_for_older_keyword_never_overwrites_newer_one() {
    init_logging();
    let mut driver = Driver::with_latency(|keyword| {
        if keyword == "slow" {
            Duration::from_millis(8000)
        } else {
            Duration::from_millis(10)
        }
    });
    driver.type_at(0, "slow");
    driver.type_at(1500, "fast");
    driver.advance_to(5000);
    assert_eq!(driver.issued_keywords(), vec!["slow", "fast"]);
    assert_eq!(driver.rendered_keyword().as_deref(), Some("fast"));

    // "slow" answers at 9 s, after "fast" was already applied.
    driver.advance_to(12_000);
    assert_eq!(driver.rendered_keyword().as_deref(), Some("fast"));
}
