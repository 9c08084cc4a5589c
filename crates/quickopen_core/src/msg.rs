use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The quick-open panel became visible; `input` is the search box content.
    Activated { input: String, now: Instant },
    /// The search box content changed.
    InputChanged { input: String, now: Instant },
    /// A wake scheduled through `Effect::ScheduleWake` is due.
    Wake {
        token: crate::WakeToken,
        now: Instant,
    },
    /// Outcome of a query issued through `Effect::IssueQuery`.
    QueryCompleted {
        attempt: crate::AttemptId,
        outcome: Result<crate::SearchResult, crate::QueryFailure>,
    },
    /// User activated a rendered entry.
    EntrySelected { activation_id: String },
    /// Settings were reloaded; applies to the next issued query.
    SettingsChanged(crate::QuickOpenSettings),
    /// The host's file browser moved to another directory.
    BrowsePathChanged(String),
}
