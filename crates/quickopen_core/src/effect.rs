use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg::Wake { token, .. }` once `after` has elapsed.
    ScheduleWake {
        token: crate::WakeToken,
        after: Duration,
    },
    /// Run the query and deliver `Msg::QueryCompleted { attempt, .. }`.
    IssueQuery {
        attempt: crate::AttemptId,
        query: crate::SearchQuery,
    },
    CollapseSidebar,
    OpenDocument {
        path: String,
    },
}
