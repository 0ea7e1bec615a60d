//! List filters, intent actions, failure kinds, and the interpretation state machine.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use chrono::{Duration, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::Task;

// ---------------------------------------------------------------------------
// ListFilter
// ---------------------------------------------------------------------------

/// Which of the caller's tasks a list request returns.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ListFilter {
    #[default]
    All,
    Pending,
    Completed,
    Today,
    Tomorrow,
}

impl ListFilter {
    pub const ALL: &'static [Self] = &[
        Self::All,
        Self::Pending,
        Self::Completed,
        Self::Today,
        Self::Tomorrow,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
        }
    }

    /// Parse a filter name. Returns `None` for anything outside the closed set.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    /// The scheduled date this filter pins, relative to `today`.
    #[must_use]
    pub fn pinned_date(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Today => Some(today),
            Self::Tomorrow => Some(today + Duration::days(1)),
            Self::All | Self::Pending | Self::Completed => None,
        }
    }

    /// Completion state this filter requires, if any.
    #[must_use]
    pub const fn completed(self) -> Option<bool> {
        match self {
            Self::Pending => Some(false),
            Self::Completed => Some(true),
            Self::All | Self::Today | Self::Tomorrow => None,
        }
    }

    #[must_use]
    pub fn matches(self, task: &Task, today: NaiveDate) -> bool {
        let completion_ok = self
            .completed()
            .is_none_or(|completed| task.completed == completed);
        completion_ok
            && self
                .pinned_date(today)
                .is_none_or(|date| task.scheduled_date == Some(date))
    }
}

impl fmt::Display for ListFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AmbiguityPolicy
// ---------------------------------------------------------------------------

/// How a completion command resolves a title that matches several tasks.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Fail with the candidate titles unless exactly one title matches exactly.
    #[default]
    Reject,
    /// Complete the first candidate in store order.
    FirstMatch,
}

impl AmbiguityPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::FirstMatch => "first_match",
        }
    }
}

impl fmt::Display for AmbiguityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IntentAction
// ---------------------------------------------------------------------------

/// Action tag carried by a classified intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IntentAction {
    CreateTask,
    MarkCompleted,
    EmailNextMeeting,
    ListTasks,
}

impl IntentAction {
    pub const ALL: &'static [Self] = &[
        Self::CreateTask,
        Self::MarkCompleted,
        Self::EmailNextMeeting,
        Self::ListTasks,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateTask => "create_task",
            Self::MarkCompleted => "mark_completed",
            Self::EmailNextMeeting => "email_next_meeting",
            Self::ListTasks => "list_tasks",
        }
    }

    /// Look up an action tag. Returns `None` for unrecognized tags.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|action| action.as_str() == raw)
    }
}

impl fmt::Display for IntentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// InterpretState
// ---------------------------------------------------------------------------

/// Per-invocation state of the command interpreter. Never persisted.
///
/// ```text
/// received → classifying → executing → completed
///                                    → failed
///                        → rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InterpretState {
    Received,
    Classifying,
    Executing,
    Rejected,
    Completed,
    Failed,
}

impl InterpretState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Received => &[Self::Classifying, Self::Rejected],
            Self::Classifying => &[Self::Executing, Self::Rejected],
            Self::Executing => &[Self::Completed, Self::Failed],
            Self::Rejected | Self::Completed | Self::Failed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Classifying => "classifying",
            Self::Executing => "executing",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for InterpretState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FailureKind
// ---------------------------------------------------------------------------

/// Category of a failed interpretation, reported alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    NotFound,
    Ambiguous,
    Classification,
    Delivery,
    Store,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Ambiguous => "ambiguous",
            Self::Classification => "classification",
            Self::Delivery => "delivery",
            Self::Store => "store",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task_on(date: Option<NaiveDate>, completed: bool) -> Task {
        Task {
            id: "tsk-00000001".into(),
            owner_id: "usr-00000001".into(),
            title: "Standup".into(),
            description: None,
            scheduled_date: date,
            scheduled_time: None,
            duration_minutes: 60,
            completed,
            reminder_sent: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn list_filter_serde_roundtrip() {
        for filter in ListFilter::ALL {
            let json = serde_json::to_string(filter).unwrap();
            assert_eq!(json, format!("\"{}\"", filter.as_str()));
            let back: ListFilter = serde_json::from_str(&json).unwrap();
            assert_eq!(*filter, back);
        }
    }

    #[test]
    fn list_filter_parse_is_closed() {
        assert_eq!(ListFilter::parse("Today"), Some(ListFilter::Today));
        assert_eq!(ListFilter::parse(" pending "), Some(ListFilter::Pending));
        assert_eq!(ListFilter::parse("yesterday"), None);
    }

    #[test]
    fn today_and_tomorrow_pin_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 16).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2024, 9, 17).unwrap();

        assert!(ListFilter::Today.matches(&task_on(Some(today), false), today));
        assert!(!ListFilter::Today.matches(&task_on(Some(tomorrow), false), today));
        assert!(!ListFilter::Today.matches(&task_on(None, false), today));
        assert!(ListFilter::Tomorrow.matches(&task_on(Some(tomorrow), true), today));
    }

    #[test]
    fn pending_and_completed_split_on_completion() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 16).unwrap();
        let open = task_on(None, false);
        let done = task_on(None, true);

        assert!(ListFilter::Pending.matches(&open, today));
        assert!(!ListFilter::Pending.matches(&done, today));
        assert!(ListFilter::Completed.matches(&done, today));
        assert!(ListFilter::All.matches(&open, today) && ListFilter::All.matches(&done, today));
    }

    #[test]
    fn intent_action_tags() {
        assert_eq!(IntentAction::parse("create_task"), Some(IntentAction::CreateTask));
        assert_eq!(IntentAction::parse("delete_everything"), None);
        assert_eq!(IntentAction::EmailNextMeeting.to_string(), "email_next_meeting");
    }

    #[test]
    fn interpret_state_transitions() {
        assert!(InterpretState::Received.can_transition_to(InterpretState::Classifying));
        assert!(InterpretState::Received.can_transition_to(InterpretState::Rejected));
        assert!(InterpretState::Classifying.can_transition_to(InterpretState::Executing));
        assert!(InterpretState::Executing.can_transition_to(InterpretState::Failed));
        assert!(!InterpretState::Classifying.can_transition_to(InterpretState::Completed));
        assert!(!InterpretState::Executing.can_transition_to(InterpretState::Rejected));
    }

    #[test]
    fn terminal_states_have_no_successors() {
        for state in [
            InterpretState::Rejected,
            InterpretState::Completed,
            InterpretState::Failed,
        ] {
            assert!(state.is_terminal());
            assert!(state.allowed_next_states().is_empty());
        }
        assert!(!InterpretState::Executing.is_terminal());
    }

    #[test]
    fn ambiguity_policy_defaults_to_reject() {
        assert_eq!(AmbiguityPolicy::default(), AmbiguityPolicy::Reject);
        let parsed: AmbiguityPolicy = serde_json::from_str("\"first_match\"").unwrap();
        assert_eq!(parsed, AmbiguityPolicy::FirstMatch);
    }
}
