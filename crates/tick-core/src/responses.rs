//! Response types returned by the interpreter, the reminder cycle, and `tkl` commands.

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Task;
use crate::enums::{FailureKind, IntentAction, InterpretState};

/// Affected task(s) attached to a successful command.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum OutcomePayload {
    Task(Box<Task>),
    Tasks(Vec<Task>),
}

/// Uniform result of interpreting one transcript.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    pub message: String,
    pub state: InterpretState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<IntentAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<OutcomePayload>,
}

impl CommandOutcome {
    /// The intent executed and succeeded.
    #[must_use]
    pub fn completed(
        action: IntentAction,
        message: impl Into<String>,
        payload: Option<OutcomePayload>,
    ) -> Self {
        Self {
            success: true,
            message: message.into(),
            state: InterpretState::Completed,
            action: Some(action),
            failure: None,
            payload,
        }
    }

    /// The transcript never reached execution.
    #[must_use]
    pub fn rejected(failure: FailureKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            state: InterpretState::Rejected,
            action: None,
            failure: Some(failure),
            payload: None,
        }
    }

    /// The intent was recognized but its execution failed.
    #[must_use]
    pub fn failed(action: IntentAction, failure: FailureKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            state: InterpretState::Failed,
            action: Some(action),
            failure: Some(failure),
            payload: None,
        }
    }

    /// Tasks carried by the payload, if any.
    #[must_use]
    pub fn tasks(&self) -> Vec<&Task> {
        match &self.payload {
            Some(OutcomePayload::Task(task)) => vec![task.as_ref()],
            Some(OutcomePayload::Tasks(tasks)) => tasks.iter().collect(),
            None => Vec::new(),
        }
    }
}

/// Tally of one reminder cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CycleReport {
    pub ran_at: Option<NaiveDateTime>,
    /// Another cycle held the guard, so this one did nothing.
    pub overlapped: bool,
    pub candidates: u32,
    pub due: u32,
    pub sent: u32,
    /// Logged by a dry run; the store was left untouched.
    pub previewed: u32,
    pub failed: u32,
    pub skipped_no_contact: u32,
    pub skipped_claimed: u32,
    pub store_errors: u32,
}

impl CycleReport {
    #[must_use]
    pub fn overlapped(ran_at: NaiveDateTime) -> Self {
        Self {
            ran_at: Some(ran_at),
            overlapped: true,
            ..Self::default()
        }
    }
}

/// A task starting soon, with its lead time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UpcomingReminder {
    pub task: Task,
    pub scheduled_at: NaiveDateTime,
    pub minutes_until_start: i64,
}
