use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::schedule;

/// A personal task, optionally pinned to a date and time of day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, with = "schedule::hhmm_option")]
    #[schemars(with = "Option<String>")]
    pub scheduled_time: Option<NaiveTime>,
    pub duration_minutes: u32,
    pub completed: bool,
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Local wall-clock start, or `None` when the task is unscheduled.
    #[must_use]
    pub fn scheduled_instant(&self) -> Option<NaiveDateTime> {
        schedule::scheduled_instant(self.scheduled_date, self.scheduled_time)
    }

    /// Pending, not yet reminded, and fully scheduled.
    #[must_use]
    pub fn is_reminder_candidate(&self) -> bool {
        !self.completed && !self.reminder_sent && self.scheduled_instant().is_some()
    }
}

/// Fields supplied when creating a task. The store assigns everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<NaiveTime>,
    pub duration_minutes: u32,
}

impl NewTask {
    /// Start a task with the default duration and no schedule.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            duration_minutes: schedule::DEFAULT_DURATION_MINUTES,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn scheduled(mut self, date: NaiveDate, time: NaiveTime) -> Self {
        self.scheduled_date = Some(date);
        self.scheduled_time = Some(time);
        self
    }

    #[must_use]
    pub const fn duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }
}
