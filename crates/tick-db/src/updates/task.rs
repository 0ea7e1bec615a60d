//! Task update builder and write preconditions.

use chrono::{NaiveDate, NaiveTime};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub scheduled_date: Option<Option<NaiveDate>>,
    pub scheduled_time: Option<Option<NaiveTime>>,
    pub duration_minutes: Option<u32>,
    pub completed: Option<bool>,
    /// Setting the latch in either direction also drops any outstanding send claim.
    pub reminder_sent: Option<bool>,
}

impl TaskUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.scheduled_date.is_none()
            && self.scheduled_time.is_none()
            && self.duration_minutes.is_none()
            && self.completed.is_none()
            && self.reminder_sent.is_none()
    }
}

pub struct TaskUpdateBuilder(TaskUpdate);

impl Default for TaskUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub const fn scheduled_date(mut self, date: Option<NaiveDate>) -> Self {
        self.0.scheduled_date = Some(date);
        self
    }

    #[must_use]
    pub const fn scheduled_time(mut self, time: Option<NaiveTime>) -> Self {
        self.0.scheduled_time = Some(time);
        self
    }

    #[must_use]
    pub const fn duration_minutes(mut self, minutes: u32) -> Self {
        self.0.duration_minutes = Some(minutes);
        self
    }

    #[must_use]
    pub const fn completed(mut self, completed: bool) -> Self {
        self.0.completed = Some(completed);
        self
    }

    #[must_use]
    pub const fn reminder_sent(mut self, sent: bool) -> Self {
        self.0.reminder_sent = Some(sent);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}

/// Column values a row must still hold for a conditional update to apply.
///
/// Every `Some` field becomes an `AND` term in the `WHERE` clause, so the
/// check and the write happen in one statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskExpectation {
    pub owner_id: Option<String>,
    pub completed: Option<bool>,
    pub reminder_sent: Option<bool>,
    /// The send claim token that must currently be held.
    pub reminder_claim: Option<String>,
}

impl TaskExpectation {
    /// Only the owner must match.
    #[must_use]
    pub fn owned_by(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: Some(owner_id.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_only_touched_fields() {
        let update = TaskUpdateBuilder::new().title("Renamed").completed(true).build();
        assert_eq!(update.title.as_deref(), Some("Renamed"));
        assert_eq!(update.completed, Some(true));
        assert!(update.description.is_none());
        assert!(!update.is_empty());
        assert!(TaskUpdateBuilder::new().build().is_empty());
    }

    #[test]
    fn clearing_description_is_distinct_from_leaving_it() {
        let update = TaskUpdateBuilder::new().description(None).build();
        assert_eq!(update.description, Some(None));
    }
}
