//! Classifier reply parsing.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use tick_core::entities::NewTask;
use tick_core::enums::{IntentAction, ListFilter};
use tick_core::errors::CoreError;
use tick_core::schedule::{normalize_duration, parse_date, parse_time};

use crate::error::IntentError;
use crate::schema;

/// The reply exactly as the classifier is asked to produce it.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RawIntent {
    CreateTask { data: RawCreateTask },
    MarkCompleted { data: RawMarkCompleted },
    EmailNextMeeting {},
    ListTasks {
        #[serde(default)]
        filter: Option<String>,
    },
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RawCreateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `YYYY-MM-DD` or `"TBD"`.
    #[serde(default)]
    pub date: Option<String>,
    /// `HH:MM` or `"TBD"`.
    #[serde(default)]
    pub time: Option<String>,
    /// Minutes.
    #[serde(default)]
    pub duration: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RawMarkCompleted {
    #[serde(rename = "taskTitle")]
    pub task_title: String,
}

/// A validated command, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    CreateTask(NewTask),
    MarkCompleted { task_title: String },
    EmailNextMeeting,
    ListTasks { filter: ListFilter },
}

impl Intent {
    #[must_use]
    pub const fn action(&self) -> IntentAction {
        match self {
            Self::CreateTask(_) => IntentAction::CreateTask,
            Self::MarkCompleted { .. } => IntentAction::MarkCompleted,
            Self::EmailNextMeeting => IntentAction::EmailNextMeeting,
            Self::ListTasks { .. } => IntentAction::ListTasks,
        }
    }
}

impl TryFrom<RawIntent> for Intent {
    type Error = IntentError;

    fn try_from(raw: RawIntent) -> Result<Self, Self::Error> {
        match raw {
            RawIntent::CreateTask { data } => {
                let scheduled_date = parse_date(data.date.as_deref().unwrap_or_default())
                    .map_err(|e| field_error("date", e))?;
                let scheduled_time = parse_time(data.time.as_deref().unwrap_or_default())
                    .map_err(|e| field_error("time", e))?;
                let description = data
                    .description
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty());
                Ok(Self::CreateTask(NewTask {
                    title: data.title.unwrap_or_default().trim().to_string(),
                    description,
                    scheduled_date,
                    scheduled_time,
                    duration_minutes: normalize_duration(data.duration),
                }))
            }
            RawIntent::MarkCompleted { data } => Ok(Self::MarkCompleted {
                task_title: data.task_title.trim().to_string(),
            }),
            RawIntent::EmailNextMeeting {} => Ok(Self::EmailNextMeeting),
            RawIntent::ListTasks { filter } => {
                let filter = match filter {
                    None => ListFilter::All,
                    Some(name) => {
                        ListFilter::parse(&name).ok_or(IntentError::UnknownFilter(name))?
                    }
                };
                Ok(Self::ListTasks { filter })
            }
        }
    }
}

fn field_error(field: &'static str, error: CoreError) -> IntentError {
    let reason = match error {
        CoreError::Validation(reason) => reason,
        other => other.to_string(),
    };
    IntentError::Field { field, reason }
}

/// Remove a surrounding markdown code fence (with optional language tag).
#[must_use]
pub fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Turn an untrusted classifier reply into an [`Intent`].
///
/// Nothing is partially accepted: any structural problem rejects the whole reply.
///
/// # Errors
///
/// Returns `IntentError` if the reply is not a JSON object, carries an
/// unknown action tag, fails schema validation, or has an unusable field.
pub fn parse_intent(raw: &str) -> Result<Intent, IntentError> {
    let body = strip_fences(raw);
    let value: Value =
        serde_json::from_str(body).map_err(|e| IntentError::Malformed(e.to_string()))?;

    let tag = value
        .get("action")
        .and_then(Value::as_str)
        .ok_or_else(|| IntentError::Malformed("missing action tag".into()))?;
    if IntentAction::parse(tag).is_none() {
        return Err(IntentError::UnknownAction(tag.to_string()));
    }

    schema::validate(&value)?;

    let raw: RawIntent =
        serde_json::from_value(value).map_err(|e| IntentError::Malformed(e.to_string()))?;
    Intent::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("{\"a\":1}", "{\"a\":1}")]
    #[case("```json\n{\"a\":1}\n```", "{\"a\":1}")]
    #[case("```\n{\"a\":1}```", "{\"a\":1}")]
    #[case("  ```JSON {\"a\":1} ```  ", "{\"a\":1}")]
    fn strips_fences(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(strip_fences(raw), expected);
    }

    #[test]
    fn create_task_from_fenced_reply() {
        let raw = "```json\n{\"action\": \"create_task\", \"data\": {\"title\": \"Staff Meeting\", \
                   \"description\": \"\", \"date\": \"2024-09-17\", \"time\": \"14:00\", \"duration\": 60}}\n```";
        let intent = parse_intent(raw).unwrap();
        assert_eq!(
            intent,
            Intent::CreateTask(NewTask {
                title: "Staff Meeting".into(),
                description: None,
                scheduled_date: NaiveDate::from_ymd_opt(2024, 9, 17),
                scheduled_time: NaiveTime::from_hms_opt(14, 0, 0),
                duration_minutes: 60,
            })
        );
        assert_eq!(intent.action(), IntentAction::CreateTask);
    }

    #[rstest]
    #[case(r#"{"action":"create_task","data":{"title":"Call mom","date":"TBD","time":"tbd"}}"#)]
    #[case(r#"{"action":"create_task","data":{"title":"Call mom","date":"","time":""}}"#)]
    #[case(r#"{"action":"create_task","data":{"title":"Call mom"}}"#)]
    fn undetermined_schedule_is_unscheduled(#[case] raw: &str) {
        let Intent::CreateTask(new) = parse_intent(raw).unwrap() else {
            panic!("expected create_task");
        };
        assert_eq!(new.scheduled_date, None);
        assert_eq!(new.scheduled_time, None);
        assert_eq!(new.duration_minutes, 60);
    }

    #[rstest]
    #[case(Some(0), 60)]
    #[case(Some(-15), 60)]
    #[case(None, 60)]
    #[case(Some(45), 45)]
    fn duration_defaults(#[case] duration: Option<i64>, #[case] expected: u32) {
        let raw = serde_json::json!({
            "action": "create_task",
            "data": {"title": "Walk", "duration": duration},
        })
        .to_string();
        let Intent::CreateTask(new) = parse_intent(&raw).unwrap() else {
            panic!("expected create_task");
        };
        assert_eq!(new.duration_minutes, expected);
    }

    #[test]
    fn malformed_date_is_a_field_error() {
        let raw = r#"{"action":"create_task","data":{"title":"Dentist","date":"next tuesday"}}"#;
        let err = parse_intent(raw).unwrap_err();
        assert!(matches!(err, IntentError::Field { field: "date", .. }));
    }

    #[test]
    fn mark_completed_reads_task_title() {
        let raw = r#"{"action":"mark_completed","data":{"taskTitle":" staff meeting "}}"#;
        assert_eq!(
            parse_intent(raw).unwrap(),
            Intent::MarkCompleted {
                task_title: "staff meeting".into()
            }
        );
    }

    #[test]
    fn list_filter_defaults_to_all() {
        let raw = r#"{"action":"list_tasks"}"#;
        assert_eq!(
            parse_intent(raw).unwrap(),
            Intent::ListTasks {
                filter: ListFilter::All
            }
        );
    }

    #[test]
    fn unknown_list_filter_is_rejected() {
        let raw = r#"{"action":"list_tasks","filter":"overdue"}"#;
        assert!(matches!(
            parse_intent(raw),
            Err(IntentError::UnknownFilter(ref f)) if f == "overdue"
        ));
    }

    #[test]
    fn email_next_meeting_needs_no_payload() {
        let raw = r#"{"action":"email_next_meeting"}"#;
        assert_eq!(parse_intent(raw).unwrap(), Intent::EmailNextMeeting);
    }

    #[rstest]
    #[case("Sure! I'll create that task.")]
    #[case("[1, 2, 3]")]
    #[case(r#"{"data": {"title": "x"}}"#)]
    fn non_object_or_untagged_replies_are_malformed(#[case] raw: &str) {
        assert!(matches!(parse_intent(raw), Err(IntentError::Malformed(_))));
    }

    #[test]
    fn unknown_action_is_rejected_before_schema() {
        let raw = r#"{"action":"delete_everything"}"#;
        assert!(matches!(
            parse_intent(raw),
            Err(IntentError::UnknownAction(ref a)) if a == "delete_everything"
        ));
    }

    #[test]
    fn schema_violation_is_rejected() {
        let raw = r#"{"action":"mark_completed","data":{"taskTitle": 42}}"#;
        assert!(matches!(parse_intent(raw), Err(IntentError::Schema { .. })));
    }
}
