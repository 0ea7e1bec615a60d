use tick_core::entities::NewTask;
use tick_core::schedule::normalize_duration;

use crate::cli::GlobalFlags;
use crate::commands::shared::owner::require_owner;
use crate::commands::shared::parse::{parse_date_arg, parse_time_arg};
use crate::context::AppContext;
use crate::output::output;

pub struct Params {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration: Option<i64>,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let owner = require_owner(ctx).await?;
    let new = new_task(params)?;
    let task = ctx.store.create_task(&owner.id, &new).await?;
    output(&task, flags.format)
}

fn new_task(params: Params) -> anyhow::Result<NewTask> {
    Ok(NewTask {
        title: params.title,
        description: params
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        scheduled_date: parse_date_arg(params.date.as_deref())?,
        scheduled_time: parse_time_arg(params.time.as_deref())?,
        duration_minutes: normalize_duration(params.duration),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    use super::{Params, new_task};

    fn params() -> Params {
        Params {
            title: "Staff Meeting".to_string(),
            description: None,
            date: None,
            time: None,
            duration: None,
        }
    }

    #[test]
    fn defaults_to_unscheduled_hour() {
        let new = new_task(params()).unwrap();
        assert_eq!(new.duration_minutes, 60);
        assert!(new.scheduled_date.is_none());
        assert!(new.scheduled_time.is_none());
    }

    #[test]
    fn parses_schedule_and_blank_description() {
        let new = new_task(Params {
            description: Some("   ".to_string()),
            date: Some("2024-09-17".to_string()),
            time: Some("14:00".to_string()),
            duration: Some(-5),
            ..params()
        })
        .unwrap();
        assert_eq!(new.scheduled_date, NaiveDate::from_ymd_opt(2024, 9, 17));
        assert_eq!(new.scheduled_time, NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(new.description, None);
        assert_eq!(new.duration_minutes, 60);
    }

    #[test]
    fn rejects_malformed_time() {
        let result = new_task(Params {
            time: Some("2pm".to_string()),
            ..params()
        });
        assert!(result.is_err());
    }
}
