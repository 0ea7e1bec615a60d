use tick_core::schedule::normalize_duration;
use tick_db::updates::task::{TaskUpdate, TaskUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::commands::shared::owner::require_owner;
use crate::commands::shared::parse::{parse_date_arg, parse_time_arg};
use crate::context::AppContext;
use crate::output::output;

pub struct Params {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration: Option<i64>,
    pub unschedule: bool,
}

pub async fn run(params: Params, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    validate_update_params(&params)?;
    let owner = require_owner(ctx).await?;
    let update = build_update(&params)?;

    let task = ctx
        .store
        .update_task(&owner.id, &params.id, &update)
        .await
        .map_err(|error| match error {
            tick_db::error::DatabaseError::NoResult => {
                anyhow::anyhow!("task {} not found", params.id)
            }
            other => other.into(),
        })?;
    output(&task, flags.format)
}

fn build_update(params: &Params) -> anyhow::Result<TaskUpdate> {
    let mut builder = TaskUpdateBuilder::new();
    if let Some(title) = params.title.as_deref() {
        builder = builder.title(title.trim());
    }
    if let Some(description) = params.description.as_deref() {
        let description = description.trim();
        builder = builder.description((!description.is_empty()).then(|| description.to_string()));
    }
    if params.unschedule {
        builder = builder.scheduled_date(None).scheduled_time(None);
    }
    if params.date.is_some() {
        builder = builder.scheduled_date(parse_date_arg(params.date.as_deref())?);
    }
    if params.time.is_some() {
        builder = builder.scheduled_time(parse_time_arg(params.time.as_deref())?);
    }
    if let Some(duration) = params.duration {
        builder = builder.duration_minutes(normalize_duration(Some(duration)));
    }
    Ok(builder.build())
}

fn validate_update_params(params: &Params) -> anyhow::Result<()> {
    if params.title.is_none()
        && params.description.is_none()
        && params.date.is_none()
        && params.time.is_none()
        && params.duration.is_none()
        && !params.unschedule
    {
        anyhow::bail!(
            "At least one of --title, --description, --date, --time, --duration, or --unschedule must be provided"
        );
    }
    Ok(())
}
