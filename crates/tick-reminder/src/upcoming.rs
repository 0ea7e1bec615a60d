use chrono::{Duration, NaiveDateTime};

use tick_core::responses::UpcomingReminder;
use tick_core::schedule::{is_upcoming, minutes_until};
use tick_db::error::DatabaseError;
use tick_db::repos::task::TaskFilter;
use tick_db::service::TaskStore;

/// The owner's pending, un-reminded tasks starting within `horizon_minutes` of `now`.
///
/// # Errors
///
/// Returns `DatabaseError` if the store query fails.
pub async fn upcoming_reminders(
    store: &TaskStore,
    owner_id: &str,
    now: NaiveDateTime,
    horizon_minutes: i64,
) -> Result<Vec<UpcomingReminder>, DatabaseError> {
    let until = now + Duration::minutes(horizon_minutes.max(0) + 1);
    let filter = TaskFilter {
        owner_id: Some(owner_id.to_string()),
        ..TaskFilter::reminder_candidates(now.date(), until.date())
    };

    let upcoming = store
        .find_tasks(&filter)
        .await?
        .into_iter()
        .filter_map(|task| {
            let scheduled_at = task.scheduled_instant()?;
            let minutes_until_start = minutes_until(scheduled_at, now);
            is_upcoming(minutes_until_start, horizon_minutes).then_some(UpcomingReminder {
                task,
                scheduled_at,
                minutes_until_start,
            })
        })
        .collect();
    Ok(upcoming)
}
