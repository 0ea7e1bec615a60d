use chrono::NaiveDate;
use tick_core::enums::ListFilter;
use tick_db::repos::task::TaskFilter;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::owner::require_owner;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    filter: Option<&str>,
    search: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let owner = require_owner(ctx).await?;
    let filter = filter
        .map(|raw| parse_enum::<ListFilter>(raw, "filter"))
        .transpose()?
        .unwrap_or_default();
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);

    let query = task_filter(&owner.id, filter, search, ctx.clock.today(), limit);
    let tasks = ctx.store.find_tasks(&query).await?;
    output(&tasks, flags.format)
}

fn task_filter(
    owner_id: &str,
    filter: ListFilter,
    search: Option<&str>,
    today: NaiveDate,
    limit: u32,
) -> TaskFilter {
    TaskFilter {
        completed: filter.completed(),
        scheduled_on: filter.pinned_date(today),
        title_contains: search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        limit: Some(limit),
        ..TaskFilter::owned_by(owner_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tick_core::enums::ListFilter;

    use super::task_filter;

    #[test]
    fn pending_filter_excludes_completed() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 16).unwrap();
        let query = task_filter("usr-1", ListFilter::Pending, None, today, 20);
        assert_eq!(query.owner_id.as_deref(), Some("usr-1"));
        assert_eq!(query.completed, Some(false));
        assert_eq!(query.scheduled_on, None);
        assert_eq!(query.limit, Some(20));
    }

    #[test]
    fn tomorrow_pins_the_next_date() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
        let query = task_filter("usr-1", ListFilter::Tomorrow, Some(" staff "), today, 5);
        assert_eq!(query.scheduled_on, NaiveDate::from_ymd_opt(2024, 10, 1));
        assert_eq!(query.completed, None);
        assert_eq!(query.title_contains.as_deref(), Some("staff"));
    }
}
