use std::sync::Arc;

use tick_reminder::{ReminderScheduler, upcoming_reminders};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RemindCommands;
use crate::commands::shared::owner::require_owner;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tkl remind`.
pub async fn handle(
    action: &RemindCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        RemindCommands::Trigger { dry_run } => trigger(*dry_run, ctx, flags).await,
        RemindCommands::Upcoming { minutes } => upcoming(*minutes, ctx, flags).await,
        RemindCommands::Reset { id } => {
            let owner = require_owner(ctx).await?;
            let task = ctx
                .store
                .reset_reminder(&owner.id, id)
                .await
                .map_err(|error| match error {
                    tick_db::error::DatabaseError::NoResult => {
                        anyhow::anyhow!("task {id} not found")
                    }
                    other => other.into(),
                })?;
            output(&task, flags.format)
        }
    }
}

/// One cycle through the same scheduler path the daemon uses.
async fn trigger(dry_run: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let scheduler = ReminderScheduler::from_config(
        Arc::clone(&ctx.store),
        ctx.notifier(dry_run)?,
        Arc::clone(&ctx.clock),
        &ctx.config.reminder,
    );
    let report = scheduler.run_cycle().await;
    output(&report, flags.format)
}

async fn upcoming(minutes: Option<i64>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let horizon = minutes.unwrap_or(ctx.config.reminder.upcoming_horizon_minutes);
    anyhow::ensure!(horizon > 0, "--minutes must be positive");

    let owner = require_owner(ctx).await?;
    let reminders = upcoming_reminders(&ctx.store, &owner.id, ctx.clock.now(), horizon).await?;
    output(&reminders, flags.format)
}
