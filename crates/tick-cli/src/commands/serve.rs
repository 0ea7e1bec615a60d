use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tick_reminder::{ReminderScheduler, ReminderService};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;

/// Handle `tkl serve`: run the reminder timer until Ctrl-C.
pub async fn handle(args: &ServeArgs, ctx: &AppContext, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let interval_secs = args
        .interval
        .unwrap_or(ctx.config.reminder.tick_interval_secs);
    anyhow::ensure!(interval_secs > 0, "--interval must be at least 1 second");

    let scheduler = Arc::new(ReminderScheduler::from_config(
        Arc::clone(&ctx.store),
        ctx.notifier(args.dry_run)?,
        Arc::clone(&ctx.clock),
        &ctx.config.reminder,
    ));
    let service = ReminderService::new(scheduler, Duration::from_secs(interval_secs));

    service.start();
    tracing::info!(dry_run = args.dry_run, "tickler reminder daemon running; Ctrl-C to stop");

    let signal = tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal");

    tracing::info!("shutting down");
    service.stop().await;
    signal
}
