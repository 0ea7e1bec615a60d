use clap::Subcommand;

/// Reminder commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RemindCommands {
    /// Run one reminder cycle now.
    Trigger {
        /// Log due reminders without sending or recording them.
        #[arg(long)]
        dry_run: bool,
    },
    /// List the acting user's reminders due soon.
    Upcoming {
        /// Horizon in minutes (defaults to [reminder].upcoming_horizon_minutes)
        #[arg(long)]
        minutes: Option<i64>,
    },
    /// Re-arm a task's reminder so it can fire again.
    Reset { id: String },
}
