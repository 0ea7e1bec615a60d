use clap::Subcommand;

/// Task entity commands. All are scoped to the acting user.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Create a task.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Scheduled date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// Scheduled time, HH:MM
        #[arg(long)]
        time: Option<String>,
        /// Duration in minutes (default 60)
        #[arg(long)]
        duration: Option<i64>,
    },
    /// Update a task.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        duration: Option<i64>,
        /// Remove the scheduled date and time.
        #[arg(long, conflicts_with_all = ["date", "time"])]
        unschedule: bool,
    },
    /// List tasks.
    List {
        /// all, pending, completed, today, tomorrow
        #[arg(long)]
        filter: Option<String>,
        /// Case-insensitive title substring
        #[arg(long)]
        search: Option<String>,
    },
    /// Get a task by ID.
    Get { id: String },
    /// Mark a task completed.
    Complete { id: String },
    /// Delete a task.
    Delete { id: String },
}
