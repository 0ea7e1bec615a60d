use clap::{Args, Subcommand};

use crate::cli::subcommands::{RemindCommands, TaskCommands, UserCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the reminder scheduler until interrupted.
    Serve(ServeArgs),
    /// Interpret a spoken command transcript.
    Say(SayArgs),
    /// Reminder cycle operations.
    Remind {
        #[command(subcommand)]
        action: RemindCommands,
    },
    /// Task administration.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// User contact records.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Log due reminders without sending or recording them.
    #[arg(long)]
    pub dry_run: bool,

    /// Seconds between cycles (defaults to [reminder].tick_interval_secs)
    #[arg(long)]
    pub interval: Option<u64>,
}

#[derive(Clone, Debug, Args)]
pub struct SayArgs {
    /// Transcript text; separate words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub words: Vec<String>,

    /// Log the next-meeting email instead of sending it.
    #[arg(long)]
    pub dry_run: bool,
}

impl SayArgs {
    #[must_use]
    pub fn transcript(&self) -> String {
        self.words.join(" ")
    }
}
