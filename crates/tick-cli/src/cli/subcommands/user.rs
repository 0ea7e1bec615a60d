use clap::Subcommand;

/// User contact commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Add a user.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Get a user by ID or email.
    Get { id: String },
    /// List users.
    List,
}
