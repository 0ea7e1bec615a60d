use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `tkl` binary.
#[derive(Debug, Parser)]
#[command(name = "tkl", version, about = "Tickler - task reminders and voice commands")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file (defaults to [database].path, then the user data dir)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Acting user, by ID or email (defaults to [general].default_owner)
    #[arg(short, long, global = true)]
    pub owner: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
            owner: self.owner.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{RemindCommands, TaskCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "tkl",
            "--format",
            "table",
            "--limit",
            "10",
            "--verbose",
            "task",
            "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Task {
                action: TaskCommands::List { .. }
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["tkl", "remind", "trigger", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Remind {
                action: RemindCommands::Trigger { .. }
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["tkl", "--format", "xml", "task", "list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn output_format_accepts_all_supported_values() {
        for value in ["json", "table", "raw"] {
            let cli = Cli::try_parse_from(["tkl", "--format", value, "user", "list"])
                .expect("cli should parse");
            assert!(matches!(cli.command, Commands::User { .. }));
        }
    }

    #[test]
    fn say_joins_transcript_words() {
        let cli = Cli::try_parse_from([
            "tkl",
            "say",
            "mark",
            "staff",
            "meeting",
            "as",
            "completed",
            "--owner",
            "ada@example.com",
        ])
        .expect("cli should parse");

        let Commands::Say(args) = cli.command else {
            panic!("expected say");
        };
        assert_eq!(args.transcript(), "mark staff meeting as completed");
        assert_eq!(cli.owner.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn say_requires_a_transcript() {
        assert!(Cli::try_parse_from(["tkl", "say"]).is_err());
    }

    #[test]
    fn serve_accepts_dry_run() {
        let cli = Cli::try_parse_from(["tkl", "serve", "--dry-run", "--interval", "5"])
            .expect("cli should parse");
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert!(args.dry_run);
        assert_eq!(args.interval, Some(5));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["tkl", "--db", "/tmp/demo.db", "-o", "usr-1", "user", "list"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/demo.db"));
        assert_eq!(flags.owner.as_deref(), Some("usr-1"));
    }
}
