//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and cwd manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use tick_config::TicklerConfig;
use tick_core::enums::AmbiguityPolicy;

#[test]
fn loads_smtp_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[smtp]
host = "smtp.example.com"
port = 2525
username = "mailer"
password = "hunter2"
from = "Tickler <reminders@example.com>"
starttls = false
"#,
        )?;

        let config: TicklerConfig = Figment::from(Serialized::defaults(TicklerConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.smtp.host, "smtp.example.com");
        assert_eq!(config.smtp.port, 2525);
        assert_eq!(config.smtp.from, "Tickler <reminders@example.com>");
        assert!(!config.smtp.starttls);
        assert!(config.smtp.is_configured());
        assert!(config.smtp.has_credentials());
        Ok(())
    });
}

#[test]
fn loads_reminder_and_interpreter_sections() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[reminder]
tick_interval_secs = 30
window_start_minutes = 14
window_end_minutes = 15

[interpreter]
ambiguity = "first_match"
"#,
        )?;

        let config: TicklerConfig = Figment::from(Serialized::defaults(TicklerConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.reminder.tick_interval_secs, 30);
        assert_eq!(config.reminder.window_start_minutes, 14);
        assert_eq!(config.reminder.window_end_minutes, 15);
        assert_eq!(config.reminder.claim_ttl_secs, 120);
        assert_eq!(config.interpreter.ambiguity, AmbiguityPolicy::FirstMatch);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tickler")?;
        jail.create_file(
            ".tickler/config.toml",
            r#"
[general]
default_owner = "usr-deadbeef"
default_limit = 5
"#,
        )?;

        let config = TicklerConfig::load().expect("config loads");
        assert_eq!(config.general.default_owner, "usr-deadbeef");
        assert_eq!(config.general.default_limit, 5);
        Ok(())
    });
}

#[test]
fn invalid_window_fails_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tickler")?;
        jail.create_file(
            ".tickler/config.toml",
            r#"
[reminder]
window_start_minutes = 10
window_end_minutes = 5
"#,
        )?;

        let err = TicklerConfig::load().expect_err("inverted window should fail");
        assert!(err.to_string().contains("window_end_minutes"));
        Ok(())
    });
}
