//! Environment variable layering over TOML and defaults.

use figment::Jail;
use pretty_assertions::assert_eq;
use tick_config::TicklerConfig;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("TICKLER_GEMINI__API_KEY", "gm-from-env");
        jail.set_env("TICKLER_SMTP__HOST", "relay.internal");
        jail.set_env("TICKLER_SMTP__FROM", "noreply@example.com");
        jail.set_env("TICKLER_REMINDER__TICK_INTERVAL_SECS", "15");

        let config = TicklerConfig::load().expect("config loads");
        assert_eq!(config.gemini.api_key, "gm-from-env");
        assert!(config.gemini.is_configured());
        assert_eq!(config.smtp.host, "relay.internal");
        assert!(config.smtp.is_configured());
        assert_eq!(config.reminder.tick_interval_secs, 15);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tickler")?;
        jail.create_file(
            ".tickler/config.toml",
            r#"
[database]
path = "from-toml.db"
"#,
        )?;
        jail.set_env("TICKLER_DATABASE__PATH", "from-env.db");

        let config = TicklerConfig::load().expect("config loads");
        assert_eq!(config.database.path, "from-env.db");
        Ok(())
    });
}

#[test]
fn single_underscore_does_not_nest() {
    Jail::expect_with(|jail| {
        jail.set_env("TICKLER_GEMINI_API_KEY", "ignored");

        let config = TicklerConfig::load().expect("config loads");
        assert!(!config.gemini.is_configured());
        Ok(())
    });
}
