use std::path::PathBuf;

use anyhow::Context;
use tick_config::TicklerConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, reading `.env` first.
pub fn load_config() -> anyhow::Result<TicklerConfig> {
    TicklerConfig::load_with_dotenv().context("failed to load tickler configuration")
}

/// Database location: `--db` wins over `[database].path`, which wins over the data dir default.
#[must_use]
pub fn resolve_db_path(flags: &GlobalFlags, config: &TicklerConfig) -> PathBuf {
    flags
        .db
        .as_deref()
        .map_or_else(|| config.database.resolved_path(), PathBuf::from)
}

/// Owner for owner-scoped commands: `--owner` wins over `[general].default_owner`.
#[must_use]
pub fn resolve_owner(flags: &GlobalFlags, config: &TicklerConfig) -> Option<String> {
    flags
        .owner
        .as_deref()
        .map(str::trim)
        .filter(|owner| !owner.is_empty())
        .or_else(|| Some(config.general.default_owner.trim()).filter(|owner| !owner.is_empty()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tick_config::TicklerConfig;

    use super::{resolve_db_path, resolve_owner};
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(db: Option<&str>, owner: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            quiet: false,
            verbose: false,
            db: db.map(str::to_string),
            owner: owner.map(str::to_string),
        }
    }

    #[test]
    fn db_flag_overrides_config() {
        let mut config = TicklerConfig::default();
        config.database.path = "/var/lib/tickler.db".to_string();

        assert_eq!(
            resolve_db_path(&flags(Some("/tmp/override.db"), None), &config),
            PathBuf::from("/tmp/override.db")
        );
        assert_eq!(
            resolve_db_path(&flags(None, None), &config),
            PathBuf::from("/var/lib/tickler.db")
        );
    }

    #[test]
    fn owner_flag_overrides_default_owner() {
        let mut config = TicklerConfig::default();
        config.general.default_owner = "usr-00000001".to_string();

        assert_eq!(
            resolve_owner(&flags(None, Some("ada@example.com")), &config).as_deref(),
            Some("ada@example.com")
        );
        assert_eq!(
            resolve_owner(&flags(None, None), &config).as_deref(),
            Some("usr-00000001")
        );
    }

    #[test]
    fn blank_owner_is_unset() {
        let config = TicklerConfig::default();
        assert!(resolve_owner(&flags(None, Some("  ")), &config).is_none());
    }
}
