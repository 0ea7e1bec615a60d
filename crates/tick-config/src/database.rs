//! Task store location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file. Empty means the per-user data directory.
    #[serde(default)]
    pub path: String,
}

impl DatabaseConfig {
    /// Resolve the database file path, falling back to `<data_dir>/tickler/tickler.db`.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        if !self.path.is_empty() {
            return PathBuf::from(&self.path);
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tickler")
            .join("tickler.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let config = DatabaseConfig {
            path: "/tmp/tasks.db".into(),
        };
        assert_eq!(config.resolved_path(), PathBuf::from("/tmp/tasks.db"));
    }

    #[test]
    fn default_path_ends_with_tickler_db() {
        let path = DatabaseConfig::default().resolved_path();
        assert!(path.ends_with("tickler/tickler.db"));
    }
}
