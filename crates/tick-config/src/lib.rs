//! # tick-config
//!
//! Layered configuration loading for Tickler using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TICKLER_*` prefix, `__` as separator)
//! 2. Project-level `.tickler/config.toml`
//! 3. User-level `~/.config/tickler/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TICKLER_SMTP__HOST` -> `smtp.host`, `TICKLER_GEMINI__API_KEY` -> `gemini.api_key`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use tick_config::TicklerConfig;
//!
//! let config = TicklerConfig::load_with_dotenv().expect("config");
//!
//! if config.smtp.is_configured() {
//!     println!("SMTP relay: {}", config.smtp.host);
//! }
//! ```

mod database;
mod error;
mod gemini;
mod general;
mod interpreter;
mod reminder;
mod smtp;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use gemini::GeminiConfig;
pub use general::GeneralConfig;
pub use interpreter::InterpreterConfig;
pub use reminder::ReminderConfig;
pub use smtp::SmtpConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "TICKLER_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TicklerConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub reminder: ReminderConfig,
    #[serde(default)]
    pub interpreter: InterpreterConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl TicklerConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed, or
    /// `ConfigError::InvalidValue` if the reminder timing is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.reminder.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (or the nearest parent that has
    /// one) before building the figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".tickler/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tickler").join("config.toml"))
    }
}
