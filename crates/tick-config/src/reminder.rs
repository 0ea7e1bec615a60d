//! Reminder scheduler timing.

use serde::{Deserialize, Serialize};
use tick_core::schedule::ReminderWindow;

use crate::error::ConfigError;

const fn default_tick_interval_secs() -> u64 {
    60
}

const fn default_window_start_minutes() -> i64 {
    9
}

const fn default_window_end_minutes() -> i64 {
    10
}

const fn default_claim_ttl_secs() -> u64 {
    120
}

const fn default_upcoming_horizon_minutes() -> i64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReminderConfig {
    /// Seconds between timer-driven cycles.
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,

    /// Earliest lead time (whole minutes) at which a reminder fires.
    #[serde(default = "default_window_start_minutes")]
    pub window_start_minutes: i64,

    /// Latest lead time (whole minutes) at which a reminder fires.
    #[serde(default = "default_window_end_minutes")]
    pub window_end_minutes: i64,

    /// Age after which an unfinished send claim may be taken over by another cycle.
    #[serde(default = "default_claim_ttl_secs")]
    pub claim_ttl_secs: u64,

    /// How far ahead `remind upcoming` looks.
    #[serde(default = "default_upcoming_horizon_minutes")]
    pub upcoming_horizon_minutes: i64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval_secs(),
            window_start_minutes: default_window_start_minutes(),
            window_end_minutes: default_window_end_minutes(),
            claim_ttl_secs: default_claim_ttl_secs(),
            upcoming_horizon_minutes: default_upcoming_horizon_minutes(),
        }
    }
}

impl ReminderConfig {
    #[must_use]
    pub const fn window(&self) -> ReminderWindow {
        ReminderWindow::new(self.window_start_minutes, self.window_end_minutes)
    }

    /// Reject settings the scheduler cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero interval, a negative or
    /// inverted window, or a zero claim TTL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_secs == 0 {
            return Err(invalid("reminder.tick_interval_secs", "must be at least 1"));
        }
        if self.window_start_minutes < 0 {
            return Err(invalid("reminder.window_start_minutes", "must not be negative"));
        }
        if self.window_end_minutes < self.window_start_minutes {
            return Err(invalid(
                "reminder.window_end_minutes",
                "must not be earlier than window_start_minutes",
            ));
        }
        if self.claim_ttl_secs == 0 {
            return Err(invalid("reminder.claim_ttl_secs", "must be at least 1"));
        }
        if self.upcoming_horizon_minutes <= 0 {
            return Err(invalid("reminder.upcoming_horizon_minutes", "must be positive"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ReminderConfig::default();
        assert_eq!(config.tick_interval_secs, 60);
        assert_eq!(config.window(), ReminderWindow::new(9, 10));
        assert_eq!(config.claim_ttl_secs, 120);
        assert_eq!(config.upcoming_horizon_minutes, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn inverted_window_is_rejected() {
        let config = ReminderConfig {
            window_start_minutes: 10,
            window_end_minutes: 9,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("window_end_minutes"));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = ReminderConfig {
            tick_interval_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
