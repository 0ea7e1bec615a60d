//! Outbound SMTP configuration for reminder email.

use serde::{Deserialize, Serialize};

const fn default_port() -> u16 {
    587
}

const fn default_starttls() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// SMTP relay host (e.g., `smtp.gmail.com`).
    #[serde(default)]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Login user. Leave empty for unauthenticated relays.
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Sender mailbox, e.g. `Tickler <reminders@example.com>`.
    #[serde(default)]
    pub from: String,

    /// Upgrade the connection with STARTTLS. Disable only for local test relays.
    #[serde(default = "default_starttls")]
    pub starttls: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
            from: String::new(),
            starttls: default_starttls(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SmtpConfig {
    /// A relay host and a sender address are the minimum needed to send.
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && !self.from.is_empty()
    }

    /// Whether login credentials were supplied.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unconfigured() {
        let config = SmtpConfig::default();
        assert!(!config.is_configured());
        assert!(!config.has_credentials());
        assert_eq!(config.port, 587);
        assert!(config.starttls);
    }

    #[test]
    fn host_and_sender_are_enough() {
        let config = SmtpConfig {
            host: "localhost".into(),
            from: "reminders@example.com".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}
