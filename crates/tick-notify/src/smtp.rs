use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use tick_config::SmtpConfig;
use tick_core::entities::Task;

use crate::Notifier;
use crate::error::NotifyError;
use crate::message::ReminderMessage;

/// Sends reminder email through an SMTP relay.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Build a pooled async transport from the `[smtp]` section.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::NotConfigured` if host or sender is missing,
    /// `NotifyError::InvalidAddress` for a malformed sender, or
    /// `NotifyError::Transport` if the relay cannot be set up.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, NotifyError> {
        if !config.is_configured() {
            return Err(NotifyError::NotConfigured);
        }

        let from: Mailbox = config.from.parse().map_err(|e: lettre::address::AddressError| {
            NotifyError::InvalidAddress {
                address: config.from.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));
        if config.has_credentials() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// Compose the reminder for one recipient.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidAddress` if `address` is malformed.
    pub fn build_message(&self, address: &str, name: &str, task: &Task) -> Result<Message, NotifyError> {
        let to_address: Address =
            address
                .trim()
                .parse()
                .map_err(|e: lettre::address::AddressError| NotifyError::InvalidAddress {
                    address: address.to_string(),
                    reason: e.to_string(),
                })?;
        let content = ReminderMessage::for_task(name, task);

        Ok(Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(Some(name.to_string()), to_address))
            .subject(content.subject)
            .multipart(MultiPart::alternative_plain_html(content.text, content.html))?)
    }

    /// Send and report the error instead of swallowing it.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError` if the message cannot be built or the relay rejects it.
    pub async fn try_send(&self, address: &str, name: &str, task: &Task) -> Result<(), NotifyError> {
        let message = self.build_message(address, name, task)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, address: &str, name: &str, task: &Task) -> bool {
        match self.try_send(address, name, task).await {
            Ok(()) => {
                tracing::info!(task_id = %task.id, to = address, "reminder sent");
                true
            }
            Err(error) => {
                tracing::warn!(task_id = %task.id, to = address, %error, "reminder delivery failed");
                false
            }
        }
    }
}
