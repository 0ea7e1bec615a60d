//! # tick-notify
//!
//! Delivery of reminder notifications.
//!
//! The [`Notifier`] trait is the seam used by the reminder scheduler and the
//! interpreter. [`SmtpNotifier`] sends HTML email through an SMTP relay;
//! [`LogNotifier`] only logs, for dry runs. [`DisabledNotifier`] stands in
//! when no relay is configured and fails every send.

pub mod error;
pub mod message;
mod smtp;

pub use error::NotifyError;
pub use message::ReminderMessage;
pub use smtp::SmtpNotifier;

use async_trait::async_trait;
use tick_core::entities::Task;

/// Sends a reminder for `task` to one recipient.
///
/// Implementations never propagate errors: a failed delivery is logged and
/// reported as `false`, and the caller decides whether to retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, address: &str, name: &str, task: &Task) -> bool;

    /// Whether a successful `send` means a message actually left.
    ///
    /// When `false`, callers must not record anything as delivered.
    fn delivers(&self) -> bool {
        true
    }
}

/// Logs each reminder instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, address: &str, name: &str, task: &Task) -> bool {
        let message = ReminderMessage::for_task(name, task);
        tracing::info!(
            task_id = %task.id,
            to = address,
            subject = %message.subject,
            "reminder (dry run)"
        );
        true
    }

    fn delivers(&self) -> bool {
        false
    }
}

/// Used when SMTP is not configured: every send fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, address: &str, _name: &str, task: &Task) -> bool {
        tracing::warn!(task_id = %task.id, to = address, "SMTP is not configured, email not sent");
        false
    }
}
