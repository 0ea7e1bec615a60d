//! Reminder latch and send-claim operations.
//!
//! A reminder send is a three-step protocol against the store:
//!
//! 1. [`TaskStore::claim_reminder`] stamps a caller token on an un-reminded
//!    task. Only one caller can hold a live claim; a claim older than the TTL
//!    is considered abandoned and may be taken over.
//! 2. The caller sends the email.
//! 3. On success [`TaskStore::commit_reminder`] sets `reminder_sent` while
//!    the token still matches. On failure [`TaskStore::release_reminder_claim`]
//!    drops the claim so a later cycle retries.

use chrono::{Duration, NaiveDateTime};

use tick_core::entities::Task;

use crate::error::DatabaseError;
use crate::helpers::claim_timestamp;
use crate::service::TaskStore;
use crate::updates::task::{TaskExpectation, TaskUpdate, TaskUpdateBuilder};

impl TaskStore {
    /// Try to take the send claim on task `id`.
    ///
    /// The store connection is shared, so the outcome comes from the
    /// statement's `RETURNING` row rather than the connection's change count.
    ///
    /// Returns `false` when the task is already reminded, completed, missing,
    /// or held by a claim younger than `ttl`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the UPDATE fails.
    pub async fn claim_reminder(
        &self,
        id: &str,
        token: &str,
        now: NaiveDateTime,
        ttl: Duration,
    ) -> Result<bool, DatabaseError> {
        let claimed_at = claim_timestamp(now);
        let stale_before = claim_timestamp(now - ttl);
        let mut rows = self
            .db()
            .conn()
            .query(
                "UPDATE tasks SET reminder_claim = ?1, reminder_claimed_at = ?2
                 WHERE id = ?3 AND reminder_sent = 0 AND completed = 0
                   AND (reminder_claim IS NULL
                        OR reminder_claimed_at IS NULL
                        OR reminder_claimed_at <= ?4)
                 RETURNING id",
                [token, claimed_at.as_str(), id, stale_before.as_str()],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Set the reminder latch if `token` still holds the claim.
    ///
    /// Returns `None` when the claim was lost (taken over after going stale,
    /// or cleared by a reset), in which case the latch is untouched.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the UPDATE fails.
    pub async fn commit_reminder(&self, id: &str, token: &str) -> Result<Option<Task>, DatabaseError> {
        let expected = TaskExpectation {
            reminder_sent: Some(false),
            reminder_claim: Some(token.to_string()),
            ..TaskExpectation::default()
        };
        let update = TaskUpdateBuilder::new().reminder_sent(true).build();
        self.conditional_update(id, &expected, &update).await
    }

    /// Drop the claim held by `token`. Returns whether it was still held.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the UPDATE fails.
    pub async fn release_reminder_claim(&self, id: &str, token: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "UPDATE tasks SET reminder_claim = NULL, reminder_claimed_at = NULL
                 WHERE id = ?1 AND reminder_claim = ?2
                 RETURNING id",
                [id, token],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Clear the reminder latch so the task can be reminded again.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the task does not exist or belongs to someone else.
    pub async fn reset_reminder(&self, owner_id: &str, id: &str) -> Result<Task, DatabaseError> {
        let update = TaskUpdate {
            reminder_sent: Some(false),
            ..TaskUpdate::default()
        };
        let task = self.update_task(owner_id, id, &update).await?;
        tracing::info!(task_id = id, "reminder latch reset");
        Ok(task)
    }
}
