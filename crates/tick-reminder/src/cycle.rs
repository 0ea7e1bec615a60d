use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use tokio::sync::Mutex;

use tick_config::ReminderConfig;
use tick_core::clock::Clock;
use tick_core::entities::Task;
use tick_core::ids::PREFIX_CLAIM;
use tick_core::responses::CycleReport;
use tick_core::schedule::{ReminderWindow, minutes_until};
use tick_db::repos::task::TaskFilter;
use tick_db::service::TaskStore;
use tick_notify::Notifier;

/// Scans the store for tasks entering the reminder window and notifies their owners.
///
/// With a notifier that does not deliver (a dry run), due tasks are only
/// logged and nothing is written to the store.
pub struct ReminderScheduler {
    store: Arc<TaskStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    window: ReminderWindow,
    claim_ttl: Duration,
    /// Held for the duration of a cycle; a second caller skips instead of waiting.
    guard: Mutex<()>,
}

impl ReminderScheduler {
    pub fn new(store: Arc<TaskStore>, notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Self {
        Self::from_config(store, notifier, clock, &ReminderConfig::default())
    }

    pub fn from_config(
        store: Arc<TaskStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: &ReminderConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            clock,
            window: config.window(),
            claim_ttl: Duration::seconds(i64::try_from(config.claim_ttl_secs).unwrap_or(i64::MAX)),
            guard: Mutex::new(()),
        }
    }

    #[must_use]
    pub const fn window(&self) -> ReminderWindow {
        self.window
    }

    /// Run one cycle at the current clock reading.
    pub async fn run_cycle(&self) -> CycleReport {
        self.run_cycle_at(self.clock.now()).await
    }

    /// Run one cycle as of `now`.
    ///
    /// Never fails as a whole: a store or delivery error on one task is counted
    /// and the remaining tasks are still processed.
    pub async fn run_cycle_at(&self, now: NaiveDateTime) -> CycleReport {
        let Ok(_running) = self.guard.try_lock() else {
            tracing::debug!(%now, "reminder cycle already in progress, skipping");
            return CycleReport::overlapped(now);
        };

        let mut report = CycleReport {
            ran_at: Some(now),
            ..CycleReport::default()
        };

        let (from, to) = self.window.date_span(now);
        let candidates = match self
            .store
            .find_tasks(&TaskFilter::reminder_candidates(from, to))
            .await
        {
            Ok(candidates) => candidates,
            Err(error) => {
                tracing::error!(%error, "reminder scan failed");
                report.store_errors += 1;
                return report;
            }
        };
        report.candidates = u32::try_from(candidates.len()).unwrap_or(u32::MAX);

        for task in &candidates {
            let Some(starts_at) = task.scheduled_instant() else {
                continue;
            };
            let minutes = minutes_until(starts_at, now);
            if !self.window.contains(minutes) {
                continue;
            }
            report.due += 1;
            self.remind(task, now, minutes, &mut report).await;
        }

        if report.due > 0 || report.store_errors > 0 {
            tracing::info!(
                candidates = report.candidates,
                due = report.due,
                sent = report.sent,
                previewed = report.previewed,
                failed = report.failed,
                skipped_no_contact = report.skipped_no_contact,
                skipped_claimed = report.skipped_claimed,
                store_errors = report.store_errors,
                "reminder cycle finished"
            );
        } else {
            tracing::debug!(candidates = report.candidates, "reminder cycle finished, nothing due");
        }
        report
    }

    async fn remind(&self, task: &Task, now: NaiveDateTime, minutes: i64, report: &mut CycleReport) {
        let contact = match self.store.find_user(&task.owner_id).await {
            Ok(Some(contact)) => contact,
            Ok(None) => {
                tracing::warn!(task_id = %task.id, owner_id = %task.owner_id, "no contact for task owner, skipping reminder");
                report.skipped_no_contact += 1;
                return;
            }
            Err(error) => {
                tracing::error!(task_id = %task.id, %error, "contact lookup failed");
                report.store_errors += 1;
                return;
            }
        };

        if !self.notifier.delivers() {
            self.notifier.send(&contact.email, &contact.name, task).await;
            report.previewed += 1;
            tracing::info!(task_id = %task.id, minutes_until = minutes, "reminder previewed, latch left unset");
            return;
        }

        let token = match self.store.db().generate_id(PREFIX_CLAIM).await {
            Ok(token) => token,
            Err(error) => {
                tracing::error!(task_id = %task.id, %error, "claim token generation failed");
                report.store_errors += 1;
                return;
            }
        };
        match self
            .store
            .claim_reminder(&task.id, &token, now, self.claim_ttl)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(task_id = %task.id, "reminder already claimed or sent");
                report.skipped_claimed += 1;
                return;
            }
            Err(error) => {
                tracing::error!(task_id = %task.id, %error, "reminder claim failed");
                report.store_errors += 1;
                return;
            }
        }

        if !self.notifier.send(&contact.email, &contact.name, task).await {
            report.failed += 1;
            tracing::warn!(task_id = %task.id, minutes_until = minutes, "reminder not delivered, will retry");
            if let Err(error) = self.store.release_reminder_claim(&task.id, &token).await {
                // The claim goes stale after the TTL and is retaken then.
                tracing::error!(task_id = %task.id, %error, "failed to release reminder claim");
                report.store_errors += 1;
            }
            return;
        }

        match self.store.commit_reminder(&task.id, &token).await {
            Ok(Some(_)) => {
                report.sent += 1;
                tracing::info!(task_id = %task.id, owner_id = %task.owner_id, minutes_until = minutes, "reminder sent");
            }
            Ok(None) => {
                report.sent += 1;
                tracing::warn!(task_id = %task.id, "reminder sent but claim was lost before commit");
            }
            Err(error) => {
                report.sent += 1;
                report.store_errors += 1;
                tracing::error!(task_id = %task.id, %error, "reminder sent but latch not recorded");
            }
        }
    }
}
