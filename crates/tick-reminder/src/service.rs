use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use tick_core::responses::CycleReport;

use crate::cycle::ReminderScheduler;

struct Running {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns the periodic reminder timer.
///
/// `start` spawns the timer task on the current tokio runtime; `stop` cancels
/// it and waits for any in-flight cycle to finish. A tick that fires while a
/// cycle is still running is skipped, not queued.
pub struct ReminderService {
    scheduler: Arc<ReminderScheduler>,
    interval: Duration,
    running: Mutex<Option<Running>>,
}

impl ReminderService {
    pub fn new(scheduler: Arc<ReminderScheduler>, interval: Duration) -> Self {
        Self {
            scheduler,
            interval,
            running: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn scheduler(&self) -> &Arc<ReminderScheduler> {
        &self.scheduler
    }

    /// Start the timer. Returns `false` if it was already running.
    pub fn start(&self) -> bool {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        if running.as_ref().is_some_and(|r| !r.handle.is_finished()) {
            return false;
        }

        let cancel = CancellationToken::new();
        let scheduler = Arc::clone(&self.scheduler);
        let period = self.interval;
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let report = scheduler.run_cycle().await;
                        if report.overlapped {
                            tracing::debug!("tick skipped, previous cycle still running");
                        }
                    }
                }
            }
            tracing::debug!("reminder timer stopped");
        });

        tracing::info!(interval_secs = period.as_secs(), "reminder timer started");
        *running = Some(Running { cancel, handle });
        true
    }

    /// Stop the timer and wait for it to wind down. Returns `false` if it was not running.
    pub async fn stop(&self) -> bool {
        let running = self
            .running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(Running { cancel, handle }) = running else {
            return false;
        };
        cancel.cancel();
        if let Err(error) = handle.await {
            tracing::warn!(%error, "reminder timer task ended abnormally");
        }
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|r| !r.handle.is_finished())
    }

    /// Run a cycle now, through the same path and guard as the timer.
    pub async fn trigger(&self) -> CycleReport {
        self.scheduler.run_cycle().await
    }
}
