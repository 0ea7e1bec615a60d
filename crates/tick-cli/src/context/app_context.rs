use std::sync::Arc;

use anyhow::Context;
use tick_config::TicklerConfig;
use tick_core::clock::{Clock, SystemClock};
use tick_db::service::TaskStore;
use tick_notify::{DisabledNotifier, LogNotifier, Notifier, SmtpNotifier};

use crate::bootstrap;
use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: TicklerConfig,
    pub store: Arc<TaskStore>,
    pub clock: Arc<dyn Clock>,
    /// Acting user as given on the command line or in config; resolved lazily.
    pub owner: Option<String>,
}

impl AppContext {
    /// Open the task store at the resolved database path.
    pub async fn init(config: TicklerConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let db_path = bootstrap::resolve_db_path(flags, &config);
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let db_path_str = db_path.to_string_lossy();
        tracing::debug!(path = %db_path_str, "opening task store");
        let store = TaskStore::open_local(&db_path_str)
            .await
            .with_context(|| format!("failed to open task store at {db_path_str}"))?;

        let owner = bootstrap::resolve_owner(flags, &config);

        Ok(Self {
            config,
            store: Arc::new(store),
            clock: Arc::new(SystemClock),
            owner,
        })
    }

    /// Email sender for the reminder scheduler.
    ///
    /// With `dry_run`, messages are only logged and the store is left alone.
    /// Otherwise SMTP must be configured.
    pub fn notifier(&self, dry_run: bool) -> anyhow::Result<Arc<dyn Notifier>> {
        if dry_run {
            return Ok(Arc::new(LogNotifier));
        }
        anyhow::ensure!(
            self.config.smtp.is_configured(),
            "SMTP is not configured (set TICKLER_SMTP__HOST and TICKLER_SMTP__FROM, or pass --dry-run)"
        );
        let smtp = SmtpNotifier::from_config(&self.config.smtp)
            .context("failed to configure SMTP notifier")?;
        Ok(Arc::new(smtp))
    }

    /// Email sender for spoken commands.
    ///
    /// Most commands never send mail, so a missing SMTP section is not fatal:
    /// an email request then fails as undelivered.
    pub fn command_notifier(&self, dry_run: bool) -> anyhow::Result<Arc<dyn Notifier>> {
        if !dry_run && !self.config.smtp.is_configured() {
            return Ok(Arc::new(DisabledNotifier));
        }
        self.notifier(dry_run)
    }
}
