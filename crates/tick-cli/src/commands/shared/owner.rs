use anyhow::{anyhow, bail};
use tick_core::entities::User;
use tick_db::service::TaskStore;

use crate::context::AppContext;

/// Resolve the acting user from `--owner` or `[general].default_owner`.
pub async fn require_owner(ctx: &AppContext) -> anyhow::Result<User> {
    let Some(reference) = ctx.owner.as_deref() else {
        bail!("No acting user. Pass --owner <id|email> or set [general].default_owner.");
    };
    find_user_ref(&ctx.store, reference)
        .await?
        .ok_or_else(|| anyhow!("Unknown user '{reference}'. Add one with 'tkl user add'."))
}

/// Look a user up by ID, or by email when the reference contains `@`.
pub async fn find_user_ref(store: &TaskStore, reference: &str) -> anyhow::Result<Option<User>> {
    let user = if reference.contains('@') {
        store.find_user_by_email(reference).await?
    } else {
        store.find_user(reference).await?
    };
    Ok(user)
}
