use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::commands::shared::owner::require_owner;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let owner = require_owner(ctx).await?;
    let task = ctx
        .store
        .get_owned_task(&owner.id, id)
        .await
        .with_context(|| format!("task {id} not found"))?;
    output(&task, flags.format)
}
