use crate::cli::GlobalFlags;
use crate::commands::shared::owner::require_owner;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let owner = require_owner(ctx).await?;
    let task = ctx
        .store
        .complete_task(&owner.id, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("task {id} not found or already completed"))?;
    output(&task, flags.format)
}
