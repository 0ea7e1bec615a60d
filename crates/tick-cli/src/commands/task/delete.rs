use serde_json::json;

use crate::cli::GlobalFlags;
use crate::commands::shared::owner::require_owner;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let owner = require_owner(ctx).await?;
    if !ctx.store.delete_task(&owner.id, id).await? {
        anyhow::bail!("task {id} not found");
    }
    output(&json!({ "id": id, "deleted": true }), flags.format)
}
