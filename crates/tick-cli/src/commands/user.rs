use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::owner::find_user_ref;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tkl user`.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::Add { name, email } => {
            let user = ctx.store.create_user(name, email).await?;
            tracing::info!(user_id = %user.id, "user added");
            output(&user, flags.format)
        }
        UserCommands::Get { id } => {
            let user = find_user_ref(&ctx.store, id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("user '{id}' not found"))?;
            output(&user, flags.format)
        }
        UserCommands::List => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let users = ctx.store.list_users(limit).await?;
            output(&users, flags.format)
        }
    }
}
