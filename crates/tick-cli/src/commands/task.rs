use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;

pub mod complete;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

/// Handle `tkl task`.
pub async fn handle(
    action: &TaskCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TaskCommands::Create {
            title,
            description,
            date,
            time,
            duration,
        } => {
            create::run(
                create::Params {
                    title: title.clone(),
                    description: description.clone(),
                    date: date.clone(),
                    time: time.clone(),
                    duration: *duration,
                },
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::Update {
            id,
            title,
            description,
            date,
            time,
            duration,
            unschedule,
        } => {
            update::run(
                update::Params {
                    id: id.clone(),
                    title: title.clone(),
                    description: description.clone(),
                    date: date.clone(),
                    time: time.clone(),
                    duration: *duration,
                    unschedule: *unschedule,
                },
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::List { filter, search } => {
            list::run(filter.as_deref(), search.as_deref(), ctx, flags).await
        }
        TaskCommands::Get { id } => get::run(id, ctx, flags).await,
        TaskCommands::Complete { id } => complete::run(id, ctx, flags).await,
        TaskCommands::Delete { id } => delete::run(id, ctx, flags).await,
    }
}
