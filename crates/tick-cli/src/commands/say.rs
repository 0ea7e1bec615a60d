use std::sync::Arc;

use anyhow::Context;
use tick_intent::{CommandInterpreter, GeminiClassifier};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SayArgs;
use crate::commands::shared::owner::require_owner;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tkl say`: classify a transcript and act on it for the acting user.
///
/// The outcome is always printed. A failed outcome also exits non-zero.
pub async fn handle(args: &SayArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let owner = require_owner(ctx).await?;
    let classifier = GeminiClassifier::from_config(&ctx.config.gemini)
        .context("intent classifier unavailable (set TICKLER_GEMINI__API_KEY)")?;

    let interpreter = CommandInterpreter::new(
        Arc::clone(&ctx.store),
        Arc::new(classifier),
        ctx.command_notifier(args.dry_run)?,
        Arc::clone(&ctx.clock),
    )
    .with_ambiguity(ctx.config.interpreter.ambiguity);

    let outcome = interpreter.interpret(&args.transcript(), &owner.id).await;
    output(&outcome, flags.format)?;

    if let Some(failure) = outcome.failure.filter(|_| !outcome.success) {
        anyhow::bail!("command not carried out ({failure})");
    }
    Ok(())
}
