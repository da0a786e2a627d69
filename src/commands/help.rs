use poise::builtins::HelpConfiguration;

use crate::commands::context::Context;
use crate::error::Error;

/// List the available commands.
#[poise::command(slash_command)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command to get help for"]
    #[autocomplete = "poise::builtins::autocomplete_command"]
    command: Option<String>,
) -> Result<(), Error> {
    poise::builtins::help(
        ctx,
        command.as_deref(),
        HelpConfiguration {
            extra_text_at_bottom: "Start a giveaway with /giveaway setup and react to enter.",
            ephemeral: true,
            ..Default::default()
        },
    )
    .await?;
    Ok(())
}
