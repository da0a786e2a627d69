use poise::{CreateReply, Modal};
use serenity::all::{CreateMessage, GuildId, MessageId};
use tracing::info;

use crate::commands::context::{ApplicationContext, Context};
use crate::commands::giveaway::manager::GIVEAWAY_NOT_FOUND_MESSAGE;
use crate::commands::giveaway::parser::{parse_message_id, parse_setup};
use crate::commands::giveaway::platform::SerenityPlatform;
use crate::commands::giveaway::utils::unix_now;
use crate::embeds;
use crate::error::Error;

// Discord refuses embeds with more fields than this.
const MAX_LIST_ENTRIES: usize = 25;

#[derive(Debug, Modal)]
#[name = "Giveaway Setup"]
struct GiveawaySetupModal {
    #[name = "Duration (e.g. 1h, 1d, 1w)"]
    #[placeholder = "1d"]
    #[max_length = 16]
    duration: String,
    #[name = "Prize"]
    #[max_length = 256]
    prize: String,
    #[name = "Number of winners"]
    #[placeholder = "1"]
    #[max_length = 4]
    winners: String,
}

fn require_guild(ctx: Context<'_>) -> Result<GuildId, Error> {
    ctx.guild_id().ok_or_else(|| {
        Error::Validation("This command can only be used in a server.".to_string())
    })
}

async fn reply_ephemeral(ctx: Context<'_>, content: impl Into<String>) -> Result<(), Error> {
    ctx.send(CreateReply::default().content(content).ephemeral(true))
        .await?;
    Ok(())
}

/// Manage reaction giveaways.
#[poise::command(
    slash_command,
    guild_only,
    subcommands("setup_giveaway", "end_giveaway", "list_giveaways", "reroll_giveaway"),
    subcommand_required
)]
pub async fn giveaway(_: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Start a new giveaway in this channel.
#[poise::command(
    slash_command,
    guild_only,
    rename = "setup",
    required_permissions = "ADMINISTRATOR"
)]
pub async fn setup_giveaway(app_ctx: ApplicationContext<'_>) -> Result<(), Error> {
    let form = match GiveawaySetupModal::execute(app_ctx).await? {
        Some(form) => form,
        // The form was dismissed or timed out
        None => return Ok(()),
    };

    let ctx = Context::Application(app_ctx);
    let guild_id = require_guild(ctx)?;
    let manager = &ctx.data().manager;

    let setup = parse_setup(
        &form.duration,
        &form.prize,
        &form.winners,
        ctx.author().id,
        unix_now(),
    )?;

    let embed = embeds::giveaway_embed()
        .title("🎉 GIVEAWAY 🎉")
        .description(manager.formatter().announcement(&setup, manager.entry_emoji()));
    let message = ctx
        .channel_id()
        .send_message(ctx.http(), CreateMessage::new().embed(embed))
        .await?;

    let platform = SerenityPlatform::new(ctx.serenity_context().clone());
    manager
        .start(&platform, setup, guild_id, ctx.channel_id(), message.id)
        .await?;

    reply_ephemeral(ctx, "Giveaway started!").await
}

/// End a giveaway early. It will be finalized on the next check.
#[poise::command(
    slash_command,
    guild_only,
    rename = "end",
    required_permissions = "ADMINISTRATOR"
)]
pub async fn end_giveaway(
    ctx: Context<'_>,
    #[description = "Message ID of the giveaway announcement"] message_id: String,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx)?;
    let message_id = MessageId::new(parse_message_id(&message_id)?);

    let expired = ctx
        .data()
        .manager
        .store()
        .force_expire(guild_id, message_id, unix_now())?;
    if !expired {
        return Err(Error::NotFound(GIVEAWAY_NOT_FOUND_MESSAGE.to_string()));
    }

    info!(%guild_id, %message_id, "Giveaway ended early");
    reply_ephemeral(ctx, "The giveaway will end shortly.").await
}

/// Show the active giveaways of this server.
#[poise::command(slash_command, guild_only, rename = "list")]
pub async fn list_giveaways(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = require_guild(ctx)?;
    let manager = &ctx.data().manager;
    let now = unix_now();

    let giveaways = manager.store().list_active(guild_id, now)?;
    if giveaways.is_empty() {
        return reply_ephemeral(ctx, "No active giveaways at the moment.").await;
    }

    let mut embed = embeds::giveaway_embed().title("Active Giveaways");
    for giveaway in giveaways.iter().take(MAX_LIST_ENTRIES) {
        let (title, body) = manager.formatter().list_entry(giveaway, now);
        embed = embed.field(title, body, false);
    }
    if giveaways.len() > MAX_LIST_ENTRIES {
        embed = embed.description(format!(
            "Showing {} of {} giveaways.",
            MAX_LIST_ENTRIES,
            giveaways.len()
        ));
    }

    ctx.send(CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}

/// Draw new winners for a running giveaway. Nothing is posted publicly.
#[poise::command(
    slash_command,
    guild_only,
    rename = "reroll",
    required_permissions = "ADMINISTRATOR"
)]
pub async fn reroll_giveaway(
    ctx: Context<'_>,
    #[description = "Message ID of the giveaway announcement"] message_id: String,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx)?;
    let message_id = MessageId::new(parse_message_id(&message_id)?);

    let platform = SerenityPlatform::new(ctx.serenity_context().clone());
    let content = ctx
        .data()
        .manager
        .reroll(&platform, guild_id, message_id)
        .await?;

    reply_ephemeral(ctx, content).await
}
