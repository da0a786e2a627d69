use std::time::{Duration, Instant};

use poise::CreateReply;

use crate::commands::context::Context;
use crate::embeds;
use crate::error::Error;

// Uptime as `{d}d {h}h {m}m {s}s`.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!(
        "{}d {}h {}m {}s",
        secs / 86_400,
        (secs % 86_400) / 3_600,
        (secs % 3_600) / 60,
        secs % 60
    )
}

/// Check the bot latency.
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let start = Instant::now();
    let reply = ctx.say("Pong!").await?;
    let round_trip = start.elapsed().as_millis();

    let heartbeat = match ctx.ping().await {
        Duration::ZERO => "unknown".to_string(),
        latency => format!("{}ms", latency.as_millis()),
    };

    let embed = embeds::info_embed()
        .title("Pong!")
        .field("Round trip", format!("{}ms", round_trip), true)
        .field("Gateway heartbeat", heartbeat, true);
    reply
        .edit(ctx, CreateReply::default().content("").embed(embed))
        .await?;
    Ok(())
}

/// Show the bot status.
#[poise::command(slash_command)]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    let bot = ctx.cache().current_user().clone();
    let guild_count = ctx.cache().guild_count();
    let uptime = ctx.data().start_time.elapsed();

    let embed = embeds::info_embed()
        .title("Bot Status")
        .field("Name", bot.name.clone(), true)
        .field("ID", bot.id.to_string(), true)
        .field("Servers", guild_count.to_string(), true)
        .field("Uptime", format_uptime(uptime), true);

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}
