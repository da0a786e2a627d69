use serenity::all::{Context, FullEvent, GuildId, MessageId, Reaction, ReactionType, UserId};
use tracing::{debug, error, info};

use crate::alerts;
use crate::commands::UserData;
use crate::commands::giveaway::models::ReactionSignal;

// Converts a gateway reaction into a tracker signal. Reactions outside guilds
// or without a known user are dropped.
pub fn reaction_signal(
    guild_id: Option<GuildId>,
    message_id: MessageId,
    user_id: Option<UserId>,
    emoji: &ReactionType,
) -> Option<ReactionSignal> {
    Some(ReactionSignal {
        guild_id: guild_id?,
        message_id,
        user_id: user_id?,
        emoji: emoji.to_string(),
    })
}

pub async fn handle_event(ctx: &Context, event: &FullEvent, data: &UserData) {
    match event {
        FullEvent::ReactionAdd { add_reaction } => {
            handle_reaction_add(ctx, add_reaction, data).await;
        }
        FullEvent::Ready { data_about_bot } => {
            info!(
                bot = %data_about_bot.user.name,
                guilds = data_about_bot.guilds.len(),
                "Connected to the gateway"
            );
        }
        _ => {}
    }
}

async fn handle_reaction_add(ctx: &Context, reaction: &Reaction, data: &UserData) {
    let signal = match reaction_signal(
        reaction.guild_id,
        reaction.message_id,
        reaction.user_id,
        &reaction.emoji,
    ) {
        Some(signal) => signal,
        None => return,
    };

    match data.manager.track_reaction(&signal) {
        Ok(true) => debug!(
            guild_id = %signal.guild_id,
            message_id = %signal.message_id,
            user_id = %signal.user_id,
            "Participant entered the giveaway"
        ),
        Ok(false) => (),
        Err(err) => {
            alerts::report_error(&ctx.http, data.config.error_channel_id, "reaction tracking", &err)
                .await;
        }
    }
}
