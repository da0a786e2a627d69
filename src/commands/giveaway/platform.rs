use serenity::all::{ChannelId, Context, GuildId, Mentionable, MessageId, ReactionType, UserId};
use serenity::async_trait;
use serenity::http::HttpError;
use serenity::prelude::SerenityError;

use crate::error::{Error, Result};

// The operations the giveaway engine needs from the chat platform.
#[async_trait]
pub trait GiveawayPlatform: Send + Sync {
    // Checks that the bot can still see the channel.
    async fn channel_exists(&self, channel_id: ChannelId) -> Result<bool>;

    // Returns a mention for the member, or None when the user left the guild.
    async fn member_mention(&self, guild_id: GuildId, user_id: UserId) -> Result<Option<String>>;

    async fn send_message(&self, channel_id: ChannelId, content: &str) -> Result<()>;

    async fn add_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        reaction: &ReactionType,
    ) -> Result<()>;

    // Fails with `Error::NotFound` when the message is already gone.
    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<()>;
}

// Discord answers 404 for deleted resources and 403 for ones the bot lost access to.
fn is_unresolvable(err: &SerenityError) -> bool {
    match err {
        SerenityError::Http(HttpError::UnsuccessfulRequest(response)) => {
            matches!(response.status_code.as_u16(), 403 | 404)
        }
        _ => false,
    }
}

pub struct SerenityPlatform {
    ctx: Context,
}

impl SerenityPlatform {
    pub fn new(ctx: Context) -> Self {
        SerenityPlatform { ctx }
    }
}

#[async_trait]
impl GiveawayPlatform for SerenityPlatform {
    async fn channel_exists(&self, channel_id: ChannelId) -> Result<bool> {
        match channel_id.to_channel(&self.ctx).await {
            Ok(_) => Ok(true),
            Err(err) if is_unresolvable(&err) => Ok(false),
            Err(err) => Err(Error::from(err)),
        }
    }

    async fn member_mention(&self, guild_id: GuildId, user_id: UserId) -> Result<Option<String>> {
        match guild_id.member(&self.ctx, user_id).await {
            Ok(member) => Ok(Some(member.mention().to_string())),
            Err(err) if is_unresolvable(&err) => Ok(None),
            Err(err) => Err(Error::from(err)),
        }
    }

    async fn send_message(&self, channel_id: ChannelId, content: &str) -> Result<()> {
        channel_id.say(&self.ctx.http, content).await?;
        Ok(())
    }

    async fn add_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        reaction: &ReactionType,
    ) -> Result<()> {
        channel_id
            .create_reaction(&self.ctx.http, message_id, reaction.clone())
            .await?;
        Ok(())
    }

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<()> {
        match channel_id.delete_message(&self.ctx.http, message_id).await {
            Ok(()) => Ok(()),
            Err(err) if is_unresolvable(&err) => Err(Error::NotFound(format!(
                "The message {} was not found in <#{}>.",
                message_id, channel_id
            ))),
            Err(err) => Err(Error::from(err)),
        }
    }
}
