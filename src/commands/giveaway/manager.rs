use std::sync::Arc;

use futures_util::future::join_all;
use serenity::model::channel::ReactionType;
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};
use tracing::{debug, error, info, instrument, warn};

use crate::commands::giveaway::formatters::{DefaultGiveawayFormatter, GiveawayFormatter};
use crate::commands::giveaway::models::{
    Draw, Finalization, Giveaway, GiveawaySetup, ReactionSignal,
};
use crate::commands::giveaway::platform::GiveawayPlatform;
use crate::commands::giveaway::storage::GiveawayStore;
use crate::commands::giveaway::strategies::{DrawOptions, RandomSampleStrategy, WinnerStrategy};
use crate::error::{Error, Result};

pub const GIVEAWAY_NOT_FOUND_MESSAGE: &str = "No giveaway found with that message ID.";

// Ties the store to winner selection and announcements.
#[non_exhaustive]
pub struct GiveawayManager {
    store: Arc<GiveawayStore>,
    entry_emoji: ReactionType,
    // Display form of the entry emoji, as reactions are compared.
    entry_key: String,
    // Determines the algorithm for picking winners.
    strategy: Box<dyn WinnerStrategy>,
    // Builds every text the engine posts.
    formatter: Box<dyn GiveawayFormatter>,
}

impl GiveawayManager {
    pub fn new(store: Arc<GiveawayStore>, entry_emoji: ReactionType) -> Self {
        GiveawayManager {
            store,
            entry_key: entry_emoji.to_string(),
            entry_emoji,
            strategy: Box::new(RandomSampleStrategy::new()),
            formatter: Box::new(DefaultGiveawayFormatter::new()),
        }
    }

    pub fn with_strategy(mut self, strategy: Box<dyn WinnerStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn store(&self) -> &GiveawayStore {
        &self.store
    }

    pub fn formatter(&self) -> &dyn GiveawayFormatter {
        self.formatter.as_ref()
    }

    pub fn entry_emoji(&self) -> &str {
        &self.entry_key
    }

    pub fn bot_id(&self) -> UserId {
        self.store.bot_id()
    }

    // Picks winners among the eligible participants of the giveaway.
    pub fn draw(&self, giveaway: &Giveaway) -> Draw {
        let eligible = giveaway.eligible_participants(self.bot_id());
        let options = DrawOptions::new(&eligible, giveaway.num_winners);
        let winners = self.strategy.select(&options);

        Draw {
            prize: giveaway.prize.clone(),
            eligible: eligible.len(),
            winners,
        }
    }

    // Records an entry from a reaction. Returns true when a new participant was added.
    pub fn track_reaction(&self, signal: &ReactionSignal) -> Result<bool> {
        if signal.emoji != self.entry_key || signal.user_id == self.bot_id() {
            return Ok(false);
        }

        self.store
            .append_participant(signal.guild_id, signal.message_id, signal.user_id)
    }

    // Mentions of the winners who are still members of the guild. Winners who
    // left keep their slot but are not mentioned.
    async fn winner_mentions<P>(&self, platform: &P, guild_id: GuildId, draw: &Draw) -> Vec<String>
    where
        P: GiveawayPlatform + ?Sized,
    {
        let resolved = join_all(
            draw.winners
                .iter()
                .map(|winner| platform.member_mention(guild_id, *winner)),
        )
        .await;

        let mut mentions = Vec::with_capacity(draw.winners.len());
        for (winner, result) in draw.winners.iter().zip(resolved) {
            match result {
                Ok(Some(mention)) => mentions.push(mention),
                Ok(None) => {
                    info!(%guild_id, user_id = %winner, "Winner is no longer a member of the guild");
                }
                Err(err) => {
                    warn!(%guild_id, user_id = %winner, error = %err, "Can't resolve the winner");
                }
            }
        }
        mentions
    }

    // Stores the giveaway behind an already posted announcement and adds the
    // entry reaction. On failure the announcement is deleted again, so no
    // message is left that users could enter without a stored giveaway.
    #[instrument(skip(self, platform, setup))]
    pub async fn start<P>(
        &self,
        platform: &P,
        setup: GiveawaySetup,
        guild_id: GuildId,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<Giveaway>
    where
        P: GiveawayPlatform + ?Sized,
    {
        let giveaway = setup.into_giveaway(guild_id, channel_id, message_id);

        let err = match self.store.create(&giveaway) {
            Ok(()) => match platform
                .add_reaction(channel_id, message_id, &self.entry_emoji)
                .await
            {
                Ok(()) => {
                    info!(
                        end_time = giveaway.end_time,
                        num_winners = giveaway.num_winners,
                        "Giveaway started"
                    );
                    return Ok(giveaway);
                }
                Err(err) => {
                    if let Err(why) = self.store.delete(guild_id, message_id) {
                        error!(error = %why, "Can't remove the unfinished giveaway");
                    }
                    err
                }
            },
            Err(err) => err,
        };

        match platform.delete_message(channel_id, message_id).await {
            Ok(()) | Err(Error::NotFound(_)) => (),
            Err(why) => warn!(error = %why, "Can't delete the announcement of the failed giveaway"),
        }
        Err(err)
    }

    // Claims the giveaway and announces its result. The row is removed before
    // anything is posted, so each giveaway is finalized at most once; a row
    // that is already gone yields `Ok(None)`.
    #[instrument(skip(self, platform))]
    pub async fn finalize<P>(
        &self,
        platform: &P,
        guild_id: GuildId,
        message_id: MessageId,
    ) -> Result<Option<Finalization>>
    where
        P: GiveawayPlatform + ?Sized,
    {
        let giveaway = match self.store.take(guild_id, message_id)? {
            Some(giveaway) => giveaway,
            None => {
                debug!("The giveaway was already finalized");
                return Ok(None);
            }
        };

        match platform.channel_exists(giveaway.channel_id).await {
            Ok(true) => (),
            Ok(false) => {
                warn!(channel_id = %giveaway.channel_id, "The giveaway channel is gone, dropping it");
                return Ok(Some(Finalization::ChannelMissing));
            }
            Err(err) => {
                error!(error = %err, "Can't resolve the giveaway channel, dropping it");
                return Ok(Some(Finalization::ChannelMissing));
            }
        }

        let draw = self.draw(&giveaway);
        let mentions = self.winner_mentions(platform, guild_id, &draw).await;
        let content = self.formatter.draw_result(&draw, &mentions);

        if let Err(err) = platform.send_message(giveaway.channel_id, &content).await {
            error!(error = %err, "Can't announce the giveaway result");
        }

        match platform
            .delete_message(giveaway.channel_id, giveaway.message_id)
            .await
        {
            Ok(()) | Err(Error::NotFound(_)) => (),
            Err(err) => warn!(error = %err, "Can't delete the giveaway announcement"),
        }

        let finalization = match draw.has_participants() {
            true => {
                info!(winners = draw.winners.len(), "Giveaway finalized");
                Finalization::Announced(draw)
            }
            false => {
                info!("Giveaway finalized without participants");
                Finalization::NoParticipants
            }
        };
        Ok(Some(finalization))
    }

    // Finalizes every expired giveaway of the guild. A storage failure skips
    // the guild until the next tick; per-row failures never stop the loop.
    async fn process_guild<P>(&self, platform: &P, guild_id: GuildId, now: i64) -> usize
    where
        P: GiveawayPlatform + ?Sized,
    {
        let expired = match self.store.list_expired(guild_id, now) {
            Ok(expired) => expired,
            Err(err) => {
                error!(%guild_id, error = %err, "Can't read expired giveaways, skipping the guild");
                return 0;
            }
        };

        let mut finalized = 0;
        for giveaway in expired {
            match self.finalize(platform, guild_id, giveaway.message_id).await {
                Ok(Some(_)) => finalized += 1,
                Ok(None) => (),
                Err(err) => error!(
                    %guild_id,
                    message_id = %giveaway.message_id,
                    error = %err,
                    "Can't finalize the giveaway"
                ),
            }
        }
        finalized
    }

    // One scheduler pass over all guilds owning giveaways. Returns how many
    // giveaways were finalized.
    pub async fn run_tick<P>(&self, platform: &P, now: i64) -> usize
    where
        P: GiveawayPlatform + ?Sized,
    {
        let guilds = match self.store.guilds() {
            Ok(guilds) => guilds,
            Err(err) => {
                error!(error = %err, "Can't read guilds with giveaways");
                return 0;
            }
        };

        let results = join_all(
            guilds
                .into_iter()
                .map(|guild_id| self.process_guild(platform, guild_id, now)),
        )
        .await;

        let finalized: usize = results.into_iter().sum();
        if finalized > 0 {
            info!(finalized, "Scheduler pass finished");
        }
        finalized
    }

    // Draws new winners against the current participants without touching
    // the store. Returns the text to show to the invoker.
    pub async fn reroll<P>(&self, platform: &P, guild_id: GuildId, message_id: MessageId) -> Result<String>
    where
        P: GiveawayPlatform + ?Sized,
    {
        let giveaway = self
            .store
            .get(guild_id, message_id)?
            .ok_or_else(|| Error::NotFound(GIVEAWAY_NOT_FOUND_MESSAGE.to_string()))?;

        let draw = self.draw(&giveaway);
        let mentions = self.winner_mentions(platform, guild_id, &draw).await;
        Ok(self.formatter.draw_result(&draw, &mentions))
    }
}
