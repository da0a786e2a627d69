use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};

use crate::error::{Error, Result};

// A giveaway row as it is persisted in the store.
#[readonly::make]
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Giveaway {
    // The guild owning the giveaway. Together with `message_id` forms the key.
    pub guild_id: GuildId,
    // Channel where the giveaway was announced and results are posted.
    pub channel_id: ChannelId,
    // The announcement message users react to.
    pub message_id: MessageId,
    pub prize: String,
    // Unix timestamp (seconds) when the giveaway expires.
    pub end_time: i64,
    // Requested amount of winners. Always positive.
    pub num_winners: u32,
    // Who created the giveaway. Informational only.
    pub host_id: UserId,
    // Users who entered, in order of entering. Never contains duplicates.
    pub participants: Vec<UserId>,
}

impl Giveaway {
    pub fn new(
        guild_id: GuildId,
        channel_id: ChannelId,
        message_id: MessageId,
        host_id: UserId,
    ) -> Self {
        Giveaway {
            guild_id,
            channel_id,
            message_id,
            prize: String::new(),
            end_time: 0,
            num_winners: 1,
            host_id,
            participants: Vec::new(),
        }
    }

    pub fn with_prize(mut self, prize: &str) -> Self {
        self.prize = prize.trim().to_string();
        self
    }

    pub fn with_end_time(mut self, end_time: i64) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn with_num_winners(mut self, num_winners: u32) -> Self {
        self.num_winners = num_winners;
        self
    }

    pub fn with_participants(mut self, participants: Vec<UserId>) -> Self {
        self.participants = Vec::new();
        for user_id in participants {
            if !self.participants.contains(&user_id) {
                self.participants.push(user_id);
            }
        }
        self
    }

    // Seconds left until the giveaway ends, zero once it has expired.
    pub fn remaining_secs(&self, now: i64) -> u64 {
        (self.end_time - now).max(0) as u64
    }

    // Participants who can win: everyone except the bot itself.
    pub fn eligible_participants(&self, bot_id: UserId) -> Vec<UserId> {
        self.participants
            .iter()
            .copied()
            .filter(|user_id| *user_id != bot_id)
            .collect()
    }

    // Direct link to the announcement message.
    pub fn jump_url(&self) -> String {
        format!(
            "https://discord.com/channels/{}/{}/{}",
            self.guild_id, self.channel_id, self.message_id
        )
    }

    // Rejects rows that must never reach the store.
    pub fn validate(&self) -> Result<()> {
        if self.prize.is_empty() {
            return Err(Error::Validation("The prize can't be empty.".to_string()));
        }
        if self.num_winners == 0 {
            return Err(Error::Validation(
                "The number of winners must be a positive integer.".to_string(),
            ));
        }
        Ok(())
    }
}

// Parameters of a giveaway collected from the setup form, before the
// announcement message exists.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GiveawaySetup {
    pub prize: String,
    pub end_time: i64,
    pub num_winners: u32,
    pub host_id: UserId,
}

impl GiveawaySetup {
    pub fn into_giveaway(
        self,
        guild_id: GuildId,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Giveaway {
        Giveaway::new(guild_id, channel_id, message_id, self.host_id)
            .with_prize(&self.prize)
            .with_end_time(self.end_time)
            .with_num_winners(self.num_winners)
    }
}

// Outcome of a single winner selection.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Draw {
    pub prize: String,
    // Participants the selection ran against.
    pub eligible: usize,
    pub winners: Vec<UserId>,
}

impl Draw {
    pub fn has_participants(&self) -> bool {
        self.eligible > 0
    }
}

// What happened to a giveaway claimed by the scheduler.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Finalization {
    // Winners were drawn and the result was posted (or attempted).
    Announced(Draw),
    // Nobody entered; the "no participants" message was posted (or attempted).
    NoParticipants,
    // The channel is gone; the row was dropped without an announcement.
    ChannelMissing,
}

// A reaction-added signal forwarded from the gateway.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReactionSignal {
    pub guild_id: GuildId,
    pub message_id: MessageId,
    pub user_id: UserId,
    pub emoji: String,
}

#[cfg(test)]
mod tests {
    use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};

    use crate::commands::giveaway::models::{Giveaway, GiveawaySetup};
    use crate::error::Error;

    fn get_giveaway() -> Giveaway {
        Giveaway::new(
            GuildId::new(10),
            ChannelId::new(20),
            MessageId::new(30),
            UserId::new(40),
        )
        .with_prize("  Nitro  ")
        .with_end_time(1_000)
    }

    #[test]
    fn test_prize_is_trimmed() {
        let giveaway = get_giveaway();

        assert_eq!(giveaway.prize, "Nitro");
    }

    #[test]
    fn test_remaining_secs_never_negative() {
        let giveaway = get_giveaway();

        assert_eq!(giveaway.remaining_secs(400), 600);
        assert_eq!(giveaway.remaining_secs(5_000), 0);
    }

    #[test]
    fn test_participants_are_deduplicated() {
        let giveaway = get_giveaway().with_participants(vec![
            UserId::new(1),
            UserId::new(2),
            UserId::new(1),
        ]);

        assert_eq!(giveaway.participants, vec![UserId::new(1), UserId::new(2)]);
    }

    #[test]
    fn test_eligible_participants_exclude_bot() {
        let bot_id = UserId::new(99);
        let giveaway =
            get_giveaway().with_participants(vec![UserId::new(1), bot_id, UserId::new(2)]);

        assert_eq!(
            giveaway.eligible_participants(bot_id),
            vec![UserId::new(1), UserId::new(2)]
        );
    }

    #[test]
    fn test_jump_url() {
        let giveaway = get_giveaway();

        assert_eq!(giveaway.jump_url(), "https://discord.com/channels/10/20/30");
    }

    #[test]
    fn test_get_error_for_zero_winners() {
        let giveaway = get_giveaway().with_num_winners(0);

        assert_eq!(
            giveaway.validate().unwrap_err(),
            Error::Validation("The number of winners must be a positive integer.".to_string())
        );
    }

    #[test]
    fn test_get_error_for_empty_prize() {
        let giveaway = get_giveaway().with_prize("   ");

        assert_eq!(
            giveaway.validate().unwrap_err(),
            Error::Validation("The prize can't be empty.".to_string())
        );
    }

    #[test]
    fn test_setup_into_giveaway() {
        let setup = GiveawaySetup {
            prize: "Nitro".to_string(),
            end_time: 1_000,
            num_winners: 2,
            host_id: UserId::new(40),
        };

        let giveaway = setup.into_giveaway(GuildId::new(10), ChannelId::new(20), MessageId::new(30));

        assert_eq!(giveaway, get_giveaway().with_num_winners(2));
    }
}
