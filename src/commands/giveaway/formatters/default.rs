// Text output of the giveaway engine
use crate::commands::giveaway::formatters::base::GiveawayFormatter;
use crate::commands::giveaway::models::{Draw, Giveaway, GiveawaySetup};

#[derive(Debug, Default)]
pub struct DefaultGiveawayFormatter;

impl DefaultGiveawayFormatter {
    pub fn new() -> Self {
        DefaultGiveawayFormatter {}
    }
}

// Compact human-readable duration, e.g. `2d 3h 15m`. Seconds are only shown
// for durations under a minute.
pub fn format_remaining(secs: u64) -> String {
    if secs == 0 {
        return "ending now".to_string();
    }
    if secs < 60 {
        return format!("{}s", secs);
    }

    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;

    let parts = [(days, "d"), (hours, "h"), (minutes, "m")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect::<Vec<String>>();
    parts.join(" ")
}

impl GiveawayFormatter for DefaultGiveawayFormatter {
    fn announcement(&self, setup: &GiveawaySetup, entry_emoji: &str) -> String {
        format!(
            "Prize: **{}**\nWinners: {}\nReact with {} to enter!\nEnds: <t:{}:R>\nHosted by: <@{}>",
            setup.prize, setup.num_winners, entry_emoji, setup.end_time, setup.host_id,
        )
    }

    fn draw_result(&self, draw: &Draw, mentions: &[String]) -> String {
        match (draw.has_participants(), mentions.is_empty()) {
            (false, _) => format!("No participants for the giveaway for **{}**. 😔", draw.prize),
            (true, true) => format!(
                "The winners of the giveaway for **{}** are no longer in the server. 😔",
                draw.prize
            ),
            (true, false) => format!(
                "Congratulations {}! You won the giveaway for **{}**! 🎉",
                mentions.join(", "),
                draw.prize
            ),
        }
    }

    fn list_entry(&self, giveaway: &Giveaway, now: i64) -> (String, String) {
        let title = format!("Giveaway in <#{}>", giveaway.channel_id);
        let body = format!(
            "Prize: **{}**\nWinners: {}\nEnds in: {} (<t:{}:f>)\nEntries: {}\n[Message Link]({})",
            giveaway.prize,
            giveaway.num_winners,
            format_remaining(giveaway.remaining_secs(now)),
            giveaway.end_time,
            giveaway.participants.len(),
            giveaway.jump_url(),
        );
        (title, body)
    }
}

#[cfg(test)]
mod tests {
    use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};

    use crate::commands::giveaway::formatters::{
        DefaultGiveawayFormatter, GiveawayFormatter, format_remaining,
    };
    use crate::commands::giveaway::models::{Draw, Giveaway, GiveawaySetup};

    fn get_giveaway() -> Giveaway {
        Giveaway::new(
            GuildId::new(1),
            ChannelId::new(2),
            MessageId::new(3),
            UserId::new(4),
        )
        .with_prize("Nitro")
        .with_end_time(1_000)
        .with_num_winners(2)
        .with_participants(vec![UserId::new(5), UserId::new(6)])
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(0), "ending now");
        assert_eq!(format_remaining(45), "45s");
        assert_eq!(format_remaining(60), "1m");
        assert_eq!(format_remaining(3_600 + 120), "1h 2m");
        assert_eq!(format_remaining(2 * 86_400 + 59), "2d");
        assert_eq!(format_remaining(86_400 + 3 * 3_600 + 15 * 60), "1d 3h 15m");
    }

    #[test]
    fn test_announcement() {
        let formatter = DefaultGiveawayFormatter::new();

        assert_eq!(
            formatter.announcement(
                &GiveawaySetup {
                    prize: "Nitro".to_string(),
                    end_time: 1_000,
                    num_winners: 2,
                    host_id: UserId::new(4),
                },
                "🎉"
            ),
            "Prize: **Nitro**\nWinners: 2\nReact with 🎉 to enter!\nEnds: <t:1000:R>\nHosted by: <@4>"
        );
    }

    #[test]
    fn test_draw_result_with_winners() {
        let formatter = DefaultGiveawayFormatter::new();
        let draw = Draw {
            prize: "Nitro".to_string(),
            eligible: 2,
            winners: vec![UserId::new(5), UserId::new(6)],
        };
        let mentions = vec!["<@5>".to_string(), "<@6>".to_string()];

        assert_eq!(
            formatter.draw_result(&draw, &mentions),
            "Congratulations <@5>, <@6>! You won the giveaway for **Nitro**! 🎉"
        );
    }

    #[test]
    fn test_draw_result_without_participants() {
        let formatter = DefaultGiveawayFormatter::new();
        let draw = Draw {
            prize: "Nitro".to_string(),
            eligible: 0,
            winners: vec![],
        };

        assert_eq!(
            formatter.draw_result(&draw, &[]),
            "No participants for the giveaway for **Nitro**. 😔"
        );
    }

    #[test]
    fn test_draw_result_when_winners_left() {
        let formatter = DefaultGiveawayFormatter::new();
        let draw = Draw {
            prize: "Nitro".to_string(),
            eligible: 1,
            winners: vec![UserId::new(5)],
        };

        assert_eq!(
            formatter.draw_result(&draw, &[]),
            "The winners of the giveaway for **Nitro** are no longer in the server. 😔"
        );
    }

    #[test]
    fn test_list_entry() {
        let formatter = DefaultGiveawayFormatter::new();
        let (title, body) = formatter.list_entry(&get_giveaway(), 880);

        assert_eq!(title, "Giveaway in <#2>");
        assert_eq!(
            body,
            "Prize: **Nitro**\nWinners: 2\nEnds in: 2m (<t:1000:f>)\nEntries: 2\n\
             [Message Link](https://discord.com/channels/1/2/3)"
        );
    }
}
