use crate::commands::giveaway::models::{Draw, Giveaway, GiveawaySetup};

pub trait GiveawayFormatter: Send + Sync {
    // Body of the announcement users react to.
    fn announcement(&self, setup: &GiveawaySetup, entry_emoji: &str) -> String;
    // Result of a draw. `mentions` holds the winners still present in the guild.
    fn draw_result(&self, draw: &Draw, mentions: &[String]) -> String;
    // Title and body of a single entry in the list of active giveaways.
    fn list_entry(&self, giveaway: &Giveaway, now: i64) -> (String, String);
}
