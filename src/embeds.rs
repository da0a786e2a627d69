use serenity::all::{CreateEmbed, CreateEmbedFooter};
use serenity::model::Timestamp;

pub struct Colors;

impl Colors {
    pub const GIVEAWAY: u32 = 0xFFD700;
    pub const INFO: u32 = 0x5865F2;
    pub const ERROR: u32 = 0xFF0000;
}

/// Embed used for giveaway announcements and listings.
pub fn giveaway_embed() -> CreateEmbed {
    base_embed(Colors::GIVEAWAY)
}

pub fn info_embed() -> CreateEmbed {
    base_embed(Colors::INFO)
}

pub fn error_embed() -> CreateEmbed {
    base_embed(Colors::ERROR)
}

fn base_embed(color: u32) -> CreateEmbed {
    CreateEmbed::default()
        .color(color)
        .footer(CreateEmbedFooter::new("guildkeeper"))
        .timestamp(Timestamp::now())
}
