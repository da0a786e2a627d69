use std::sync::Arc;
use std::time::Instant;

use poise::Context as PoiseContext;

use crate::commands::giveaway::manager::GiveawayManager;
use crate::config::Config;

// User data, which is stored and accessible in all command invocations
pub struct UserData {
    pub manager: Arc<GiveawayManager>,
    pub config: Config,
    pub start_time: Instant,
}

// Generic context available across Poise commands
pub type Context<'a> = PoiseContext<'a, UserData, crate::error::Error>;

pub type ApplicationContext<'a> = poise::ApplicationContext<'a, UserData, crate::error::Error>;
