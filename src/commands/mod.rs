pub mod context;
pub mod general;
pub mod giveaway;
pub mod help;

pub use crate::commands::context::{Context, UserData};

// Every command registered with the framework.
pub fn all() -> Vec<poise::Command<UserData, crate::error::Error>> {
    vec![
        giveaway::giveaway(),
        general::ping(),
        general::status(),
        help::help(),
    ]
}
