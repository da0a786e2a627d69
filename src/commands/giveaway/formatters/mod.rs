pub mod base;
pub mod default;

pub use crate::commands::giveaway::formatters::base::GiveawayFormatter;
pub use crate::commands::giveaway::formatters::default::{DefaultGiveawayFormatter, format_remaining};
