pub mod formatters;
pub mod handlers;
pub mod manager;
pub mod models;
pub mod parser;
pub mod platform;
pub mod scheduler;
pub mod storage;
pub mod strategies;
pub mod utils;

pub use crate::commands::giveaway::handlers::giveaway;
pub use crate::commands::giveaway::manager::GiveawayManager;
pub use crate::commands::giveaway::scheduler::spawn_scheduler;
pub use crate::commands::giveaway::storage::GiveawayStore;
