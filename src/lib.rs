pub mod alerts;
pub mod commands;
pub mod config;
pub mod db;
pub mod embeds;
pub mod error;
pub mod events;
pub mod signal;
pub mod watchdog;
