use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serenity::all::{ChannelId, GuildId, ReactionType};

use crate::error::{Error, Result};

pub const DEFAULT_DATABASE_PATH: &str = "db/giveaways.db";
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_ENTRY_EMOJI: &str = "🎉";
pub const DEFAULT_BOT_COMMAND: &str = "./guildkeeper";
pub const DEFAULT_BACKUP_INTERVAL_SECS: u64 = 1800;
pub const DEFAULT_RESTART_DELAY_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_path: PathBuf,
    pub guild_id: Option<GuildId>,
    pub error_channel_id: Option<ChannelId>,
    pub check_interval: Duration,
    pub entry_emoji: ReactionType,
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// Required:
    /// - `DISCORD_TOKEN`: bot token from the Discord Developer Portal
    ///
    /// Optional:
    /// - `DATABASE_PATH`: SQLite file, defaults to `db/giveaways.db`
    /// - `GUILD_ID`: register slash commands in this guild only
    /// - `ERROR_CHANNEL_ID`: channel receiving error alerts
    /// - `GIVEAWAY_CHECK_INTERVAL_SECS`: scheduler period, defaults to 30
    /// - `GIVEAWAY_EMOJI`: reaction used to enter giveaways, defaults to 🎉;
    ///   custom emoji are written as `<:name:id>`
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = non_empty(lookup("DISCORD_TOKEN"))
            .ok_or_else(|| Error::Config("DISCORD_TOKEN environment variable is required".into()))?;

        let database_path = non_empty(lookup("DATABASE_PATH"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let guild_id = parse_optional_id::<GuildId>("GUILD_ID", lookup("GUILD_ID"))?;
        let error_channel_id =
            parse_optional_id::<ChannelId>("ERROR_CHANNEL_ID", lookup("ERROR_CHANNEL_ID"))?;

        let check_interval = parse_seconds(
            "GIVEAWAY_CHECK_INTERVAL_SECS",
            lookup("GIVEAWAY_CHECK_INTERVAL_SECS"),
            DEFAULT_CHECK_INTERVAL_SECS,
        )?;

        let entry_emoji = parse_emoji(
            "GIVEAWAY_EMOJI",
            non_empty(lookup("GIVEAWAY_EMOJI")).unwrap_or_else(|| DEFAULT_ENTRY_EMOJI.to_string()),
        )?;

        Ok(Config {
            discord_token,
            database_path,
            guild_id,
            error_channel_id,
            check_interval,
            entry_emoji,
        })
    }
}

#[derive(Debug, Clone)]
pub struct WatchdogConfig {
    pub bot_command: String,
    pub webhook_url: Option<String>,
    pub backup_paths: Vec<PathBuf>,
    pub backup_interval: Duration,
    pub restart_delay: Duration,
}

impl WatchdogConfig {
    /// Load the watchdog configuration from environment variables (and `.env`).
    ///
    /// - `BOT_COMMAND`: executable to supervise, defaults to `./guildkeeper`
    /// - `WEBHOOK_URL`: Discord webhook receiving backups; backups are off without it
    /// - `BACKUP_PATHS`: comma-separated database files, defaults to `db/giveaways.db`
    /// - `BACKUP_INTERVAL_SECS`: defaults to 1800
    /// - `RESTART_DELAY_SECS`: pause before restarting the bot, defaults to 5
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        WatchdogConfig::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_command =
            non_empty(lookup("BOT_COMMAND")).unwrap_or_else(|| DEFAULT_BOT_COMMAND.to_string());
        let webhook_url = non_empty(lookup("WEBHOOK_URL"));

        let backup_paths = match non_empty(lookup("BACKUP_PATHS")) {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
                .collect(),
            None => vec![PathBuf::from(DEFAULT_DATABASE_PATH)],
        };

        let backup_interval = parse_seconds(
            "BACKUP_INTERVAL_SECS",
            lookup("BACKUP_INTERVAL_SECS"),
            DEFAULT_BACKUP_INTERVAL_SECS,
        )?;
        let restart_delay = parse_seconds(
            "RESTART_DELAY_SECS",
            lookup("RESTART_DELAY_SECS"),
            DEFAULT_RESTART_DELAY_SECS,
        )?;

        Ok(WatchdogConfig {
            bot_command,
            webhook_url,
            backup_paths,
            backup_interval,
            restart_delay,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn parse_optional_id<T>(var: &str, value: Option<String>) -> Result<Option<T>>
where
    T: From<u64>,
{
    match non_empty(value) {
        Some(val) => {
            let id = val
                .parse::<u64>()
                .ok()
                .filter(|id| *id != 0)
                .ok_or_else(|| Error::Config(format!("Invalid ID for {var}: '{val}'")))?;
            Ok(Some(T::from(id)))
        }
        None => Ok(None),
    }
}

// Accepts a unicode emoji or a custom one in the `<:name:id>` / `<a:name:id>` form.
fn parse_emoji(var: &str, value: String) -> Result<ReactionType> {
    ReactionType::try_from(value.as_str())
        .map_err(|_| Error::Config(format!("Invalid emoji for {var}: '{value}'")))
}

fn parse_seconds(var: &str, value: Option<String>, default: u64) -> Result<Duration> {
    let secs = match non_empty(value) {
        Some(val) => u64::from_str(&val)
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| Error::Config(format!("Invalid number of seconds for {var}: '{val}'")))?,
        None => default,
    };
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    use serenity::all::{ChannelId, EmojiId, GuildId, ReactionType};

    use crate::config::{Config, WatchdogConfig};
    use crate::error::Error;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<String, String>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_load_config_with_defaults() {
        let config = Config::from_lookup(lookup(&[("DISCORD_TOKEN", "token")])).unwrap();

        assert_eq!(config.discord_token, "token");
        assert_eq!(config.database_path, PathBuf::from("db/giveaways.db"));
        assert_eq!(config.guild_id, None);
        assert_eq!(config.error_channel_id, None);
        assert_eq!(config.check_interval, Duration::from_secs(30));
        assert_eq!(config.entry_emoji, ReactionType::Unicode("🎉".to_string()));
    }

    #[test]
    fn test_load_config_with_all_values() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("DATABASE_PATH", "/var/lib/bot/data.db"),
            ("GUILD_ID", "1234"),
            ("ERROR_CHANNEL_ID", " 5678 "),
            ("GIVEAWAY_CHECK_INTERVAL_SECS", "10"),
            ("GIVEAWAY_EMOJI", "🎁"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/var/lib/bot/data.db"));
        assert_eq!(config.guild_id, Some(GuildId::new(1234)));
        assert_eq!(config.error_channel_id, Some(ChannelId::new(5678)));
        assert_eq!(config.check_interval, Duration::from_secs(10));
        assert_eq!(config.entry_emoji, ReactionType::Unicode("🎁".to_string()));
    }

    #[test]
    fn test_load_custom_entry_emoji() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("GIVEAWAY_EMOJI", "<:party:42>"),
        ]))
        .unwrap();

        assert_eq!(
            config.entry_emoji,
            ReactionType::Custom {
                animated: false,
                id: EmojiId::new(42),
                name: Some("party".to_string()),
            }
        );
        assert_eq!(config.entry_emoji.to_string(), "<:party:42>");
    }

    #[test]
    fn test_get_error_for_malformed_custom_emoji() {
        let result = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("GIVEAWAY_EMOJI", "<:party>"),
        ]));

        assert_eq!(
            result.unwrap_err(),
            Error::Config("Invalid emoji for GIVEAWAY_EMOJI: '<:party>'".to_string())
        );
    }

    #[test]
    fn test_get_error_for_missing_token() {
        let result = Config::from_lookup(lookup(&[("DISCORD_TOKEN", "  ")]));

        assert_eq!(result.is_err(), true);
        assert_eq!(
            result.unwrap_err(),
            Error::Config("DISCORD_TOKEN environment variable is required".to_string())
        );
    }

    #[test]
    fn test_get_error_for_invalid_guild_id() {
        let result = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("GUILD_ID", "not-a-number"),
        ]));

        assert_eq!(
            result.unwrap_err(),
            Error::Config("Invalid ID for GUILD_ID: 'not-a-number'".to_string())
        );
    }

    #[test]
    fn test_get_error_for_zero_interval() {
        let result = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("GIVEAWAY_CHECK_INTERVAL_SECS", "0"),
        ]));

        assert_eq!(
            result.unwrap_err(),
            Error::Config("Invalid number of seconds for GIVEAWAY_CHECK_INTERVAL_SECS: '0'".to_string())
        );
    }

    #[test]
    fn test_load_watchdog_config_with_defaults() {
        let config = WatchdogConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.bot_command, "./guildkeeper");
        assert_eq!(config.webhook_url, None);
        assert_eq!(config.backup_paths, vec![PathBuf::from("db/giveaways.db")]);
        assert_eq!(config.backup_interval, Duration::from_secs(1800));
        assert_eq!(config.restart_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_load_watchdog_backup_paths_list() {
        let config = WatchdogConfig::from_lookup(lookup(&[
            ("WEBHOOK_URL", "https://discord.com/api/webhooks/1/abc"),
            ("BACKUP_PATHS", "db/giveaways.db, db/economy.db,,"),
        ]))
        .unwrap();

        assert_eq!(
            config.webhook_url,
            Some("https://discord.com/api/webhooks/1/abc".to_string())
        );
        assert_eq!(
            config.backup_paths,
            vec![PathBuf::from("db/giveaways.db"), PathBuf::from("db/economy.db")]
        );
    }
}
