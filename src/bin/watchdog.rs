use tracing::{error, info, warn};

use guildkeeper::config::WatchdogConfig;
use guildkeeper::signal::shutdown_signal;
use guildkeeper::watchdog::{run_backups, supervise};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("watchdog=info,guildkeeper=info")),
        )
        .init();

    let config = match WatchdogConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    let backups = match config.webhook_url.clone() {
        Some(webhook_url) => {
            info!(
                files = config.backup_paths.len(),
                interval_secs = config.backup_interval.as_secs(),
                "Database backups enabled"
            );
            Some(tokio::spawn(run_backups(
                webhook_url,
                config.backup_paths.clone(),
                config.backup_interval,
            )))
        }
        None => {
            warn!("No WEBHOOK_URL configured, database backups are disabled");
            None
        }
    };

    let supervisor = tokio::spawn(supervise(config.bot_command.clone(), config.restart_delay));

    shutdown_signal().await;
    info!("Shutdown signal received, stopping the watchdog");

    supervisor.abort();
    if let Some(backups) = backups {
        backups.abort();
    }
    // Aborted tasks drop the child handle, which kills the bot process.
    let _ = supervisor.await;
    info!("Processes terminated");
}
