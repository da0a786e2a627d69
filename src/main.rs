use std::sync::Arc;
use std::time::Instant;

use poise::serenity_prelude as serenity;
use tracing::{error, info};

use guildkeeper::alerts;
use guildkeeper::commands::giveaway::{GiveawayManager, GiveawayStore, spawn_scheduler};
use guildkeeper::commands::{self, UserData};
use guildkeeper::config::Config;
use guildkeeper::db::Database;
use guildkeeper::embeds;
use guildkeeper::error::Error;
use guildkeeper::events;
use guildkeeper::signal::shutdown_signal;

async fn on_error(error: poise::FrameworkError<'_, UserData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            let source = ctx.command().qualified_name.clone();
            if error.is_user_error() {
                tracing::debug!(command = %source, error = %error, "Command rejected");
            } else {
                alerts::report_error(
                    ctx.serenity_context().http.as_ref(),
                    ctx.data().config.error_channel_id,
                    &source,
                    &error,
                )
                .await;
            }

            let embed = embeds::error_embed()
                .title("Error")
                .description(error.user_message());
            if let Err(why) = ctx
                .send(poise::CreateReply::default().embed(embed).ephemeral(true))
                .await
            {
                error!(error = %why, "Failed to send the error reply");
            }
        }
        other => {
            if let Err(why) = poise::builtins::on_error(other).await {
                error!(error = %why, "Error while handling error");
            }
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("guildkeeper=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    let db = match Database::open(&config.database_path) {
        Ok(db) => Arc::new(db),
        Err(err) => {
            error!(error = %err, path = %config.database_path.display(), "Failed to open the database");
            std::process::exit(1);
        }
    };

    let token = config.discord_token.clone();
    let intents = serenity::GatewayIntents::non_privileged();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            event_handler: |ctx, event, _framework, data| {
                Box::pin(async move {
                    events::handle_event(ctx, event, data).await;
                    Ok(())
                })
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                match config.guild_id {
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id)
                            .await?;
                        info!(%guild_id, "Slash commands registered to guild");
                    }
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                        info!("Slash commands registered globally");
                    }
                }

                let store = Arc::new(GiveawayStore::new(db, ready.user.id));
                let manager = Arc::new(GiveawayManager::new(store, config.entry_emoji.clone()));
                spawn_scheduler(ctx.clone(), Arc::clone(&manager), config.check_interval);

                info!(bot = %ready.user.name, "Bot is ready");
                Ok(UserData {
                    manager,
                    config,
                    start_time: Instant::now(),
                })
            })
        })
        .build();

    let mut client = match serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
    {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "Failed to create the Discord client");
            std::process::exit(1);
        }
    };

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, stopping the bot");
        shard_manager.shutdown_all().await;
    });

    info!("Starting the bot");
    if let Err(why) = client.start().await {
        error!(error = %why, "Client error");
    }
    info!("The bot has shut down");
}
