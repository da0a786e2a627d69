use std::sync::Arc;
use std::time::Duration;

use serenity::all::Context;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::commands::giveaway::manager::GiveawayManager;
use crate::commands::giveaway::platform::SerenityPlatform;
use crate::commands::giveaway::utils::unix_now;

// Starts the background task that finalizes expired giveaways. Runs until the
// runtime shuts down; failures inside a pass are logged by the manager.
pub fn spawn_scheduler(ctx: Context, manager: Arc<GiveawayManager>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let platform = SerenityPlatform::new(ctx);
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(period_secs = period.as_secs(), "Giveaway scheduler started");
        loop {
            ticker.tick().await;
            manager.run_tick(&platform, unix_now()).await;
        }
    })
}
