//! Standalone check for the Discord webhook.
//!
//! Loads the same configuration as the checker and sends one sample
//! notification, so a bad `DISCORD_WEBHOOK_URL` shows up before the first
//! real free game does.
//!
//! Run with: cargo run --bin test-notifier

use freegame_notifier::config::Config;
use freegame_notifier::global::Global;
use freegame_notifier::notifier::DiscordNotifier;
use freegame_notifier::poller::NEW_FREE_GAME_MESSAGE;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt().with_target(false).init();

    let sample_url = format!("{}/p/test-game", config.store_base_url.trim_end_matches('/'));
    let global = Global::init(config)?;
    let notifier = DiscordNotifier::new(
        global.http_client.clone(),
        global.config.discord_webhook_url.clone(),
    );

    println!("Sending test notification to Discord...");

    notifier
        .send(NEW_FREE_GAME_MESSAGE, "Test Game (this is a test notification)", &sample_url)
        .await?;

    println!("Webhook accepted the test notification.");
    Ok(())
}
