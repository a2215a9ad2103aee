use freegame_notifier::config::Config;
use freegame_notifier::global::Global;
use freegame_notifier::poller::Poller;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .parse_lossy(&config.level),
        )
        .init();

    tracing::info!("starting epic games free games checker");

    let global = Global::init(config)?;
    let poller = Poller::from_global(&global);

    tokio::select! {
        r = poller.run() => {
            if let Err(e) = r {
                tracing::error!("poller error: {:#}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!(
                uptime_secs = global.started_at.elapsed().as_secs(),
                "shutting down"
            );
        }
    }

    Ok(())
}
