use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;

use crate::config::Config;

pub struct Global {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub started_at: std::time::Instant,
}

impl Global {
    pub fn init(config: Config) -> anyhow::Result<Arc<Self>> {
        let http_client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("http client")?;

        Ok(Arc::new(Self {
            config,
            http_client,
            started_at: std::time::Instant::now(),
        }))
    }
}
