use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::NotifyError;

pub mod discord;

pub use discord::DiscordNotifier;

/// Delivery of a JSON body to a webhook URL. The status is returned as-is;
/// interpreting it is the notifier's job.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post_json(&self, url: &str, payload: &serde_json::Value) -> Result<StatusCode, NotifyError>;
}

#[async_trait]
impl WebhookTransport for reqwest::Client {
    async fn post_json(&self, url: &str, payload: &serde_json::Value) -> Result<StatusCode, NotifyError> {
        let response = self.post(url).json(payload).send().await?;
        Ok(response.status())
    }
}
