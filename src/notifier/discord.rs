use reqwest::StatusCode;
use serde_json::json;

use super::WebhookTransport;
use crate::error::NotifyError;

pub struct DiscordNotifier<T> {
    transport: T,
    webhook_url: String,
}

impl<T: WebhookTransport> DiscordNotifier<T> {
    pub fn new(transport: T, webhook_url: impl Into<String>) -> Self {
        Self {
            transport,
            webhook_url: webhook_url.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Posts `message` with a single embed linking to the game. Discord
    /// answers 204 on success; anything else counts as a failure.
    pub async fn send(&self, message: &str, title: &str, url: &str) -> Result<(), NotifyError> {
        let payload = build_payload(message, title, url);

        match self.transport.post_json(&self.webhook_url, &payload).await {
            Ok(StatusCode::NO_CONTENT) => {
                tracing::info!(title, "webhook sent successfully");
                Ok(())
            }
            Ok(status) => {
                tracing::warn!(title, %status, "failed to send webhook");
                Err(NotifyError::UnexpectedStatus(status))
            }
            Err(e) => {
                tracing::warn!(title, error = %e, "webhook request failed");
                Err(e)
            }
        }
    }
}

pub fn build_payload(message: &str, title: &str, url: &str) -> serde_json::Value {
    json!({
        "content": message,
        "embeds": [{
            "title": title,
            "url": url,
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{extract::Json, http::StatusCode as AxumStatus, routing::post, Router};
    use serde_json::Value;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    struct FixedStatus {
        status: StatusCode,
        seen: Mutex<Vec<(String, Value)>>,
    }

    impl FixedStatus {
        fn new(status: StatusCode) -> Self {
            Self {
                status,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl WebhookTransport for FixedStatus {
        async fn post_json(&self, url: &str, payload: &Value) -> Result<StatusCode, NotifyError> {
            self.seen.lock().unwrap().push((url.to_string(), payload.clone()));
            Ok(self.status)
        }
    }

    #[test]
    fn test_payload_shape() {
        let payload = build_payload("hello", "Hades", "https://store.example.com/p/hades");

        assert_eq!(
            payload,
            json!({
                "content": "hello",
                "embeds": [{ "title": "Hades", "url": "https://store.example.com/p/hades" }]
            })
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_204_is_success() {
        let notifier = DiscordNotifier::new(FixedStatus::new(StatusCode::NO_CONTENT), "https://hook");

        notifier.send("msg", "Hades", "https://x/p/hades").await.unwrap();

        let seen = notifier.transport().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "https://hook");
        assert_eq!(seen[0].1["embeds"][0]["title"], "Hades");
        assert!(logs_contain("webhook sent successfully"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_other_statuses_fail_without_panicking() {
        for status in [StatusCode::OK, StatusCode::BAD_REQUEST, StatusCode::TOO_MANY_REQUESTS] {
            let notifier = DiscordNotifier::new(FixedStatus::new(status), "https://hook");

            let err = notifier.send("msg", "Hades", "https://x").await.unwrap_err();
            assert!(matches!(err, NotifyError::UnexpectedStatus(s) if s == status));
        }
        assert!(logs_contain("failed to send webhook"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_reqwest_transport_posts_json() {
        let expected = build_payload("msg", "Hades", "https://x/p/hades");
        let router = Router::new().route(
            "/hook",
            post(move |Json(body): Json<Value>| async move {
                if body == expected {
                    AxumStatus::NO_CONTENT
                } else {
                    AxumStatus::BAD_REQUEST
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let notifier = DiscordNotifier::new(reqwest::Client::new(), format!("http://{addr}/hook"));
        notifier.send("msg", "Hades", "https://x/p/hades").await.unwrap();

        let err = notifier.send("msg", "Other", "https://x").await.unwrap_err();
        assert!(matches!(err, NotifyError::UnexpectedStatus(s) if s == StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_unreachable_sink_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let notifier = DiscordNotifier::new(reqwest::Client::new(), format!("http://{addr}/hook"));
        let err = notifier.send("msg", "Hades", "https://x").await.unwrap_err();

        assert!(matches!(err, NotifyError::Transport(_)));
    }
}
