use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("catalog returned status {0}")]
    Status(StatusCode),
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed catalog payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("webhook returned status {0}, expected 204")]
    UnexpectedStatus(StatusCode),
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
