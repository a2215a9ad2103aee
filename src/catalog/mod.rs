use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::FetchError;
use crate::types::CatalogResponse;

pub mod detect;


pub use detect::{detect_current, detect_offers, detect_upcoming, DetectOptions, DetectedOffers};

/// Something that can produce a fresh catalog snapshot.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<CatalogResponse, FetchError>;
}

/// Catalog served over HTTP by the store's promotions endpoint.
pub struct HttpCatalog {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalog {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_catalog(&self) -> Result<CatalogResponse, FetchError> {
        fetch(&self.client, &self.url).await
    }
}

#[tracing::instrument(skip(client))]
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<CatalogResponse, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status(status));
    }

    let body = response.text().await?;
    let catalog = parse(&body)?;

    tracing::debug!(
        elements = catalog.data.catalog.search_store.elements.len(),
        "fetched catalog"
    );

    Ok(catalog)
}

pub fn parse(body: &str) -> Result<CatalogResponse, FetchError> {
    Ok(serde_json::from_str(body)?)
}
