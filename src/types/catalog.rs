//! Shape of the `freeGamesPromotions` catalog payload. Only the fields the
//! detector reads are modelled; everything else is ignored by serde.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    pub data: CatalogData,
}

#[derive(Debug, Deserialize)]
pub struct CatalogData {
    #[serde(rename = "Catalog")]
    pub catalog: Catalog,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub search_store: SearchStore,
}

#[derive(Debug, Deserialize)]
pub struct SearchStore {
    pub elements: Vec<CatalogElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogElement {
    pub title: String,
    #[serde(default)]
    pub product_slug: Option<String>,
    #[serde(default)]
    pub promotions: Option<Promotions>,
}

impl CatalogElement {
    /// The product slug, if the store gave a usable one.
    pub fn slug(&self) -> Option<&str> {
        self.product_slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotions {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub promotional_offers: Vec<PromotionGroup>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub upcoming_promotional_offers: Vec<PromotionGroup>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionGroup {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub promotional_offers: Vec<PromotionalOffer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionalOffer {
    #[serde(default)]
    pub start_date: Option<String>,
}

/// The store sends `null` instead of `[]` for empty offer lists.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
