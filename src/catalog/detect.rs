use chrono::{DateTime, Utc};

use crate::types::catalog::CatalogElement;
use crate::types::{CatalogResponse, GameOffer, UpcomingOffer};

#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Prefix for product pages; offers link to `<store_base_url>/p/<slug>`.
    pub store_base_url: String,
    /// How many current offers are kept, in payload order.
    pub max_current: usize,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            store_base_url: "https://store.epicgames.com/en-US".into(),
            max_current: 3,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DetectedOffers {
    pub current: Vec<GameOffer>,
    pub upcoming: Vec<UpcomingOffer>,
}

pub fn detect_offers(
    catalog: &CatalogResponse,
    now: DateTime<Utc>,
    options: &DetectOptions,
) -> DetectedOffers {
    DetectedOffers {
        current: detect_current(catalog, options),
        upcoming: detect_upcoming(catalog, now, options),
    }
}

/// Elements with at least one non-empty active promotion group, truncated
/// to `max_current`.
pub fn detect_current(catalog: &CatalogResponse, options: &DetectOptions) -> Vec<GameOffer> {
    elements(catalog)
        .filter(|element| {
            element.promotions.as_ref().is_some_and(|p| {
                p.promotional_offers
                    .iter()
                    .any(|group| !group.promotional_offers.is_empty())
            })
        })
        .map(|element| GameOffer {
            title: element.title.clone(),
            url: offer_url(&options.store_base_url, element),
        })
        .take(options.max_current)
        .collect()
}

/// Elements whose first non-empty upcoming promotion group starts strictly
/// after `now`.
pub fn detect_upcoming(
    catalog: &CatalogResponse,
    now: DateTime<Utc>,
    options: &DetectOptions,
) -> Vec<UpcomingOffer> {
    let mut upcoming = Vec::new();

    for element in elements(catalog) {
        let Some(promotions) = &element.promotions else {
            continue;
        };

        let Some(offer) = promotions
            .upcoming_promotional_offers
            .iter()
            .find_map(|group| group.promotional_offers.first())
        else {
            continue;
        };

        let Some(raw) = offer.start_date.as_deref() else {
            tracing::warn!(title = element.title, "upcoming offer has no start date");
            continue;
        };

        let start_date = match DateTime::parse_from_rfc3339(raw) {
            Ok(date) => date.with_timezone(&Utc),
            Err(e) => {
                tracing::warn!(title = element.title, start_date = raw, error = %e, "unparseable start date");
                continue;
            }
        };

        if start_date <= now {
            continue;
        }

        upcoming.push(UpcomingOffer {
            title: element.title.clone(),
            url: offer_url(&options.store_base_url, element),
            start_date,
        });
    }

    upcoming
}

fn elements(catalog: &CatalogResponse) -> impl Iterator<Item = &CatalogElement> {
    catalog.data.catalog.search_store.elements.iter()
}

/// Product page for the element, or the store front when the catalog gave
/// no slug.
fn offer_url(base: &str, element: &CatalogElement) -> String {
    let base = base.trim_end_matches('/');

    match element.slug() {
        Some(slug) => format!("{base}/p/{slug}"),
        None => {
            tracing::warn!(title = element.title, "promoted element has no product slug, linking store front");
            base.to_string()
        }
    }
}
