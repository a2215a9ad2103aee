use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};

use crate::catalog::{detect_offers, CatalogSource, DetectOptions, DetectedOffers, HttpCatalog};
use crate::config::{Config, CurrentOfferNotice};
use crate::global::Global;
use crate::notifier::{DiscordNotifier, WebhookTransport};
use crate::types::{GameOffer, UpcomingOffer};


pub const NEW_FREE_GAME_MESSAGE: &str = "New free game available on Epic Games:\n";

pub fn now_available_message(title: &str) -> String {
    format!("The game '{title}' is now available for free on the Epic Games Store!")
}

/// What the poller remembers between cycles. Lives only as long as the
/// process.
#[derive(Debug, Default)]
pub struct Session {
    last_sent_games: Vec<GameOffer>,
    notified_upcoming: HashMap<String, HashSet<NaiveDate>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_sent_games(&self) -> &[GameOffer] {
        &self.last_sent_games
    }

    /// Upcoming offers are keyed by title and start day, so a title that
    /// comes back in a later promotion is announced again.
    pub fn was_announced(&self, offer: &UpcomingOffer) -> bool {
        self.notified_upcoming
            .get(offer.title.as_str())
            .is_some_and(|days| days.contains(&offer.starts_on()))
    }

    fn mark_announced(&mut self, offer: &UpcomingOffer) {
        self.notified_upcoming
            .entry(offer.title.clone())
            .or_default()
            .insert(offer.starts_on());
    }
}

#[derive(Debug, Clone)]
pub struct PollerSettings {
    pub detect: DetectOptions,
    pub notice: CurrentOfferNotice,
    pub interval: Duration,
}

impl PollerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            detect: DetectOptions {
                store_base_url: config.store_base_url.clone(),
                max_current: config.max_current_offers,
            },
            notice: config.current_offer_notice,
            interval: Duration::from_secs(config.poll_interval_secs),
        }
    }
}

/// Outcome of one poll cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub fetched: bool,
    pub attempted: usize,
    pub delivered: usize,
}

impl CycleReport {
    fn record(&mut self, delivered: bool) {
        self.attempted += 1;
        if delivered {
            self.delivered += 1;
        }
    }
}

pub struct Poller<S, T> {
    source: S,
    notifier: DiscordNotifier<T>,
    settings: PollerSettings,
    session: Session,
}

impl Poller<HttpCatalog, reqwest::Client> {
    pub fn from_global(global: &Global) -> Self {
        let config = &global.config;

        Self::new(
            HttpCatalog::new(global.http_client.clone(), config.epic_games_api_url.clone()),
            DiscordNotifier::new(global.http_client.clone(), config.discord_webhook_url.clone()),
            PollerSettings::from_config(config),
        )
    }
}

impl<S: CatalogSource, T: WebhookTransport> Poller<S, T> {
    pub fn new(source: S, notifier: DiscordNotifier<T>, settings: PollerSettings) -> Self {
        Self {
            source,
            notifier,
            settings,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn notifier(&self) -> &DiscordNotifier<T> {
        &self.notifier
    }

    #[tracing::instrument(name = "Poller", skip_all)]
    pub async fn run(mut self) -> anyhow::Result<()> {
        let interval_secs = self.settings.interval.as_secs();
        tracing::info!(interval_secs, "starting poller");

        loop {
            self.tick(Utc::now()).await;

            tracing::info!(interval_secs, "sleeping until next poll");
            tokio::time::sleep(self.settings.interval).await;
        }
    }

    /// One fetch → diff → notify pass. A failed fetch leaves the session
    /// untouched.
    pub async fn tick(&mut self, now: DateTime<Utc>) -> CycleReport {
        let catalog = match self.source.fetch_catalog().await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch catalog");
                return CycleReport::default();
            }
        };

        let offers = detect_offers(&catalog, now, &self.settings.detect);

        tracing::info!(
            current = offers.current.len(),
            upcoming = offers.upcoming.len(),
            "checked catalog"
        );

        let mut report = self.apply(offers, now).await;
        report.fetched = true;
        report
    }

    /// Diffs freshly detected offers against the session and sends whatever
    /// notifications that calls for.
    pub async fn apply(&mut self, offers: DetectedOffers, now: DateTime<Utc>) -> CycleReport {
        let mut report = CycleReport::default();

        if offers.current != self.session.last_sent_games {
            self.announce_current(&offers.current, &mut report).await;
            self.session.last_sent_games = offers.current;
        }

        let today = now.date_naive();
        for offer in &offers.upcoming {
            if offer.starts_on() != today || self.session.was_announced(offer) {
                continue;
            }

            let delivered = self
                .notifier
                .send(&now_available_message(&offer.title), &offer.title, &offer.url)
                .await
                .is_ok();
            report.record(delivered);
            self.session.mark_announced(offer);
        }

        report
    }

    async fn announce_current(&self, current: &[GameOffer], report: &mut CycleReport) {
        let targets: &[GameOffer] = match (self.settings.notice, current.last()) {
            (_, None) => {
                tracing::info!("no current free games, nothing to announce");
                return;
            }
            (CurrentOfferNotice::Latest, Some(last)) => std::slice::from_ref(last),
            (CurrentOfferNotice::Each, Some(_)) => current,
        };

        for offer in targets {
            let delivered = self
                .notifier
                .send(NEW_FREE_GAME_MESSAGE, &offer.title, &offer.url)
                .await
                .is_ok();
            report.record(delivered);
        }
    }
}
