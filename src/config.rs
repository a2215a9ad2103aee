use anyhow::Context as _;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Environment, File};
use serde::Deserialize;

/// How a change in the current free games is announced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrentOfferNotice {
    /// One notification carrying the last offer of the new batch.
    #[default]
    Latest,
    /// One notification per offer in the new batch.
    Each,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub epic_games_api_url: String,
    pub discord_webhook_url: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_store_base_url")]
    pub store_base_url: String,
    #[serde(default = "default_max_current_offers")]
    pub max_current_offers: usize,
    #[serde(default)]
    pub current_offer_notice: CurrentOfferNotice,
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_poll_interval_secs() -> u64 {
    3600
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_store_base_url() -> String {
    "https://store.epicgames.com/en-US".into()
}

fn default_max_current_offers() -> usize {
    3
}

fn default_level() -> String {
    "info".into()
}

impl Config {
    /// Reads `config/default.yaml`, `config/local.yaml` and then the process
    /// environment. Environment keys are unprefixed so `EPIC_GAMES_API_URL`
    /// and `DISCORD_WEBHOOK_URL` are picked up as-is.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(File::with_name("config/default.yaml").required(false))
            .add_source(File::with_name("config/local.yaml").required(false))
            .add_source(Environment::default().try_parsing(true));

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
        let config: Self = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration (EPIC_GAMES_API_URL and DISCORD_WEBHOOK_URL are required)")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        check_url("EPIC_GAMES_API_URL", &self.epic_games_api_url)?;
        check_url("DISCORD_WEBHOOK_URL", &self.discord_webhook_url)?;
        check_url("STORE_BASE_URL", &self.store_base_url)?;

        anyhow::ensure!(
            self.poll_interval_secs > 0,
            "POLL_INTERVAL_SECS must be greater than zero"
        );
        anyhow::ensure!(
            self.request_timeout_secs > 0,
            "REQUEST_TIMEOUT_SECS must be greater than zero"
        );
        anyhow::ensure!(
            self.max_current_offers > 0,
            "MAX_CURRENT_OFFERS must be greater than zero"
        );

        Ok(())
    }
}

fn check_url(name: &str, value: &str) -> anyhow::Result<()> {
    anyhow::ensure!(!value.trim().is_empty(), "{name} is set but empty");
    reqwest::Url::parse(value).with_context(|| format!("{name} is not a valid URL: {value}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ConfigBuilder<DefaultState> {
        config::Config::builder()
            .set_override("epic_games_api_url", "https://catalog.example.com/freeGamesPromotions")
            .unwrap()
            .set_override("discord_webhook_url", "https://discord.example.com/api/webhooks/1/abc")
            .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_builder(base()).unwrap();

        assert_eq!(config.poll_interval_secs, 3600);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.store_base_url, "https://store.epicgames.com/en-US");
        assert_eq!(config.max_current_offers, 3);
        assert_eq!(config.current_offer_notice, CurrentOfferNotice::Latest);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_overrides() {
        let builder = base()
            .set_override("poll_interval_secs", 60)
            .unwrap()
            .set_override("current_offer_notice", "each")
            .unwrap();
        let config = Config::from_builder(builder).unwrap();

        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.current_offer_notice, CurrentOfferNotice::Each);
    }

    #[test]
    fn test_level_override() {
        let builder = base().set_override("level", "debug").unwrap();
        let config = Config::from_builder(builder).unwrap();

        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_level_from_environment_key() {
        // environment keys are lowercased, so `LEVEL` lands on `level`
        let env = config::Environment::default().source(Some(
            [
                ("EPIC_GAMES_API_URL".to_string(), "https://catalog.example.com/x".to_string()),
                ("DISCORD_WEBHOOK_URL".to_string(), "https://discord.example.com/hook".to_string()),
                ("LEVEL".to_string(), "debug".to_string()),
            ]
            .into_iter()
            .collect(),
        ));
        let config = Config::from_builder(config::Config::builder().add_source(env)).unwrap();

        assert_eq!(config.level, "debug");
        assert_eq!(config.epic_games_api_url, "https://catalog.example.com/x");
    }

    #[test]
    fn test_missing_webhook_url_fails() {
        let builder = config::Config::builder()
            .set_override("epic_games_api_url", "https://catalog.example.com/")
            .unwrap();
        let err = Config::from_builder(builder).unwrap_err();

        assert!(format!("{err:#}").contains("discord_webhook_url"), "{err:#}");
    }

    #[test]
    fn test_rejects_empty_and_malformed_urls() {
        let empty = base().set_override("discord_webhook_url", "  ").unwrap();
        let err = Config::from_builder(empty).unwrap_err();
        assert!(err.to_string().contains("DISCORD_WEBHOOK_URL"));

        let malformed = base().set_override("epic_games_api_url", "not a url").unwrap();
        let err = Config::from_builder(malformed).unwrap_err();
        assert!(err.to_string().contains("EPIC_GAMES_API_URL"));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let builder = base().set_override("poll_interval_secs", 0).unwrap();
        assert!(Config::from_builder(builder).is_err());
    }
}
