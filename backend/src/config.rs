use anyhow::{Context, Result};
use calendar_fetcher::FetcherConfig;
use config::{builder::DefaultState, Config, ConfigBuilder, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Postgres connection string; events are kept in memory when unset
    pub database_url: Option<String>,
    pub port: u16,
    pub base_url: String,
    pub api_key: String,
    pub seed_on_startup: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_builder(Config::builder().add_source(Environment::default()))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .set_default("port", 8080)?
            .set_default("seed_on_startup", true)?
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("BASE_URL and API_KEY must be set")
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig::new(&self.base_url, &self.api_key)
    }
}
