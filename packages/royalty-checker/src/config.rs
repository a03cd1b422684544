//! Royalty checker configuration.

use crate::Error;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;

/// Environment variable holding the indexer API credential.
pub const API_KEY_VAR: &str = "API_KEY";

/// Configuration for the royalty checker.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::api_base_url")]
    pub api_base_url: String,

    /// Indexer credential. Only required once a check actually runs.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: defaults::api_base_url(),
            api_key: None,
        }
    }
}

impl Config {
    /// Load from `royalty-checker.{toml,yaml,json}` (optional), `ROYALTY_*`
    /// env vars, `.env`, and `API_KEY`.
    pub fn load() -> Result<Self, Error> {
        dotenvy::dotenv().ok();
        let builder = config::Config::builder()
            .add_source(config::File::with_name("royalty-checker").required(false))
            .add_source(config::Environment::with_prefix("ROYALTY"));
        Self::from_builder(builder, std::env::var(API_KEY_VAR).ok())
    }

    fn from_builder(
        builder: ConfigBuilder<DefaultState>,
        api_key: Option<String>,
    ) -> Result<Self, Error> {
        let api_key = api_key.filter(|k| !k.is_empty());
        let config: Config = builder
            .set_override_option("api_key", api_key)?
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// The API credential, or a fatal config error when absent or empty.
    pub fn require_api_key(&self) -> Result<&str, Error> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(Error::Config(format!(
                "failed to get environment variable: {API_KEY_VAR}"
            ))),
        }
    }
}

mod defaults {
    pub fn api_base_url() -> String {
        "https://api.helius.xyz".into()
    }
}
