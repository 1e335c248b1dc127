use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Settings shared by every service binary.
///
/// Sources, later ones winning: `.env`, a plain `PORT` variable, an optional
/// `configuration.{toml,yaml,json}` file in the working directory, then
/// `APP__*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector for span export. Spans are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_sources(std::env::var("PORT").ok())
    }

    /// `port_fallback` (the conventional `PORT` variable) sits below the file
    /// and `APP__PORT`.
    fn from_sources(port_fallback: Option<String>) -> Result<Self, AppError> {
        let config = Cfg::builder()
            .set_default("port", port_fallback.unwrap_or_else(|| default_port().to_string()))?
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
