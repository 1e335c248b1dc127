use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_LANDING_AI_BASE_URL: &str = "https://api.va.landing.ai/v1/ade";
pub const DEFAULT_PARSE_MODEL: &str = "dpt-2-latest";
pub const DEFAULT_EXTRACT_MODEL: &str = "extract-latest";

/// Default request body limit (50MB), large enough for scanned PDFs.
const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub landing_ai: LandingAiConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone)]
pub struct LandingAiConfig {
    /// Bearer token attached to every upstream call. Empty means unconfigured.
    pub api_key: Secret<String>,
    /// Base of the ADE API; `/parse` and `/extract` are appended.
    pub base_url: String,
    pub parse_model: String,
    pub extract_model: String,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub max_body_bytes: usize,
    /// Origins allowed by CORS. Empty allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl LandingAiConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: base_url.into(),
            parse_model: DEFAULT_PARSE_MODEL.to_string(),
            extract_model: DEFAULT_EXTRACT_MODEL.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }

    pub fn parse_url(&self) -> String {
        format!("{}/parse", self.base_url.trim_end_matches('/'))
    }

    pub fn extract_url(&self) -> String {
        format!("{}/extract", self.base_url.trim_end_matches('/'))
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        // Also loads .env, so the plain variables below see its values.
        // Only the API key is mandatory in production.
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let max_body_bytes = get_env(
            "RELAY_MAX_BODY_BYTES",
            Some(&DEFAULT_MAX_BODY_BYTES.to_string()),
            false,
        )?
        .parse()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("RELAY_MAX_BODY_BYTES is invalid: {}", e))
        })?;

        Ok(RelayConfig {
            common: common_config,
            landing_ai: LandingAiConfig {
                api_key: Secret::new(get_env("LANDING_AI_API_KEY", Some(""), is_prod)?),
                base_url: get_env(
                    "LANDING_AI_BASE_URL",
                    Some(DEFAULT_LANDING_AI_BASE_URL),
                    false,
                )?,
                parse_model: get_env("LANDING_AI_PARSE_MODEL", Some(DEFAULT_PARSE_MODEL), false)?,
                extract_model: get_env(
                    "LANDING_AI_EXTRACT_MODEL",
                    Some(DEFAULT_EXTRACT_MODEL),
                    false,
                )?,
            },
            http: HttpConfig {
                max_body_bytes,
                cors_allowed_origins: parse_origins(
                    &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
                ),
            },
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
