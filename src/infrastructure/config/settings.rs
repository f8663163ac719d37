//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Values are
//! read from a TOML file, then overridden from the environment. Secrets
//! (`SUPABASE_KEY`, `TELEGRAM_BOT_TOKEN`) are only ever read from the
//! environment.
//!
//! # Example
//!
//! ```no_run
//! use signal_relay::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::http::HttpConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::store::StoreConfig;
use super::telegram::TelegramAppConfig;
use super::webhook::WebhookConfig;
use crate::error::{ConfigError, Result};

pub const ENV_STORE_URL: &str = "SUPABASE_URL";
pub const ENV_STORE_KEY: &str = "SUPABASE_KEY";
pub const ENV_WEBHOOK_URL: &str = "N8N_WEBHOOK_URL";
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_BIND: &str = "SIGNAL_RELAY_BIND";

/// Main application configuration.
///
/// Built once at startup and shared read-only with every component.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Inbound HTTP listener.
    pub server: ServerConfig,

    /// Preference store connection.
    pub store: StoreConfig,

    /// Downstream automation webhook.
    pub webhook: WebhookConfig,

    /// Preference-collection bot.
    pub telegram: TelegramAppConfig,

    /// Outbound HTTP client timeouts.
    pub http: HttpConfig,

    /// Logging and tracing configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content, applying process environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with(content, |name| std::env::var(name).ok())
    }

    /// Parse configuration from TOML content using `lookup` for environment values.
    ///
    /// Empty environment values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(|name| lookup(name).filter(|v| !v.trim().is_empty()));
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// Load configuration from a TOML file using `lookup` for environment values.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_with<P, F>(path: P, lookup: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml_with(&content, lookup)
    }

    /// Build configuration from defaults and the environment alone.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is missing or invalid.
    pub fn from_env() -> Result<Self> {
        Self::parse_toml("")
    }

    /// Initialize the tracing subscriber from the logging section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Full collection endpoint, `{url}/rest/v1/{table}`.
    #[must_use]
    pub fn store_endpoint(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.store.url.trim_end_matches('/'),
            self.store.table
        )
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_STORE_URL) {
            self.store.url = url;
        }
        if let Some(url) = lookup(ENV_WEBHOOK_URL) {
            self.webhook.url = url;
        }
        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = bind;
        }
        self.store.api_key = lookup(ENV_STORE_KEY).unwrap_or_default();
        self.telegram.bot_token = lookup(ENV_BOT_TOKEN).unwrap_or_default();
    }

    /// Check that all required values are present and well-formed.
    fn validate(&self) -> Result<()> {
        require(&self.store.url, "store.url")?;
        require(&self.store.api_key, ENV_STORE_KEY)?;
        require(&self.webhook.url, "webhook.url")?;
        if self.telegram.enabled {
            require(&self.telegram.bot_token, ENV_BOT_TOKEN)?;
        }

        parse_http_url(&self.store.url, "store.url")?;
        parse_http_url(&self.webhook.url, "webhook.url")?;

        if self.store.table.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "store.table",
            }
            .into());
        }
        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "server.bind",
                reason: format!("`{}` is not a socket address", self.server.bind),
            }
            .into());
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.http.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.connect_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn require(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    Ok(())
}

fn parse_http_url(value: &str, field: &'static str) -> Result<Url> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("unsupported scheme `{}`", url.scheme()),
        }
        .into());
    }
    Ok(url)
}
