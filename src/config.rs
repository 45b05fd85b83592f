//! Client configuration: base service address and HTTP knobs.
//!
//! The base address is an explicit value handed to the client at construction
//! time. [`ClientConfig::from_env`] and [`ClientConfig::from_yaml_file`] are
//! convenience loaders; neither is consulted implicitly by the client.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable carrying the backend base address.
pub const BACKEND_URL_ENV: &str = "DOCFORGE_BACKEND_URL";

/// Environment variable carrying an optional request timeout in seconds.
pub const TIMEOUT_ENV: &str = "DOCFORGE_HTTP_TIMEOUT_SECS";

/// Base address used when no backend is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root URL of the conversion service. Endpoint paths are appended to it.
    pub base_url: String,

    /// Optional per-request timeout. `None` leaves requests unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("docforge-client/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Read the configuration from the process environment.
    ///
    /// A missing or blank [`BACKEND_URL_ENV`] is not an error: the
    /// [`DEFAULT_BACKEND_URL`] is used and a warning is logged.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = match lookup(BACKEND_URL_ENV).filter(|v| !v.trim().is_empty()) {
            Some(url) => url.trim().to_string(),
            None => {
                tracing::warn!(
                    "{} not set, using default backend: {}",
                    BACKEND_URL_ENV,
                    DEFAULT_BACKEND_URL
                );
                DEFAULT_BACKEND_URL.to_string()
            }
        };

        let timeout_secs = lookup(TIMEOUT_ENV)
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0);

        Self {
            base_url,
            timeout_secs,
            user_agent: default_user_agent(),
        }
    }

    /// Load the configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw).map_err(|e| match e {
            Error::Configuration { message, context } => Error::Configuration {
                message,
                context: context.with_details(path.display().to_string()),
            },
            other => other,
        })
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(raw).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid config file: {}", e),
                ErrorContext::new().with_source("config_loader"),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the base address is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(self.base_url.trim()).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL '{}': {}", self.base_url, e),
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_source("config_validator"),
            )
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::configuration_with_context(
                format!("Unsupported base URL scheme: {}", other),
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_source("config_validator"),
            )),
        }
    }

    /// Join the base address and an endpoint path with exactly one slash.
    pub fn endpoint_url(&self, path: &str) -> String {
        join_endpoint(&self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

/// Join a base address and a path so that exactly one `/` separates them.
pub fn join_endpoint(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
