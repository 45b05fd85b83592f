use crate::client::core::TransferClient;
use crate::config::ClientConfig;
use crate::downloads::DownloadStore;
use crate::transport::HttpTransport;
use crate::Result;
use std::sync::Arc;

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable.
pub struct TransferClientBuilder {
    config: Option<ClientConfig>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    downloads: Option<DownloadStore>,
}

impl TransferClientBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            base_url: None,
            timeout_secs: None,
            user_agent: None,
            downloads: None,
        }
    }

    /// Start from a complete configuration. Later setters override its fields.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Share an existing download store instead of creating a new one.
    pub fn download_store(mut self, store: DownloadStore) -> Self {
        self.downloads = Some(store);
        self
    }

    /// Build the client.
    ///
    /// With neither a config nor a base URL, the configuration is read from
    /// the environment (see [`ClientConfig::from_env`]).
    pub fn build(self) -> Result<TransferClient> {
        let mut config = match (self.config, self.base_url.as_ref()) {
            (Some(config), _) => config,
            (None, Some(url)) => ClientConfig::new(url.clone()),
            (None, None) => ClientConfig::from_env(),
        };
        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = Some(secs);
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }
        config.validate()?;

        let transport = Arc::new(HttpTransport::new(&config)?);
        tracing::debug!(base_url = %config.base_url, "transfer client ready");

        Ok(TransferClient {
            transport,
            downloads: self.downloads.unwrap_or_default(),
        })
    }
}

impl Default for TransferClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
