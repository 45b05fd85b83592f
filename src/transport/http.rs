use crate::config::ClientConfig;
use crate::operation::{Endpoint, Method};
use crate::response::RawResponse;
use crate::transport::TransportError;
use crate::{Error, Result};
use reqwest::multipart::Form;
use reqwest::Proxy;
use std::env;
use std::time::Duration;

/// Environment variable naming an HTTP(S) proxy for all requests.
pub const PROXY_ENV: &str = "DOCFORGE_PROXY_URL";

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Ok(proxy_url) = env::var(PROXY_ENV) {
            match Proxy::all(&proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => tracing::warn!("ignoring invalid {}: {}", PROXY_ENV, e),
            }
        }

        let client = builder.build().map_err(|e| {
            Error::configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        crate::config::join_endpoint(&self.base_url, endpoint.path())
    }

    /// Send one request and read the whole reply.
    ///
    /// Only connection-level failures are errors; any HTTP status comes back
    /// as a [`RawResponse`]. A body that cannot be read on a failed status is
    /// treated as empty so the caller falls back to its default message.
    pub async fn execute(
        &self,
        endpoint: Endpoint,
        form: Option<Form>,
        query: &[(&str, &str)],
    ) -> Result<RawResponse> {
        let url = self.endpoint_url(endpoint);
        let mut request = match endpoint.method() {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(form) = form {
            request = request.multipart(form);
        }

        tracing::debug!(url = %url, "sending {:?} request", endpoint.method());

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) if !(200..300).contains(&status) => {
                tracing::debug!("failed to read error body from {}: {}", url, e);
                bytes::Bytes::new()
            }
            Err(e) => return Err(Error::Transport(TransportError::Http(e))),
        };

        tracing::debug!(url = %url, status, size = body.len(), "received response");

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
