//! Client builder
//!
//! Collects transport settings and the base URL, then produces an
//! [`AethelClient`] whose configuration cannot change afterwards.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client as ReqwestClient;

use crate::config::{AethelConfig, DEFAULT_PROVIDER};
use crate::error::{Result, ServiceError};
use crate::services::aethel::AethelClient;
use crate::services::UserAgent;

/// Builder for the Aethel client and its HTTP transport
pub struct ClientBuilder {
    /// Explicit base URL; `AETHEL_API_URL` or the local default otherwise
    base_url: Option<String>,
    /// Extra headers sent with every request, validated at build time
    headers: Vec<(String, String)>,
    /// None leaves the transport without a deadline
    timeout: Option<Duration>,
    user_agent: String,
    gzip: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            headers: Vec::new(),
            timeout: None,
            user_agent: UserAgent::default().to_string(),
            gzip: true,
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Send `name: value` with every request
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Give up on requests that take longer than `timeout`
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Accept gzip-compressed responses
    pub fn compression(mut self, enabled: bool) -> Self {
        self.gzip = enabled;
        self
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        self.headers
            .iter()
            .map(|(name, value)| {
                let name = HeaderName::try_from(name.as_str())
                    .map_err(|e| ServiceError::configuration(format!("Invalid header name {}: {}", name, e)))?;
                let value = HeaderValue::try_from(value.as_str())
                    .map_err(|e| ServiceError::configuration(format!("Invalid header value for {}: {}", name, e)))?;
                Ok((name, value))
            })
            .collect()
    }

    /// Build the reqwest client these settings describe
    pub fn build_http_client(&self) -> Result<ReqwestClient> {
        let mut builder = ReqwestClient::builder()
            .user_agent(self.user_agent.as_str())
            .gzip(self.gzip)
            .default_headers(self.default_headers()?);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| ServiceError::configuration(format!("Failed to build HTTP client: {}", e)))
    }

    /// Resolve the configuration this builder describes
    pub fn build_config(&self) -> Result<AethelConfig> {
        match self.base_url {
            Some(ref url) => AethelConfig::new(url.as_str()),
            None => AethelConfig::from_provider(&*DEFAULT_PROVIDER),
        }
    }

    pub fn build(self) -> Result<AethelClient> {
        let config = self.build_config()?;
        let http_client = self.build_http_client()?;

        Ok(AethelClient::with_http_client(http_client, config))
    }
}
