//! Aethel API client implementation
//!
//! This module provides a client for the Aethel verification backend.
//! The three main operations deliberately fail in different ways:
//!
//! - [`AethelClient::verify`] never fails; every failure becomes an
//!   `ERROR` outcome.
//! - [`AethelClient::examples`] never fails; every failure becomes an empty
//!   list.
//! - [`AethelClient::compile`] returns every failure to the caller.

mod models;
pub use models::*;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::config::AethelConfig;
use crate::core::{ClientBuilder, RequestExecutor, ServiceClient};
use crate::error::{Result, ServiceError};
use crate::services::common::send_json;
use crate::util::{next_cache_token, truncate_for_log};

/// Service name used in logs and error context
pub const SERVICE_NAME: &str = "aethel";

pub const VERIFY_ENDPOINT: &str = "api/verify";
pub const EXAMPLES_ENDPOINT: &str = "api/examples";
pub const COMPILE_ENDPOINT: &str = "api/compile";
pub const EXECUTE_ENDPOINT: &str = "api/execute";
pub const VAULT_LIST_ENDPOINT: &str = "api/vault/list";
pub const VAULT_ENDPOINT: &str = "api/vault";
pub const HEALTH_ENDPOINT: &str = "health";
pub const ROOT_ENDPOINT: &str = "";

/// Query parameter carrying the cache-busting token
pub const CACHE_BUST_PARAM: &str = "_t";

/// Longest code excerpt written to debug logs
const LOG_PREVIEW_CHARS: usize = 60;

/// Aethel API client
#[derive(Debug, Clone)]
pub struct AethelClient {
    /// HTTP client
    http_client: Client,

    /// Configuration, fixed for the lifetime of the client
    config: AethelConfig,
}

impl AethelClient {
    /// Create a new client for the given configuration
    pub fn new(config: AethelConfig) -> Result<Self> {
        let http_client = ClientBuilder::new().build_http_client()?;
        Ok(Self::with_http_client(http_client, config))
    }

    /// Create a client configured from `AETHEL_API_URL` (or the local default)
    pub fn from_env() -> Result<Self> {
        Self::new(AethelConfig::from_env()?)
    }

    /// Create a new builder for the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn with_http_client(http_client: Client, config: AethelConfig) -> Self {
        Self { http_client, config }
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &AethelConfig {
        &self.config
    }

    /// Submit code for verification.
    ///
    /// Transport failures, non-success statuses and malformed bodies are
    /// all folded into an `ERROR` outcome, so this never fails.
    pub async fn verify(&self, code: &str) -> VerificationOutcome {
        debug!(
            "Verifying {} chars: {}",
            code.chars().count(),
            truncate_for_log(code, LOG_PREVIEW_CHARS)
        );

        let request = CodeRequest::new(code);
        let result: Result<VerificationOutcome> = self.post(VERIFY_ENDPOINT, &request).await;
        match result {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Verification error: {}", e);
                VerificationOutcome::from_failure(&e)
            }
        }
    }

    /// Fetch the sample programs, always bypassing caches.
    ///
    /// Any failure yields an empty list; callers cannot tell it apart from
    /// a backend that simply has no examples.
    pub async fn examples(&self) -> Vec<ExampleEntry> {
        match self.fetch_examples().await {
            Ok(examples) => {
                info!("Fetched examples from backend: {}", examples.len());
                examples
            }
            Err(e) => {
                error!("Failed to fetch examples: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_examples(&self) -> Result<Vec<ExampleEntry>> {
        let url = self.config.endpoint_url(EXAMPLES_ENDPOINT);
        let token = next_cache_token();
        debug!("Sending request to Aethel API: GET {}?{}={}", url, CACHE_BUST_PARAM, token);

        let request = self
            .http_client
            .get(&url)
            .query(&[(CACHE_BUST_PARAM, token.to_string())])
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache");

        let envelope: ExamplesEnvelope = send_json(SERVICE_NAME, EXAMPLES_ENDPOINT, request).await?;
        Ok(envelope.into_examples())
    }

    /// Submit code for compilation.
    ///
    /// Unlike [`verify`](Self::verify), failures are returned to the caller.
    pub async fn compile(&self, code: &str) -> Result<CompileResult> {
        debug!(
            "Compiling {} chars: {}",
            code.chars().count(),
            truncate_for_log(code, LOG_PREVIEW_CHARS)
        );

        self.post(COMPILE_ENDPOINT, &CodeRequest::new(code))
            .await
            .map_err(|e| {
                error!("Compilation error: {}", e);
                e
            })
    }

    /// Run code against the given input data
    pub async fn execute(
        &self,
        code: &str,
        input_data: serde_json::Map<String, serde_json::Value>,
    ) -> Result<ExecuteResponse> {
        let request = ExecuteRequest {
            code: code.to_string(),
            input_data,
        };

        self.post(EXECUTE_ENDPOINT, &request).await
    }

    /// List every function stored in the vault
    pub async fn list_vault(&self) -> Result<VaultListing> {
        self.get(VAULT_LIST_ENDPOINT, None).await
    }

    /// Fetch one vault function by its hash
    pub async fn vault_function(&self, function_hash: &str) -> Result<VaultEntry> {
        if function_hash.trim().is_empty() {
            return Err(ServiceError::validation("Function hash is required"));
        }

        let mut url = Url::parse(&self.config.endpoint_url(VAULT_ENDPOINT))
            .map_err(|e| ServiceError::validation(format!("Invalid URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ServiceError::validation("Base URL cannot carry a path"))?
            .push(function_hash);

        debug!("Sending request to Aethel API: GET {}", url);
        let endpoint = format!("{}/{}", VAULT_ENDPOINT, function_hash);
        send_json(SERVICE_NAME, &endpoint, self.http_client.get(url)).await
    }

    /// Describe the backend (name, version, advertised endpoints)
    pub async fn service_info(&self) -> Result<ServiceInfo> {
        self.get(ROOT_ENDPOINT, None).await
    }
}

#[async_trait]
impl ServiceClient for AethelClient {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn version(&self) -> &str {
        "v1"
    }

    async fn health_check(&self) -> Result<bool> {
        let result: Result<HealthStatus> = self.get(HEALTH_ENDPOINT, None).await;
        match result {
            Ok(health) => Ok(health.is_healthy()),
            Err(e) => {
                warn!("Aethel health check failed: {}", e);
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl RequestExecutor for AethelClient {
    async fn get<R>(&self, endpoint: &str, query_params: Option<Vec<(String, String)>>) -> Result<R>
    where
        R: DeserializeOwned + Send,
    {
        let url = self.config.endpoint_url(endpoint);
        debug!("Sending request to Aethel API: GET {}", url);

        let mut builder = self.http_client.get(&url);
        if let Some(params) = query_params {
            builder = builder.query(&params);
        }

        send_json(SERVICE_NAME, endpoint, builder).await
    }

    async fn post<T, R>(&self, endpoint: &str, body: &T) -> Result<R>
    where
        T: Serialize + Send + Sync,
        R: DeserializeOwned + Send,
    {
        let url = self.config.endpoint_url(endpoint);
        debug!("Sending request to Aethel API: POST {}", url);

        let request_json = serde_json::to_vec(body)
            .map_err(|e| ServiceError::validation(format!("Failed to serialize request: {}", e)))?;

        let builder = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(request_json);

        send_json(SERVICE_NAME, endpoint, builder).await
    }
}
