//! Configuration management for the Aethel client
//!
//! This module provides utilities for loading and validating the client
//! configuration, with support for environment variables. Configuration is
//! resolved once and injected into the client at construction time.

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ServiceError};

/// Base URL used when no override is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration key holding the backend base URL
pub const BASE_URL_KEY: &str = "api_url";

/// Source of string configuration values
pub trait ConfigProvider: Send + Sync {
    /// Look up a value, failing when the key is not set
    fn get_string(&self, key: &str) -> Result<String>;

    /// Look up a value, falling back to `default` when the key is not set
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }
}

/// Reads keys from environment variables, `api_url` becoming `<PREFIX>_API_URL`
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    prefix: Option<String>,
}

impl EnvConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Environment variable name for a configuration key
    pub(crate) fn format_key(&self, key: &str) -> String {
        let key = key.to_uppercase().replace(|c: char| !c.is_ascii_alphanumeric(), "_");

        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key),
            None => key,
        }
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let env_key = self.format_key(key);

        env::var(&env_key).map_err(|e| match e {
            env::VarError::NotPresent => {
                ServiceError::configuration(format!("Environment variable not set: {}", env_key))
            }
            env::VarError::NotUnicode(_) => ServiceError::configuration(format!(
                "Environment variable is not valid unicode: {}",
                env_key
            )),
        })
    }
}

/// Fixed in-memory values, for tests and embedded setups
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ServiceError::configuration(format!("Configuration key not found: {}", key)))
    }
}

/// Global default configuration provider (reads `AETHEL_*` variables)
pub static DEFAULT_PROVIDER: Lazy<EnvConfigProvider> =
    Lazy::new(|| EnvConfigProvider::new().with_prefix("AETHEL"));

/// Configuration for the Aethel API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AethelConfig {
    /// Backend base URL, without trailing slash
    pub base_url: String,
}

impl Default for AethelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl AethelConfig {
    /// Create a configuration for an explicit base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let config = Self {
            base_url: normalize_base_url(&base_url.into()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a config provider
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        Self::new(provider.get_string_or(BASE_URL_KEY, DEFAULT_BASE_URL))
    }

    /// Load configuration from `AETHEL_API_URL`, falling back to the local default
    pub fn from_env() -> Result<Self> {
        Self::from_provider(&*DEFAULT_PROVIDER)
    }

    /// Validate this configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ServiceError::configuration("Aethel base URL is required"));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| ServiceError::configuration(format!("Invalid base URL {}: {}", self.base_url, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ServiceError::configuration(format!(
                "Unsupported base URL scheme: {}",
                other
            ))),
        }
    }

    /// Join the base URL with a resource path
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
