//! Core abstractions for the Aethel client
//!
//! This module provides the trait interfaces the client implements:
//!
//! - `ServiceClient`: identity and liveness of the remote service
//! - `RequestExecutor`: typed JSON requests against the service
//! - `ClientBuilder`: builder pattern for creating clients

pub mod builder;
pub use builder::ClientBuilder;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

/// Base trait for service clients
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// The client name/identifier
    fn name(&self) -> &str;

    /// The base URL for the service
    fn base_url(&self) -> &str;

    /// Service version
    fn version(&self) -> &str;

    /// Health check for the service
    async fn health_check(&self) -> Result<bool>;
}

/// Trait responsible for executing HTTP requests with strong typing.
///
/// Every method succeeds only when the transport completed, the status was
/// in the success range and the body decoded as `R`.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute a GET request
    async fn get<R>(&self, endpoint: &str, query_params: Option<Vec<(String, String)>>) -> Result<R>
    where
        R: DeserializeOwned + Send;

    /// Execute a POST request with a JSON body
    async fn post<T, R>(&self, endpoint: &str, body: &T) -> Result<R>
    where
        T: Serialize + Send + Sync,
        R: DeserializeOwned + Send;
}
