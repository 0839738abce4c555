//! Error handling for the Aethel client
//!
//! Every failure an Aethel call can hit is a [`ServiceError`]. The variant
//! says where the call broke down; [`FailureKind`] groups the variants the
//! way callers usually branch on them. Errors raised while talking to the
//! backend are wrapped with an [`ErrorContext`] naming the endpoint.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod mapping;

/// Result type for Aethel client operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors produced by the Aethel client
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The backend could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The transport gave up waiting for the backend
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// The backend answered outside the 2xx range
    #[error("Status error: {0}")]
    Status(String),

    /// The backend answered with a body that does not decode
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// The request was rejected before it was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The base URL or transport settings are unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The HTTP stack failed in a way none of the above covers
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{inner}")]
    WithContext {
        inner: Box<ServiceError>,
        context: ErrorContext,
    },
}

/// Where in a request/response cycle a failure originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No response was obtained at all
    Transport,
    /// A response was obtained with a non-success status
    Protocol,
    /// A response was obtained but its body was malformed
    Payload,
    /// The request never left the client (bad config, bad input)
    Client,
}

impl ServiceError {
    pub fn network(message: impl Into<String>) -> Self {
        ServiceError::Network(message.into())
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        ServiceError::Timeout(message.into())
    }

    pub fn status(message: impl Into<String>) -> Self {
        ServiceError::Status(message.into())
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        ServiceError::Parsing(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ServiceError::Configuration(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ServiceError::Internal(message.into())
    }

    /// Wrap this error with diagnostic context
    pub fn with_context(self, context: ErrorContext) -> Self {
        ServiceError::WithContext {
            inner: Box::new(self),
            context,
        }
    }

    /// The message without its category prefix.
    ///
    /// This is the text a failed verification reports to the user.
    pub fn description(&self) -> &str {
        match self {
            ServiceError::Network(msg)
            | ServiceError::Timeout(msg)
            | ServiceError::Status(msg)
            | ServiceError::Parsing(msg)
            | ServiceError::Validation(msg)
            | ServiceError::Configuration(msg)
            | ServiceError::Internal(msg) => msg.as_str(),
            ServiceError::WithContext { inner, .. } => inner.description(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ServiceError::Network(_) | ServiceError::Timeout(_) => FailureKind::Transport,
            ServiceError::Status(_) => FailureKind::Protocol,
            ServiceError::Parsing(_) => FailureKind::Payload,
            ServiceError::Validation(_)
            | ServiceError::Configuration(_)
            | ServiceError::Internal(_) => FailureKind::Client,
            ServiceError::WithContext { inner, .. } => inner.kind(),
        }
    }

    /// The outermost context, if any
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            ServiceError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    pub fn service_name(&self) -> Option<&str> {
        self.context().map(|context| context.service.as_str())
    }

    /// HTTP status recorded anywhere in the context chain
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ServiceError::WithContext { inner, context } => {
                context.status_code.or_else(|| inner.status_code())
            }
            _ => None,
        }
    }

    /// Endpoint recorded anywhere in the context chain
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ServiceError::WithContext { inner, context } => {
                context.endpoint.as_deref().or_else(|| inner.endpoint())
            }
            _ => None,
        }
    }
}

/// Diagnostic detail attached to an error
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub service: String,
    pub timestamp: DateTime<Utc>,
    pub status_code: Option<u16>,
    pub endpoint: Option<String>,
    /// Free-form detail such as the backend's `detail` field
    pub data: HashMap<String, String>,
}

impl ErrorContext {
    pub fn for_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            timestamp: Utc::now(),
            status_code: None,
            endpoint: None,
            data: HashMap::new(),
        }
    }

    pub fn status_code(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.data.insert(key.into(), value.to_string());
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        let mut context = ErrorContext::for_service("http_client");
        if let Some(status) = err.status() {
            context = context.status_code(status.as_u16());
        }

        classify_transport_error(&err).with_context(context)
    }
}

fn classify_transport_error(err: &reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::timeout(format!("Request timed out: {}", err));
    }
    if err.is_connect() {
        return ServiceError::network(format!("Connection error: {}", err));
    }
    if err.is_redirect() {
        return ServiceError::network(format!("Too many redirects: {}", err));
    }
    if err.is_decode() {
        return ServiceError::parsing(format!("Response decode error: {}", err));
    }
    if err.is_builder() {
        return ServiceError::validation(format!("Invalid request: {}", err));
    }
    if err.is_request() || err.is_body() {
        return ServiceError::network(format!("Request failed: {}", err));
    }

    ServiceError::internal(format!("HTTP client error: {}", err))
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::parsing(format!("JSON error: {}", err))
            .with_context(ErrorContext::for_service("json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_strips_category() {
        let err = ServiceError::network("Connection refused");
        assert_eq!(err.to_string(), "Network error: Connection refused");
        assert_eq!(err.description(), "Connection refused");

        let wrapped = err.with_context(ErrorContext::for_service("aethel"));
        assert_eq!(wrapped.description(), "Connection refused");
        assert_eq!(wrapped.to_string(), "Network error: Connection refused");
    }

    #[test]
    fn test_nested_context_lookup() {
        let err = ServiceError::status("HTTP error! status: 502")
            .with_context(ErrorContext::for_service("aethel").status_code(502))
            .with_context(ErrorContext::for_service("aethel").endpoint("api/compile"));

        assert_eq!(err.status_code(), Some(502));
        assert_eq!(err.endpoint(), Some("api/compile"));
        assert_eq!(err.kind(), FailureKind::Protocol);
    }
}
