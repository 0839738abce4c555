//! Common utilities for service clients
//!
//! This module provides the request mechanics shared by every operation:
//! send, check the status range, decode the JSON body.

use std::fmt;
use std::time::Instant;

use log::debug;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::{mapping, ErrorContext, Result, ServiceError};

/// UserAgent structure for identifying the client to the backend
#[derive(Debug, Clone)]
pub struct UserAgent {
    /// Application name
    pub app_name: String,

    /// Version string
    pub version: String,

    /// Optional extra info
    pub extra: Option<String>,
}

impl Default for UserAgent {
    fn default() -> Self {
        Self {
            app_name: "Aethel-Studio".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            extra: Some("aethel-client".to_string()),
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.app_name, self.version)?;

        if let Some(ref extra) = self.extra {
            write!(f, " ({})", extra)?;
        }

        Ok(())
    }
}

/// Create error context for HTTP requests
pub fn create_error_context(service_name: &str, endpoint: &str) -> ErrorContext {
    ErrorContext::for_service(service_name).endpoint(endpoint)
}

/// Send a prepared request and decode its JSON body.
///
/// Transport failures, non-success statuses and undecodable bodies all come
/// back as `Err`, tagged with the service and endpoint.
pub async fn send_json<R>(service_name: &str, endpoint: &str, request: RequestBuilder) -> Result<R>
where
    R: DeserializeOwned,
{
    let start_time = Instant::now();

    let response = request
        .send()
        .await
        .map_err(|e| ServiceError::from(e).with_context(create_error_context(service_name, endpoint)))?;

    let status = response.status();
    debug!(
        "{} {} responded {} ({}) in {:.2}ms",
        service_name,
        endpoint,
        status.as_u16(),
        mapping::classify_status(status),
        start_time.elapsed().as_secs_f64() * 1000.0,
    );

    if !status.is_success() {
        return Err(parse_error_response(service_name, endpoint, response).await);
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| ServiceError::from(e).with_context(create_error_context(service_name, endpoint)))?;

    serde_json::from_slice::<R>(&body).map_err(|e| {
        ServiceError::parsing(format!("Failed to parse response: {}", e))
            .with_context(create_error_context(service_name, endpoint).status_code(status.as_u16()))
    })
}

/// Parse error response from HTTP response
pub async fn parse_error_response(
    service_name: &str,
    endpoint: &str,
    response: reqwest::Response,
) -> ServiceError {
    let status = response.status();
    let mut context = create_error_context(service_name, endpoint);

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            context.add("body_error", e);
            String::new()
        }
    };

    mapping::map_status_error(status, &body, &mut context).with_context(context)
}
