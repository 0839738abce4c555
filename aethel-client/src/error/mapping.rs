//! Error mapping for non-success HTTP responses
//!
//! The Aethel backend does not give status codes any finer meaning than
//! "it failed", so every non-success response maps to the same
//! `ServiceError::Status`. Whatever detail the body carries is kept in the
//! error context for diagnostics.

use reqwest::StatusCode;
use serde_json::Value;

use super::{ErrorContext, ServiceError};

/// Longest body excerpt kept in error context
const MAX_BODY_EXCERPT: usize = 200;

/// Map a non-success HTTP response to a ServiceError
pub fn map_status_error(
    status: StatusCode,
    body: &str,
    context: &mut ErrorContext,
) -> ServiceError {
    context.status_code = Some(status.as_u16());

    if let Some(detail) = extract_detail(body) {
        context.add("detail", detail);
    } else if !body.is_empty() {
        context.add("body", crate::util::truncate_for_log(body, MAX_BODY_EXCERPT));
    }

    ServiceError::status(format!("HTTP error! status: {}", status.as_u16()))
}

/// Pull a human-readable message out of a JSON error body.
///
/// FastAPI reports `HTTPException`s as `{"detail": "..."}`; `message` and
/// `error` are accepted as fallbacks.
pub fn extract_detail(body: &str) -> Option<String> {
    let json = serde_json::from_str::<Value>(body).ok()?;

    ["detail", "message", "error"]
        .iter()
        .find_map(|key| json.get(*key))
        .map(|value| match value.as_str() {
            Some(text) => text.to_string(),
            None => value.to_string(),
        })
}

/// Helper function to classify HTTP status codes for logging
pub fn classify_status(status: StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "informational",
        200..=299 => "success",
        300..=399 => "redirect",
        400..=499 => "client",
        500..=599 => "server",
        _ => "unknown",
    }
}
