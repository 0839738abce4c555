//! Aethel API data models
//!
//! This module contains type definitions for Aethel requests and responses.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ServiceError;

/// Message used when a failure carries no description of its own
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Body of `/api/verify` and `/api/compile`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeRequest {
    /// Source code to submit
    pub code: String,
}

impl CodeRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Verdict tag of a verification outcome.
///
/// Tags other than `PROVED` and `FAILED` (the backend answers syntax errors
/// with `PARSE_ERROR`) decode as `Error`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Proved,
    Failed,
    #[serde(other)]
    Error,
}

impl VerificationStatus {
    /// Wire representation of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Proved => "PROVED",
            VerificationStatus::Failed => "FAILED",
            VerificationStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a verification call.
///
/// The status is always one of the three tags. `proof` is backend-defined
/// and kept as an untyped document; `audit_trail` preserves the order the
/// backend reported the proof steps in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationOutcome {
    pub status: VerificationStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_trail: Option<Vec<String>>,
}

impl VerificationOutcome {
    /// Build an `ERROR` outcome from a failure description.
    ///
    /// Blank descriptions are replaced by [`UNKNOWN_ERROR_MESSAGE`].
    pub fn error(description: impl Into<String>) -> Self {
        let description = description.into();
        let message = if description.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            description
        };

        Self {
            status: VerificationStatus::Error,
            message,
            proof: None,
            audit_trail: None,
        }
    }

    /// Build the `ERROR` outcome reported for a failed verification call
    pub fn from_failure(err: &ServiceError) -> Self {
        Self::error(err.description())
    }

    pub fn is_proved(&self) -> bool {
        self.status == VerificationStatus::Proved
    }

    pub fn is_error(&self) -> bool {
        self.status == VerificationStatus::Error
    }

    /// Audit trail steps, empty when the backend sent none
    pub fn audit_steps(&self) -> &[String] {
        self.audit_trail.as_deref().unwrap_or(&[])
    }
}

/// A sample program offered by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExampleEntry {
    pub name: String,
    pub code: String,
    pub description: String,
}

/// Envelope around the examples list.
///
/// Only `examples` is read; `success` and `count` are ignored whatever
/// their shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExamplesEnvelope {
    #[serde(default)]
    pub examples: Option<Vec<ExampleEntry>>,
}

impl ExamplesEnvelope {
    /// Unwrap the list, treating an absent or null field as empty
    pub fn into_examples(self) -> Vec<ExampleEntry> {
        self.examples.unwrap_or_default()
    }
}

/// Opaque compile payload; its shape is defined by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CompileResult(pub Value);

impl CompileResult {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Look up a top-level field, if the payload is an object
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Body of `/api/execute`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecuteRequest {
    pub code: String,
    pub input_data: serde_json::Map<String, Value>,
}

/// Response of `/api/execute`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecuteResponse {
    pub success: bool,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `/api/vault/list`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaultListing {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub functions: Vec<Value>,
    #[serde(default)]
    pub count: u64,
}

/// Response of `/api/vault/{hash}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaultEntry {
    #[serde(default)]
    pub success: bool,
    pub function: Value,
}

/// Response of `/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub status: String,
    #[serde(default)]
    pub endpoints: HashMap<String, String>,
}

/// Response of `/health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
