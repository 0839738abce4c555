//! # Aethel Client
//!
//! A typed client for the Aethel verification and compilation backend.
//!
//! This crate provides:
//!
//! - `AethelClient` with the verify, examples and compile operations
//! - A normalized error system for transport, status and payload failures
//! - Configuration loading with an injected, immutable base URL
//!
//! ## Failure policy
//!
//! Each operation owns its own failure policy:
//!
//! - `verify` always returns a `VerificationOutcome`; failures come back as
//!   an `ERROR`-tagged outcome.
//! - `examples` always returns a list; failures come back empty.
//! - `compile` (and the vault/execute helpers) return `Err(ServiceError)`.

// Re-export core modules
pub mod core;
pub use self::core::{ServiceClient, RequestExecutor, ClientBuilder};

// Re-export service-specific modules
pub mod services;
pub use services::aethel::{
    AethelClient, CompileResult, ExampleEntry, VerificationOutcome, VerificationStatus,
};

// Re-export error handling
pub mod error;
pub use error::{ServiceError, ErrorContext, FailureKind, Result};

// Re-export configuration management
pub mod config;
pub use config::{AethelConfig, ConfigProvider};

// Utility module for common functionality
mod util;

#[cfg(test)]
mod tests;

/// Create a new default client builder
pub fn client() -> ClientBuilder {
    ClientBuilder::new()
}

/// Create a client configured from the environment
pub fn aethel_client() -> Result<AethelClient> {
    AethelClient::from_env()
}
