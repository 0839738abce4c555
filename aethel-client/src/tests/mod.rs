//! Unit tests for the Aethel client
//!
//! This module contains tests for the client operations and its support code.

pub mod compile_mock_tests;
pub mod failure_policy_tests;

use wiremock::MockServer;

use crate::services::aethel::AethelClient;

/// Creates a client configured to use the mock server
pub(crate) fn create_test_client(mock_server: &MockServer) -> AethelClient {
    AethelClient::builder()
        .base_url(mock_server.uri())
        .build()
        .expect("Failed to build Aethel client")
}

/// Loopback address on the reserved tcpmux port, where connections are refused
const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1";

/// Creates a client whose connections are refused
pub(crate) fn create_unreachable_client() -> AethelClient {
    AethelClient::builder()
        .base_url(UNREACHABLE_BASE_URL)
        .build()
        .expect("Failed to build Aethel client")
}
