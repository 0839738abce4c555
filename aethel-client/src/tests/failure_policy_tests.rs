//! Tests for the per-operation failure policies
//!
//! Verify and compile share request mechanics but not their failure path:
//! the same failure yields an `ERROR` outcome from one and an `Err` from
//! the other.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::error::{ErrorContext, FailureKind, ServiceError};
    use crate::services::aethel::{VerificationOutcome, VerificationStatus, UNKNOWN_ERROR_MESSAGE};
    use crate::tests::{create_test_client, create_unreachable_client};

    const CODE: &str = "intent burn(account: Account, amount: Balance) {}";

    #[tokio::test]
    async fn test_same_transport_failure_splits_by_operation() {
        let client = create_unreachable_client();

        let outcome = client.verify(CODE).await;
        let compiled = client.compile(CODE).await;

        assert_eq!(outcome.status, VerificationStatus::Error);
        let err = compiled.expect_err("compile must surface transport failures");
        assert_eq!(err.kind(), FailureKind::Transport);
        assert!(outcome.message.starts_with("Connection error"));
        assert!(err.description().starts_with("Connection error"));
    }

    #[tokio::test]
    async fn test_same_status_failure_splits_by_operation() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);

        let outcome = client.verify(CODE).await;
        let err = client.compile(CODE).await.unwrap_err();

        assert_eq!(outcome.status, VerificationStatus::Error);
        assert_eq!(outcome.message, "HTTP error! status: 503");
        assert_eq!(err.kind(), FailureKind::Protocol);
        assert_eq!(err.description(), outcome.message);
    }

    #[tokio::test]
    async fn test_same_payload_failure_splits_by_operation() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);

        let outcome = client.verify(CODE).await;
        let err = client.compile(CODE).await.unwrap_err();

        assert_eq!(outcome.status, VerificationStatus::Error);
        assert_eq!(err.kind(), FailureKind::Payload);
    }

    #[tokio::test]
    async fn test_examples_degrade_where_compile_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "down"})))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "down"})))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);

        assert!(client.examples().await.is_empty());
        assert!(client.compile(CODE).await.is_err());
    }

    // verify reports failures through VerificationOutcome::from_failure
    #[test]
    fn test_failure_without_description_uses_fallback_message() {
        for err in [
            ServiceError::network(""),
            ServiceError::status("  ").with_context(ErrorContext::for_service("aethel").status_code(500)),
            ServiceError::parsing("").with_context(ErrorContext::for_service("aethel").endpoint("api/verify")),
        ] {
            assert!(err.description().trim().is_empty());

            let outcome = VerificationOutcome::from_failure(&err);
            assert_eq!(outcome.status, VerificationStatus::Error);
            assert_eq!(outcome.message, UNKNOWN_ERROR_MESSAGE);
            assert_eq!(outcome.message, "Unknown error occurred");
        }
    }

    #[test]
    fn test_failure_description_is_reported_verbatim() {
        let err = ServiceError::status("HTTP error! status: 502")
            .with_context(ErrorContext::for_service("aethel").status_code(502));
        let outcome = VerificationOutcome::from_failure(&err);

        assert_eq!(outcome.message, "HTTP error! status: 502");
        assert!(outcome.proof.is_none());
    }
}
