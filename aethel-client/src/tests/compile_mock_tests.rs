//! Mock tests for the compile operation
//!
//! Compile hands successful payloads back untouched and returns every
//! failure to the caller.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::error::{FailureKind, ServiceError};
    use crate::tests::{create_test_client, create_unreachable_client};

    #[tokio::test]
    async fn test_success_body_is_returned_unmodified() {
        let mock_server = MockServer::start().await;

        let payload = json!({
            "success": true,
            "generated_code": "// Generated Rust code would appear here\n",
            "vault_hash": "9f2c1e",
            "nested": {"list": [1, "two", null], "flag": false}
        });

        Mock::given(method("POST"))
            .and(path("/api/compile"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"code": "intent mint() {}"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.compile("intent mint() {}").await.unwrap();

        assert_eq!(result.as_value(), &payload);
        assert_eq!(result.field("vault_hash"), Some(&json!("9f2c1e")));
        assert_eq!(result.into_inner(), payload);
    }

    #[tokio::test]
    async fn test_backend_reported_failure_is_still_a_value() {
        let mock_server = MockServer::start().await;

        let payload = json!({
            "success": false,
            "error": "Verification failed. Code must be proved before compilation."
        });

        Mock::given(method("POST"))
            .and(path("/api/compile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.compile("intent broken() {}").await.unwrap();

        assert_eq!(result.into_inner(), payload);
    }

    #[tokio::test]
    async fn test_server_error_is_returned() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/compile"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "AI bridge offline"})))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client.compile("intent mint() {}").await.unwrap_err();

        assert_eq!(err.kind(), FailureKind::Protocol);
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.description(), "HTTP error! status: 500");
        assert_eq!(err.service_name(), Some("aethel"));
        assert_eq!(err.endpoint(), Some("api/compile"));
        assert_eq!(
            err.context().and_then(|c| c.data.get("detail")).map(String::as_str),
            Some("AI bridge offline")
        );
    }

    #[tokio::test]
    async fn test_client_error_is_returned() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/compile"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client.compile("").await.unwrap_err();

        assert_eq!(err.kind(), FailureKind::Protocol);
        assert_eq!(err.status_code(), Some(422));
    }

    #[tokio::test]
    async fn test_connection_failure_is_returned() {
        let client = create_unreachable_client();
        let err = client.compile("intent mint() {}").await.unwrap_err();

        assert_eq!(err.kind(), FailureKind::Transport);
        assert!(err.description().starts_with("Connection error"));
        assert_eq!(err.endpoint(), Some("api/compile"));
        assert!(matches!(err, ServiceError::WithContext { .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_returned() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/compile"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"success\": tru"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client.compile("intent mint() {}").await.unwrap_err();

        assert_eq!(err.kind(), FailureKind::Payload);
        assert_eq!(err.status_code(), Some(200));
    }
}
