//! Integration tests for the request executor.

use legalesign::{Client, ClientConfig, Credentials, LegalesignError};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::with_config(
        Credentials::new("user", "secret"),
        ClientConfig {
            base_url: Some(server.uri()),
            ..Default::default()
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_client_creation() {
    let client = Client::new(Credentials::new("user", "secret")).unwrap();
    assert!(client.base_url().starts_with("https://"));
    assert_eq!(client.credentials().user_id(), "user");
}

#[tokio::test]
async fn test_client_with_custom_config() {
    let client = Client::with_config(
        Credentials::new("user", "secret"),
        ClientConfig {
            base_url: Some("https://custom.api.com".to_string()),
            timeout: Some(Duration::from_secs(60)),
            user_agent: Some("test-agent/1.0".to_string()),
        },
    )
    .unwrap();
    assert_eq!(client.base_url(), "https://custom.api.com");
}

#[tokio::test]
async fn test_get_sends_auth_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/document/"))
        .and(header("Authorization", "ApiKey user:secret"))
        .and(header("Content-Type", "application/json"))
        .and(query_param("limit", "5"))
        .and(query_param("archived", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "objects": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let value: serde_json::Value = client
        .execute_json(
            "get",
            "document/",
            Some(&serde_json::json!({ "limit": 5, "archived": false })),
        )
        .await
        .unwrap();
    assert_eq!(value["objects"], serde_json::json!([]));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/signer/s1/send-reminder/"))
        .and(header("Authorization", "ApiKey user:secret"))
        .and(body_json(serde_json::json!({ "text": "hello" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .execute(
            "POST",
            "/signer/s1/send-reminder/",
            Some(&serde_json::json!({ "text": "hello" })),
        )
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_patch_and_delete_send_json_body_only() {
    let data = serde_json::json!({ "archived": true });

    for verb in ["PATCH", "DELETE"] {
        let mock_server = MockServer::start().await;

        Mock::given(method(verb))
            .and(path("/document/doc-1/"))
            .and(body_json(data.clone()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client
            .execute(verb, "document/doc-1/", Some(&data))
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), None, "{verb} leaked data into the query");
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body, data);
    }
}

#[tokio::test]
async fn test_method_and_endpoint_are_normalized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/document/abc/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .execute(" patch ", "  document/abc/ ", Some(&serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status, 204);
}

#[tokio::test]
async fn test_success_codes() {
    for status in [200u16, 201, 204] {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/document/x/"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let response = client.execute("GET", "document/x/", None).await.unwrap();
        assert_eq!(response.status, status);
    }
}

#[tokio::test]
async fn test_specific_error_kinds() {
    let cases: [(u16, fn(&LegalesignError) -> bool); 3] = [
        (401, |e| matches!(e, LegalesignError::Authentication)),
        (429, |e| matches!(e, LegalesignError::Throttled)),
        (202, |e| matches!(e, LegalesignError::Retrieving)),
    ];

    for (status, check) in cases {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/document/x/"))
            .respond_with(ResponseTemplate::new(status).set_body_string("{\"detail\":\"x\"}"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .execute("GET", "document/x/", None)
            .await
            .unwrap_err();
        assert!(check(&err), "status {status} gave {err:?}");
    }
}

#[tokio::test]
async fn test_api_error_with_known_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/document/x/"))
        .respond_with(ResponseTemplate::new(405).set_body_string("nope"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    match client.execute("DELETE", "document/x/", None).await {
        Err(LegalesignError::Api {
            status_code,
            message,
        }) => {
            assert_eq!(status_code, 405);
            assert_eq!(message, "Method not allowed.");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_api_error_falls_back_to_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/document/x/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden for this group"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .execute("GET", "document/x/", None)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(403));
    assert_eq!(
        err.to_string(),
        "Legalesign API replied: forbidden for this group"
    );
}

#[tokio::test]
async fn test_missing_credentials_fail_before_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Client::with_config(
        Credentials::new("", ""),
        ClientConfig {
            base_url: Some(mock_server.uri()),
            ..Default::default()
        },
    )
    .unwrap();

    let err = client
        .execute("GET", "document/x/", None)
        .await
        .unwrap_err();
    assert!(matches!(err, LegalesignError::Configuration(_)));
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/document/x/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: Result<serde_json::Value, _> =
        client.execute_json("GET", "document/x/", None).await;
    assert!(matches!(result, Err(LegalesignError::Decode(_))));
}
