// Integration tests for `ExecClient` using wiremock.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gantry_api::exec::InvocationStatus;
use gantry_api::{Error, ExecClient};

async fn setup() -> (MockServer, ExecClient) {
    let server = MockServer::start().await;
    let client = ExecClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

#[tokio::test]
async fn dispatch_returns_invocation_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/hosts/host-01/invocations"))
        .and(body_json(json!({
            "command": "/usr/local/lib/gantry/create-site.sh qa5 8005",
            "timeoutSecs": 300,
        })))
        .respond_with(
            ResponseTemplate::new(202).set_body_json(json!({ "invocationId": "inv-1234" })),
        )
        .mount(&server)
        .await;

    let id = client
        .dispatch(
            "host-01",
            "/usr/local/lib/gantry/create-site.sh qa5 8005",
            Duration::from_secs(300),
        )
        .await
        .unwrap();

    assert_eq!(id, "inv-1234");
}

#[tokio::test]
async fn poll_reports_pending_without_output() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/hosts/host-01/invocations/inv-1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Pending" })))
        .mount(&server)
        .await;

    let result = client.get_invocation("host-01", "inv-1234").await.unwrap();

    assert_eq!(result.status, InvocationStatus::Pending);
    assert!(!result.status.is_terminal());
    assert!(result.stdout.is_none());
    assert!(result.stderr.is_none());
}

#[tokio::test]
async fn poll_reports_failure_with_stderr() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/hosts/host-01/invocations/inv-1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "Failed",
            "stdout": "",
            "stderr": "create-site.sh: port 8005 already bound",
        })))
        .mount(&server)
        .await;

    let result = client.get_invocation("host-01", "inv-1234").await.unwrap();

    assert_eq!(result.status, InvocationStatus::Failed);
    assert!(result.status.is_terminal());
    assert_eq!(
        result.stderr.as_deref(),
        Some("create-site.sh: port 8005 already bound")
    );
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client
        .dispatch("host-01", "true", Duration::from_secs(1))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Authentication { .. }));
}

#[tokio::test]
async fn structured_error_envelope_is_parsed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/hosts/host-01/invocations/inv-gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "invocation not found",
            "code": "invocation.not-found",
        })))
        .mount(&server)
        .await;

    let err = client.get_invocation("host-01", "inv-gone").await.unwrap_err();

    match err {
        Error::Api {
            status,
            message,
            code,
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "invocation not found");
            assert_eq!(code.as_deref(), Some("invocation.not-found"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
