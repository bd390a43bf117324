//! Mandrill adapter tests.

use herald::backends::MandrillBackend;
use herald::{BackendConfig, EmailBackend, EmailMeta, MailError, RenderedEmail};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(server: &MockServer) -> MandrillBackend {
    let config = BackendConfig::new().with("ClientKey", "md-fake-key");
    MandrillBackend::from_config(&config)
        .unwrap()
        .base_url(server.uri())
}

fn meta() -> EmailMeta {
    EmailMeta::new(
        ("Tony Stark", "tony.stark@example.com"),
        ("Steve Rogers", "steve.rogers@example.com"),
        "Hello, Avengers!",
    )
}

fn body() -> RenderedEmail {
    RenderedEmail::new("Hello", "<h1>Hello</h1>")
}

#[tokio::test]
async fn successful_delivery_returns_result_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages/send.json"))
        .and(body_string_contains("\"key\":\"md-fake-key\""))
        .and(body_string_contains("\"subject\":\"Hello, Avengers!\""))
        .and(body_string_contains("\"from_email\":\"tony.stark@example.com\""))
        .and(body_string_contains(
            "\"email\":\"steve.rogers@example.com\",\"name\":\"Steve Rogers\",\"type\":\"to\"",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "email": "steve.rogers@example.com",
            "status": "sent",
            "reject_reason": null,
            "_id": "abc123abc123abc123abc123abc123"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let result = backend(&server).deliver(&meta(), &body()).await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap().message_id, "abc123abc123abc123abc123abc123");
}

#[tokio::test]
async fn rejected_recipient_is_an_error_despite_http_200() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages/send.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "email": "steve.rogers@example.com",
            "status": "rejected",
            "reject_reason": "hard-bounce",
            "_id": "abc123"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend(&server).deliver(&meta(), &body()).await.unwrap_err();
    let text = err.to_string();
    assert!(text.contains("mandrill"));
    assert!(text.contains("hard-bounce"));
}

#[tokio::test]
async fn invalid_recipient_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages/send.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "email": "steve.rogers@example.com",
            "status": "invalid",
            "reject_reason": null,
            "_id": ""
        }])))
        .expect(1)
        .mount(&server)
        .await;

    assert!(backend(&server).deliver(&meta(), &body()).await.is_err());
}

#[tokio::test]
async fn api_error_object_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages/send.json"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "error",
            "code": -1,
            "name": "Invalid_Key",
            "message": "Invalid API key"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend(&server).deliver(&meta(), &body()).await.unwrap_err();
    let text = err.to_string();
    assert!(text.contains("Invalid_Key"));
    assert!(text.contains("Invalid API key"));
}

#[tokio::test]
async fn empty_result_array_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages/send.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend(&server).deliver(&meta(), &body()).await.unwrap_err();
    assert!(matches!(err, MailError::Provider { .. }));
}

#[test]
fn backend_name_is_mandrill() {
    let config = BackendConfig::new().with("ClientKey", "md-fake-key");
    let backend = MandrillBackend::from_config(&config).unwrap();
    assert_eq!(backend.name(), "mandrill");
}
