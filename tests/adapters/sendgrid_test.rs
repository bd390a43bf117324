//! SendGrid adapter tests.

use herald::backends::SendGridBackend;
use herald::{BackendConfig, EmailBackend, EmailMeta, RenderedEmail};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(server: &MockServer) -> SendGridBackend {
    let config = BackendConfig::new().with("ClientKey", "SG.fake-key");
    SendGridBackend::from_config(&config)
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
async fn successful_delivery_returns_message_id_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .and(header("Authorization", "Bearer SG.fake-key"))
        .and(body_string_contains(
            "\"from\":{\"email\":\"tony.stark@example.com\",\"name\":\"Tony Stark\"}",
        ))
        .and(body_string_contains("\"subject\":\"Hello, Avengers!\""))
        .and(body_string_contains(
            "\"to\":[{\"email\":\"steve.rogers@example.com\",\"name\":\"Steve Rogers\"}]",
        ))
        .respond_with(ResponseTemplate::new(202).insert_header("X-Message-Id", "sg-message-id"))
        .expect(1)
        .mount(&server)
        .await;

    let result = backend(&server).deliver(&meta(), &body()).await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap().message_id, "sg-message-id");
}

#[tokio::test]
async fn successful_delivery_without_id_header_generates_one() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let result = backend(&server).deliver(&meta(), &body()).await;
    assert!(!result.unwrap().message_id.is_empty());
}

#[tokio::test]
async fn sends_both_content_parts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .and(body_string_contains("\"type\":\"text/plain\",\"value\":\"Hello\""))
        .and(body_string_contains("\"type\":\"text/html\",\"value\":\"<h1>Hello</h1>\""))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    assert!(backend(&server).deliver(&meta(), &body()).await.is_ok());
}

#[tokio::test]
async fn error_response_is_surfaced_with_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"message": "The provided authorization grant is invalid"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend(&server).deliver(&meta(), &body()).await.unwrap_err();
    let text = err.to_string();
    assert!(text.contains("sendgrid"));
    assert!(text.contains("authorization grant is invalid"));
}

#[tokio::test]
async fn unparseable_error_body_is_passed_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/mail/send"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend(&server).deliver(&meta(), &body()).await.unwrap_err();
    assert!(err.to_string().contains("upstream exploded"));
}

#[test]
fn backend_name_is_sendgrid() {
    let config = BackendConfig::new().with("ClientKey", "SG.fake-key");
    let backend = SendGridBackend::from_config(&config).unwrap();
    assert_eq!(backend.name(), "sendgrid");
}
