//! Mailgun adapter tests.

use base64::Engine;
use herald::backends::MailgunBackend;
use herald::{BackendConfig, EmailBackend, EmailMeta, RenderedEmail};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(server: &MockServer) -> MailgunBackend {
    let config = BackendConfig::new()
        .with("Domain", "avengers.com")
        .with("PrivateKey", "fake-api-key")
        .with("PublicKey", "fake-public-key");
    MailgunBackend::from_config(&config)
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

fn success_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "message": "Queued. Thank you.",
        "id": "<20111114174239.25659.5817@samples.mailgun.org>"
    }))
}

#[tokio::test]
async fn successful_delivery_returns_provider_id() {
    let server = MockServer::start().await;

    // Mailgun uses Basic auth with "api:key" format
    let expected_auth = format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode("api:fake-api-key")
    );

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .and(header("Authorization", expected_auth.as_str()))
        .respond_with(success_response())
        .expect(1)
        .mount(&server)
        .await;

    let result = backend(&server).deliver(&meta(), &body()).await;
    assert!(result.is_ok());

    let receipt = result.unwrap();
    assert_eq!(
        receipt.message_id,
        "<20111114174239.25659.5817@samples.mailgun.org>"
    );
    assert_eq!(
        receipt.provider_response.unwrap()["message"],
        "Queued. Thank you."
    );
}

#[tokio::test]
async fn error_response_with_json_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "'to' parameter is not a valid address"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend(&server).deliver(&meta(), &body()).await.unwrap_err();
    assert!(err.to_string().contains("not a valid address"));
}

#[tokio::test]
async fn error_response_with_plain_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/avengers.com/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend(&server).deliver(&meta(), &body()).await.unwrap_err();
    let text = err.to_string();
    assert!(text.contains("mailgun"));
    assert!(text.contains("Forbidden"));
}

#[test]
fn backend_name_is_mailgun() {
    let config = BackendConfig::new()
        .with("Domain", "avengers.com")
        .with("PrivateKey", "fake-api-key")
        .with("PublicKey", "fake-public-key");
    let backend = MailgunBackend::from_config(&config).unwrap();
    assert_eq!(backend.name(), "mailgun");
}
