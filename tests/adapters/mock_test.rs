//! Mock backend tests.

use herald::backends::MockBackend;
use herald::{EmailBackend, EmailMeta, RenderedEmail};

fn meta() -> EmailMeta {
    EmailMeta::new("from@example.com", "to@example.com", "Subject")
}

#[tokio::test]
async fn captures_emails_in_order() {
    let mock = MockBackend::new();
    let body = RenderedEmail::new("one", "<p>one</p>");

    mock.deliver(&meta(), &body).await.unwrap();
    mock.deliver(&meta(), &RenderedEmail::new("two", "<p>two</p>"))
        .await
        .unwrap();

    assert_eq!(mock.sent_count(), 2);
    assert_eq!(mock.sent()[0].body.text, "one");
    assert_eq!(mock.last().unwrap().body.text, "two");

    mock.clear();
    assert_eq!(mock.sent_count(), 0);
}

#[tokio::test]
async fn injected_failure_surfaces_and_clears() {
    let mock = MockBackend::new();
    mock.fail_with("simulated outage");

    let err = mock
        .deliver(&meta(), &RenderedEmail::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("simulated outage"));

    mock.clear_failure();
    assert!(mock.deliver(&meta(), &RenderedEmail::default()).await.is_ok());
}
