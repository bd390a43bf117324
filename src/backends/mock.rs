//! Mock backend for development and testing.
//!
//! Accepts any configuration, never talks to the network, and captures
//! every delivered email in memory for assertions.
//!
//! # Testing Usage
//!
//! ```rust,ignore
//! let mock = MockBackend::new();
//! let sender = Sender::new(Box::new(mock.clone()), templates);
//!
//! // Code under test
//! notify_user(&sender, &user).await?;
//!
//! assert_eq!(mock.sent_count(), 1);
//! assert_eq!(mock.last().unwrap().meta.to.email, "user@example.com");
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::backend::{DeliveryReceipt, EmailBackend};
use crate::error::MailError;
use crate::message::{EmailMeta, RenderedEmail};

/// An email captured by the mock backend.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub meta: EmailMeta,
    pub body: RenderedEmail,
}

/// In-memory mock backend.
///
/// Cloning yields a handle to the same capture buffer, so a clone can be
/// boxed into a [`Sender`](crate::Sender) while the original stays behind
/// for assertions.
#[derive(Clone, Default)]
pub struct MockBackend {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    sent: Mutex<Vec<SentEmail>>,
    fail_with: Mutex<Option<String>>,
}

impl MockBackend {
    /// Create a new mock backend with an empty capture buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured emails, oldest first.
    pub fn sent(&self) -> Vec<SentEmail> {
        self.inner.sent.lock().clone()
    }

    /// Number of captured emails.
    pub fn sent_count(&self) -> usize {
        self.inner.sent.lock().len()
    }

    /// The most recently captured email.
    pub fn last(&self) -> Option<SentEmail> {
        self.inner.sent.lock().last().cloned()
    }

    /// Drop all captured emails.
    pub fn clear(&self) {
        self.inner.sent.lock().clear();
    }

    /// Make every subsequent `deliver` fail with the given message.
    ///
    /// Useful for exercising error-handling paths.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.inner.fail_with.lock() = Some(message.into());
    }

    /// Clear the injected failure.
    pub fn clear_failure(&self) {
        *self.inner.fail_with.lock() = None;
    }
}

#[async_trait]
impl EmailBackend for MockBackend {
    async fn deliver(
        &self,
        meta: &EmailMeta,
        body: &RenderedEmail,
    ) -> Result<DeliveryReceipt, MailError> {
        if let Some(message) = self.inner.fail_with.lock().clone() {
            return Err(MailError::Send(message));
        }

        let message_id = uuid::Uuid::new_v4().to_string();

        tracing::debug!(
            message_id = %message_id,
            to = %meta.to.email,
            subject = %meta.subject,
            "mock backend captured email"
        );

        self.inner.sent.lock().push(SentEmail {
            meta: meta.clone(),
            body: body.clone(),
        });

        Ok(DeliveryReceipt::new(message_id))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
