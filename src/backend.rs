//! The backend trait and delivery receipt types.
//!
//! # Why `async_trait`?
//!
//! Backends are selected by string code at runtime and handed around as
//! `Box<dyn EmailBackend>`. Native async traits are not object-safe, so the
//! trait uses `#[async_trait]`, which boxes the returned future. Email
//! delivery is network-bound; the per-call allocation is noise next to the
//! round trip. Callers who hold a concrete backend type can still call
//! `deliver` on it directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MailError;
use crate::message::{EmailMeta, RenderedEmail};

/// Result of a successful delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Message ID assigned by the provider
    pub message_id: String,
    /// Optional provider-specific response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_response: Option<serde_json::Value>,
}

impl DeliveryReceipt {
    /// Create a receipt with just a message ID.
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            provider_response: None,
        }
    }

    /// Create a receipt with provider response data attached.
    pub fn with_response(message_id: impl Into<String>, response: serde_json::Value) -> Self {
        Self {
            message_id: message_id.into(),
            provider_response: Some(response),
        }
    }
}

/// Trait implemented by every delivery backend.
///
/// A backend is constructed from a [`BackendConfig`](crate::BackendConfig)
/// (which performs all field validation up front, so a constructed backend
/// is always usable) and delivers already-rendered bodies.
///
/// # Example
///
/// ```rust,ignore
/// let backend = herald::backend("sendgrid", &config)?;
/// let receipt = backend.deliver(&meta, &body).await?;
/// println!("sent as {}", receipt.message_id);
/// ```
#[async_trait]
pub trait EmailBackend: Send + Sync {
    /// Send a single email.
    ///
    /// Returns the provider-assigned message ID on success.
    async fn deliver(
        &self,
        meta: &EmailMeta,
        body: &RenderedEmail,
    ) -> Result<DeliveryReceipt, MailError>;

    /// The backend's string code (for logging and registry lookups).
    fn name(&self) -> &'static str;
}
