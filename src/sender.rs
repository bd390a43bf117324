//! Render-then-deliver orchestration.

use serde_json::Value;

use crate::backend::{DeliveryReceipt, EmailBackend};
use crate::config::BackendConfig;
use crate::error::MailError;
use crate::message::EmailMeta;
use crate::template::TemplateStore;

/// Ties a template store to a delivery backend.
///
/// `Sender` is the primary entry point: it validates the metadata, renders
/// the named template pair, and hands the rendered body to the backend.
///
/// ```rust,ignore
/// let sender = Sender::from_code("smtp", &config, templates)?;
///
/// sender.send(
///     &EmailMeta::new(("Portal", "noreply@example.com"), user_addr, "Welcome"),
///     &serde_json::json!({"name": "Alice"}),
///     "welcome",       // plain-text template
///     "welcome",       // HTML template
///     org_id,
///     portal_css,
/// ).await?;
/// ```
pub struct Sender {
    backend: Box<dyn EmailBackend>,
    templates: TemplateStore,
}

impl Sender {
    /// Create a sender from an already-constructed backend.
    pub fn new(backend: Box<dyn EmailBackend>, templates: TemplateStore) -> Self {
        Self { backend, templates }
    }

    /// Create a sender by backend code, constructing the backend from `config`.
    pub fn from_code(
        code: &str,
        config: &BackendConfig,
        templates: TemplateStore,
    ) -> Result<Self, MailError> {
        Ok(Self::new(crate::backend(code, config)?, templates))
    }

    /// The configured backend's code.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// The template store.
    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Mutable access to the template store, for late registration.
    pub fn templates_mut(&mut self) -> &mut TemplateStore {
        &mut self.templates
    }

    /// Render the named template pair and deliver the result.
    ///
    /// `data` is the payload exposed to both templates; `styles` is
    /// additionally exposed to the HTML template. `org_id` identifies the
    /// tenant on whose behalf the email is sent and is recorded on the
    /// delivery span. A render failure aborts before any network call.
    pub async fn send(
        &self,
        meta: &EmailMeta,
        data: &Value,
        text_template: &str,
        html_template: &str,
        org_id: &str,
        styles: &str,
    ) -> Result<DeliveryReceipt, MailError> {
        meta.validate()?;

        let body = self
            .templates
            .render(text_template, html_template, data, styles)?;

        let span = tracing::info_span!(
            "herald.send",
            backend = self.backend.name(),
            to = %meta.to.email,
            subject = %meta.subject,
            org_id = %org_id,
        );
        let _guard = span.enter();

        tracing::debug!("delivering email");

        let result = self.backend.deliver(meta, &body).await;

        match &result {
            Ok(receipt) => tracing::info!(message_id = %receipt.message_id, "email delivered"),
            Err(e) => tracing::error!(error = %e, "email delivery failed"),
        }

        result
    }
}
