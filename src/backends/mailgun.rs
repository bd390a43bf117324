//! Mailgun v3 API backend.
//!
//! For reference: [Mailgun API docs](https://documentation.mailgun.com/en/latest/api-sending.html#sending)
//!
//! # Configuration Keys
//!
//! | Key | Description |
//! |-----|-------------|
//! | `Domain` | Sending domain (e.g., "mg.example.com") |
//! | `PrivateKey` | Private API key, used for authentication |
//! | `PublicKey` | Public API key; required by the configuration contract |
//!
//! For EU domains, use [`MailgunBackend::base_url`] with
//! `https://api.eu.mailgun.net/v3`.

use async_trait::async_trait;
use base64::Engine;
use reqwest::{multipart::Form, Client};
use serde::Deserialize;

use crate::backend::{DeliveryReceipt, EmailBackend};
use crate::config::BackendConfig;
use crate::error::MailError;
use crate::message::{EmailMeta, RenderedEmail};

const MAILGUN_BASE_URL: &str = "https://api.mailgun.net/v3";

/// Mailgun API delivery backend.
pub struct MailgunBackend {
    domain: String,
    private_key: String,
    base_url: String,
    client: Client,
}

impl MailgunBackend {
    /// Validate the configuration and build the client.
    ///
    /// `PublicKey` is validated for presence but only the private key is
    /// used to authenticate send calls.
    pub fn from_config(config: &BackendConfig) -> Result<Self, MailError> {
        let domain = config.require("Domain")?.to_string();
        let private_key = config.require("PrivateKey")?.to_string();
        config.require("PublicKey")?;

        Ok(Self {
            domain,
            private_key,
            base_url: MAILGUN_BASE_URL.to_string(),
            client: Client::new(),
        })
    }

    /// Set a custom base URL (e.g., for EU: "https://api.eu.mailgun.net/v3").
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn auth_header(&self) -> String {
        let credentials = format!("api:{}", self.private_key);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
    }

    fn build_form(&self, meta: &EmailMeta, body: &RenderedEmail) -> Form {
        Form::new()
            .text("from", meta.from.formatted())
            .text("to", meta.to.formatted())
            .text("subject", meta.subject.clone())
            .text("text", body.text.clone())
            .text("html", body.html.clone())
    }
}

#[async_trait]
impl EmailBackend for MailgunBackend {
    async fn deliver(
        &self,
        meta: &EmailMeta,
        body: &RenderedEmail,
    ) -> Result<DeliveryReceipt, MailError> {
        let form = self.build_form(meta, body);
        let url = format!("{}/{}/messages", self.base_url, self.domain);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("User-Agent", format!("herald/{}", crate::VERSION))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let result: MailgunResponse = response.json().await?;
            Ok(DeliveryReceipt::with_response(
                result.id,
                serde_json::json!({ "message": result.message }),
            ))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            let error_msg = serde_json::from_str::<MailgunError>(&error_body)
                .map(|e| e.message)
                .unwrap_or(error_body);

            Err(MailError::provider_with_status(
                "mailgun",
                error_msg,
                status.as_u16(),
            ))
        }
    }

    fn name(&self) -> &'static str {
        "mailgun"
    }
}

// ============================================================================
// Mailgun API Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct MailgunResponse {
    id: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct MailgunError {
    message: String,
}
