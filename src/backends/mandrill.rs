//! Mandrill (Mailchimp Transactional) API backend.
//!
//! For reference: [Mandrill messages/send docs](https://mailchimp.com/developer/transactional/api/messages/send-new-message/)
//!
//! # Configuration Keys
//!
//! | Key | Description |
//! |-----|-------------|
//! | `ClientKey` | Mandrill API key |

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::backend::{DeliveryReceipt, EmailBackend};
use crate::config::BackendConfig;
use crate::error::MailError;
use crate::message::{EmailMeta, RenderedEmail};

const MANDRILL_API_URL: &str = "https://mandrillapp.com/api/1.0";

/// Mandrill API delivery backend.
pub struct MandrillBackend {
    api_key: String,
    client: Client,
    base_url: String,
}

impl MandrillBackend {
    /// Validate the configuration and build the client.
    pub fn from_config(config: &BackendConfig) -> Result<Self, MailError> {
        Ok(Self {
            api_key: config.require("ClientKey")?.to_string(),
            client: Client::new(),
            base_url: MANDRILL_API_URL.to_string(),
        })
    }

    /// Set a custom base URL (for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn build_request(&self, meta: &EmailMeta, body: &RenderedEmail) -> MandrillRequest {
        MandrillRequest {
            key: self.api_key.clone(),
            message: MandrillMessage {
                html: body.html.clone(),
                text: body.text.clone(),
                subject: meta.subject.clone(),
                from_email: meta.from.email.clone(),
                from_name: meta.from.name.clone(),
                to: vec![MandrillRecipient {
                    email: meta.to.email.clone(),
                    name: meta.to.name.clone(),
                    recipient_type: "to",
                }],
            },
        }
    }
}

#[async_trait]
impl EmailBackend for MandrillBackend {
    async fn deliver(
        &self,
        meta: &EmailMeta,
        body: &RenderedEmail,
    ) -> Result<DeliveryReceipt, MailError> {
        let request = self.build_request(meta, body);
        let url = format!("{}/messages/send.json", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("User-Agent", format!("herald/{}", crate::VERSION))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let response_body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            // Mandrill reports failures as {"status":"error","code":..,"name":..,"message":..}
            let error_msg = serde_json::from_str::<MandrillApiError>(&response_body)
                .map(|e| format!("[{}] {}", e.name, e.message))
                .unwrap_or(response_body);

            return Err(MailError::provider_with_status(
                "mandrill",
                error_msg,
                status.as_u16(),
            ));
        }

        // Success is an array of per-recipient results; rejections still
        // come back with HTTP 200.
        let results: Vec<MandrillResult> = serde_json::from_str(&response_body)?;

        match results.first() {
            Some(result) if result.status == "rejected" || result.status == "invalid" => {
                let reason = result
                    .reject_reason
                    .clone()
                    .unwrap_or_else(|| result.status.clone());
                Err(MailError::provider(
                    "mandrill",
                    format!("recipient {}: {}", result.email, reason),
                ))
            }
            Some(result) => Ok(DeliveryReceipt::with_response(
                result.id.clone(),
                serde_json::json!({ "status": result.status }),
            )),
            None => Err(MailError::provider("mandrill", "empty send response")),
        }
    }

    fn name(&self) -> &'static str {
        "mandrill"
    }
}

// ============================================================================
// Mandrill API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct MandrillRequest {
    key: String,
    message: MandrillMessage,
}

#[derive(Debug, Serialize)]
struct MandrillMessage {
    html: String,
    text: String,
    subject: String,
    from_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    from_name: Option<String>,
    to: Vec<MandrillRecipient>,
}

#[derive(Debug, Serialize)]
struct MandrillRecipient {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(rename = "type")]
    recipient_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct MandrillResult {
    email: String,
    status: String,
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(default)]
    reject_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MandrillApiError {
    name: String,
    message: String,
}
