//! SendGrid v3 API backend.
//!
//! For reference: [SendGrid mail send docs](https://docs.sendgrid.com/api-reference/mail-send/mail-send)
//!
//! # Configuration Keys
//!
//! | Key | Description |
//! |-----|-------------|
//! | `ClientKey` | SendGrid API key |

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::backend::{DeliveryReceipt, EmailBackend};
use crate::config::BackendConfig;
use crate::error::MailError;
use crate::message::{EmailMeta, RenderedEmail};

const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3";

/// SendGrid API delivery backend.
pub struct SendGridBackend {
    api_key: String,
    client: Client,
    base_url: String,
}

impl SendGridBackend {
    /// Validate the configuration and build the client.
    pub fn from_config(config: &BackendConfig) -> Result<Self, MailError> {
        Ok(Self {
            api_key: config.require("ClientKey")?.to_string(),
            client: Client::new(),
            base_url: SENDGRID_API_URL.to_string(),
        })
    }

    /// Set a custom base URL (for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn build_request(&self, meta: &EmailMeta, body: &RenderedEmail) -> SendGridRequest {
        SendGridRequest {
            personalizations: vec![SendGridPersonalization {
                to: vec![SendGridAddress::from(&meta.to)],
            }],
            from: SendGridAddress::from(&meta.from),
            subject: meta.subject.clone(),
            content: vec![
                SendGridContent {
                    content_type: "text/plain".to_string(),
                    value: body.text.clone(),
                },
                SendGridContent {
                    content_type: "text/html".to_string(),
                    value: body.html.clone(),
                },
            ],
        }
    }
}

#[async_trait]
impl EmailBackend for SendGridBackend {
    async fn deliver(
        &self,
        meta: &EmailMeta,
        body: &RenderedEmail,
    ) -> Result<DeliveryReceipt, MailError> {
        let request = self.build_request(meta, body);
        let url = format!("{}/mail/send", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("User-Agent", format!("herald/{}", crate::VERSION))
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        // SendGrid returns 202 Accepted on success with no body
        if status.is_success() {
            let message_id = response
                .headers()
                .get("X-Message-Id")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

            Ok(DeliveryReceipt::new(message_id))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            let error_msg = serde_json::from_str::<SendGridError>(&error_body)
                .map(|e| {
                    e.errors
                        .iter()
                        .map(|d| d.message.clone())
                        .collect::<Vec<_>>()
                        .join("; ")
                })
                .unwrap_or(error_body);

            Err(MailError::provider_with_status(
                "sendgrid",
                error_msg,
                status.as_u16(),
            ))
        }
    }

    fn name(&self) -> &'static str {
        "sendgrid"
    }
}

// ============================================================================
// SendGrid API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct SendGridRequest {
    personalizations: Vec<SendGridPersonalization>,
    from: SendGridAddress,
    subject: String,
    content: Vec<SendGridContent>,
}

#[derive(Debug, Serialize)]
struct SendGridPersonalization {
    to: Vec<SendGridAddress>,
}

#[derive(Debug, Serialize)]
struct SendGridAddress {
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl From<&Address> for SendGridAddress {
    fn from(addr: &Address) -> Self {
        Self {
            email: addr.email.clone(),
            name: addr.name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendGridContent {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct SendGridError {
    errors: Vec<SendGridErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct SendGridErrorDetail {
    message: String,
}
