//! Generic SMTP backend using lettre.
//!
//! # Configuration Keys
//!
//! | Key | Description |
//! |-----|-------------|
//! | `SMTPAddress` | Server address, `host` or `host:port` |
//! | `SMTPPort` | Port, used when `SMTPAddress` carries none |
//! | `SMTPUsername` | Username; empty means unauthenticated |
//! | `SMTPPassword` | Password; empty means unauthenticated |
//! | `TLSInsecureSkipVerify` | Skip certificate verification (`true`/`1`/...) |

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    transport::smtp::client::{Tls, TlsParameters},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::address::Address;
use crate::backend::{DeliveryReceipt, EmailBackend};
use crate::config::BackendConfig;
use crate::error::MailError;
use crate::message::{EmailMeta, RenderedEmail};

/// SMTP delivery backend.
pub struct SmtpBackend {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
    port: u16,
}

impl SmtpBackend {
    /// Validate the configuration and build the transport.
    pub fn from_config(config: &BackendConfig) -> Result<Self, MailError> {
        let username = config.get_or("SMTPUsername", "").to_string();
        let password = config.get_or("SMTPPassword", "").to_string();

        if username.is_empty() || password.is_empty() {
            tracing::info!("SMTPUsername and/or SMTPPassword not set, configuring for no-auth");
        }

        let (host, port) = split_host_port(config.get_or("SMTPAddress", ""), config.get("SMTPPort"))?;
        let tls_insecure_skip_verify = config.get_bool("TLSInsecureSkipVerify");

        tracing::info!(host = %host, port = port, "SMTP settings");

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
            .unwrap_or_else(|_| AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&host))
            .port(port);

        if !username.is_empty() && !password.is_empty() {
            builder = builder.credentials(Credentials::new(username, password));
        }

        if tls_insecure_skip_verify {
            let tls = TlsParameters::builder(host.clone())
                .dangerous_accept_invalid_certs(true)
                .build()
                .map_err(|e| MailError::Configuration(format!("TLS setup failed: {}", e)))?;
            builder = builder.tls(Tls::Required(tls));
        }

        Ok(Self {
            transport: builder.build(),
            host,
            port,
        })
    }

    fn build_message(&self, meta: &EmailMeta, body: &RenderedEmail) -> Result<Message, MailError> {
        let message = Message::builder()
            .from(address_to_mailbox(&meta.from)?)
            .to(address_to_mailbox(&meta.to)?)
            .subject(&meta.subject)
            .multipart(MultiPart::alternative_plain_html(
                body.text.clone(),
                body.html.clone(),
            ))?;

        Ok(message)
    }
}

#[async_trait]
impl EmailBackend for SmtpBackend {
    async fn deliver(
        &self,
        meta: &EmailMeta,
        body: &RenderedEmail,
    ) -> Result<DeliveryReceipt, MailError> {
        let message = self.build_message(meta, body)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailError::Send(e.to_string()))?;

        tracing::debug!(host = %self.host, port = self.port, to = %meta.to.email, "email sent");

        // Use the server greeting line as a message id, or generate one
        let message_id = response
            .message()
            .next()
            .map(|s| s.to_string())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        Ok(DeliveryReceipt::new(message_id))
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

/// Split `host:port`, falling back to a dedicated port value when the
/// address carries none.
fn split_host_port(address: &str, fallback_port: Option<&str>) -> Result<(String, u16), MailError> {
    if address.is_empty() {
        return Err(MailError::Configuration("config key 'SMTPAddress' not set".into()));
    }

    if let Some((host, port)) = address.rsplit_once(':') {
        if host.is_empty() {
            return Err(MailError::Configuration(format!(
                "no host in SMTPAddress '{}'",
                address
            )));
        }
        let port = port.parse::<u16>().map_err(|_| {
            MailError::Configuration(format!("invalid port '{}' in SMTPAddress", port))
        })?;
        return Ok((host.to_string(), port));
    }

    // Missing port in the address field; try the dedicated port key.
    let port = fallback_port
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            MailError::Configuration(format!(
                "missing port in SMTPAddress '{}' and SMTPPort not set",
                address
            ))
        })?
        .parse::<u16>()
        .map_err(|_| MailError::Configuration("invalid port in SMTPPort".into()))?;

    Ok((address.to_string(), port))
}

/// Convert our Address to lettre's Mailbox.
fn address_to_mailbox(addr: &Address) -> Result<Mailbox, MailError> {
    let email = addr
        .email
        .parse()
        .map_err(|e: lettre::address::AddressError| MailError::InvalidAddress(e.to_string()))?;

    Ok(Mailbox::new(addr.name.clone(), email))
}
