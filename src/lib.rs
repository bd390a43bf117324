//! # Herald
//!
//! Pluggable email delivery backends. One trait, many providers, driven by
//! a flat string-keyed config map.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::{BackendConfig, EmailMeta, Sender, TemplateStore};
//! use serde_json::json;
//!
//! let config = BackendConfig::new()
//!     .with("Domain", "mg.example.com")
//!     .with("PrivateKey", "key-xxxx")
//!     .with("PublicKey", "pubkey-xxxx");
//!
//! let mut templates = TemplateStore::from_globs(
//!     "templates/html/*.html",
//!     "templates/text/*.txt",
//! )?;
//!
//! let sender = Sender::from_code("mailgun", &config, templates)?;
//!
//! sender.send(
//!     &EmailMeta::new(("Portal", "noreply@example.com"), "alice@example.com", "Welcome!"),
//!     &json!({"name": "Alice"}),
//!     "welcome",   // plain-text template name
//!     "welcome",   // HTML template name
//!     "org-1",
//!     "",
//! ).await?;
//! ```
//!
//! ## Backend Codes
//!
//! | Code | Backend | Required Config Keys |
//! |------|---------|----------------------|
//! | `smtp` | Generic SMTP | `SMTPAddress` (+ `SMTPPort` when the address has no port) |
//! | `sendgrid` | SendGrid v3 | `ClientKey` |
//! | `mailgun` | Mailgun v3 | `Domain`, `PrivateKey`, `PublicKey` |
//! | `mandrill` | Mandrill | `ClientKey` |
//! | `amazonses` | Amazon SES | `Region` or `Endpoint`, `AccessKeyId`, `SecretAccessKey` |
//! | `mock` | In-memory capture | (none) |
//!
//! Construction validates the config and builds the provider client, so a
//! backend you hold is always ready to deliver.
//!
//! ## Feature Flags
//!
//! - `smtp` - SMTP backend via lettre
//! - `sendgrid` - SendGrid API backend
//! - `mailgun` - Mailgun API backend
//! - `mandrill` - Mandrill API backend
//! - `amazon_ses` - Amazon SES API backend
//! - `full` (default) - all of the above
//!
//! The `mock` backend is always available.

/// The version of the herald crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod address;
mod backend;
mod config;
mod error;
mod message;
mod sender;
mod template;

pub mod backends;

// Re-exports
pub use address::Address;
pub use backend::{DeliveryReceipt, EmailBackend};
pub use config::BackendConfig;
pub use error::MailError;
pub use message::{EmailMeta, RenderedEmail};
pub use sender::Sender;
pub use template::TemplateStore;

/// The backend codes this build knows about, whether or not their feature
/// flags are enabled.
pub const BACKEND_CODES: &[&str] = &["smtp", "sendgrid", "mailgun", "mandrill", "amazonses", "mock"];

/// Construct a delivery backend by string code.
///
/// Performs the backend's full configuration validation; an `Err` means
/// either an unknown code, a disabled feature flag, or a config map that
/// fails the backend's requirements.
///
/// ```
/// use herald::{backend, BackendConfig, EmailBackend};
///
/// let config = BackendConfig::new().with("ClientKey", "SG.xxxx");
/// let sendgrid = backend("sendgrid", &config).unwrap();
/// assert_eq!(sendgrid.name(), "sendgrid");
///
/// assert!(backend("carrier-pigeon", &config).is_err());
/// ```
pub fn backend(
    code: &str,
    config: &BackendConfig,
) -> Result<Box<dyn EmailBackend>, MailError> {
    match code.to_lowercase().as_str() {
        #[cfg(feature = "smtp")]
        "smtp" => Ok(Box::new(backends::SmtpBackend::from_config(config)?)),
        #[cfg(not(feature = "smtp"))]
        "smtp" => Err(MailError::Configuration(
            "backend 'smtp' requires the 'smtp' feature. \
            Add `features = [\"smtp\"]` to Cargo.toml"
                .into(),
        )),

        #[cfg(feature = "sendgrid")]
        "sendgrid" => Ok(Box::new(backends::SendGridBackend::from_config(config)?)),
        #[cfg(not(feature = "sendgrid"))]
        "sendgrid" => Err(MailError::Configuration(
            "backend 'sendgrid' requires the 'sendgrid' feature. \
            Add `features = [\"sendgrid\"]` to Cargo.toml"
                .into(),
        )),

        #[cfg(feature = "mailgun")]
        "mailgun" => Ok(Box::new(backends::MailgunBackend::from_config(config)?)),
        #[cfg(not(feature = "mailgun"))]
        "mailgun" => Err(MailError::Configuration(
            "backend 'mailgun' requires the 'mailgun' feature. \
            Add `features = [\"mailgun\"]` to Cargo.toml"
                .into(),
        )),

        #[cfg(feature = "mandrill")]
        "mandrill" => Ok(Box::new(backends::MandrillBackend::from_config(config)?)),
        #[cfg(not(feature = "mandrill"))]
        "mandrill" => Err(MailError::Configuration(
            "backend 'mandrill' requires the 'mandrill' feature. \
            Add `features = [\"mandrill\"]` to Cargo.toml"
                .into(),
        )),

        #[cfg(feature = "amazon_ses")]
        "amazonses" => Ok(Box::new(backends::AmazonSesBackend::from_config(config)?)),
        #[cfg(not(feature = "amazon_ses"))]
        "amazonses" => Err(MailError::Configuration(
            "backend 'amazonses' requires the 'amazon_ses' feature. \
            Add `features = [\"amazon_ses\"]` to Cargo.toml"
                .into(),
        )),

        "mock" => Ok(Box::new(backends::MockBackend::new())),

        other => Err(MailError::Configuration(format!(
            "unknown email backend code '{}'. Valid codes are: {}",
            other,
            BACKEND_CODES.join(", ")
        ))),
    }
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::backend;
    pub use crate::Address;
    pub use crate::BackendConfig;
    pub use crate::DeliveryReceipt;
    pub use crate::EmailBackend;
    pub use crate::EmailMeta;
    pub use crate::MailError;
    pub use crate::RenderedEmail;
    pub use crate::Sender;
    pub use crate::TemplateStore;
}
