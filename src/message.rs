//! Message metadata and rendered bodies.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::MailError;

/// Sender/recipient metadata for a single outgoing email.
///
/// ```
/// use herald::EmailMeta;
///
/// let meta = EmailMeta::new(
///     ("Portal", "noreply@example.com"),
///     ("Alice", "alice@example.com"),
///     "Welcome aboard",
/// );
/// assert!(meta.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMeta {
    /// Sender address
    pub from: Address,
    /// Recipient address
    pub to: Address,
    /// Subject line
    pub subject: String,
}

impl EmailMeta {
    /// Create new metadata.
    pub fn new(
        from: impl Into<Address>,
        to: impl Into<Address>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
        }
    }

    /// Validate both addresses.
    pub fn validate(&self) -> Result<(), MailError> {
        self.from.validate()?;
        self.to.validate()?;
        Ok(())
    }
}

/// The two rendered template buffers that make up an email body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderedEmail {
    /// Plain text body
    pub text: String,
    /// HTML body
    pub html: String,
}

impl RenderedEmail {
    /// Create a rendered body from its two parts.
    pub fn new(text: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: html.into(),
        }
    }
}
