//! Delivery backend implementations.
//!
//! Each backend implements the [`EmailBackend`](crate::EmailBackend) trait
//! and is constructed from a [`BackendConfig`](crate::BackendConfig).
//!
//! ## Available Backends
//!
//! | Backend | Code | Feature Flag | Description |
//! |---------|------|-------------|-------------|
//! | [`SmtpBackend`] | `smtp` | `smtp` | Generic SMTP via lettre |
//! | [`SendGridBackend`] | `sendgrid` | `sendgrid` | SendGrid v3 API |
//! | [`MailgunBackend`] | `mailgun` | `mailgun` | Mailgun v3 API |
//! | [`MandrillBackend`] | `mandrill` | `mandrill` | Mandrill (Mailchimp Transactional) API |
//! | [`AmazonSesBackend`] | `amazonses` | `amazon_ses` | Amazon SES SendEmail API |
//! | [`MockBackend`] | `mock` | (none) | In-memory capture for dev/testing |

#[cfg(feature = "smtp")]
mod smtp;
#[cfg(feature = "smtp")]
pub use smtp::SmtpBackend;

#[cfg(feature = "sendgrid")]
mod sendgrid;
#[cfg(feature = "sendgrid")]
pub use sendgrid::SendGridBackend;

#[cfg(feature = "mailgun")]
mod mailgun;
#[cfg(feature = "mailgun")]
pub use mailgun::MailgunBackend;

#[cfg(feature = "mandrill")]
mod mandrill;
#[cfg(feature = "mandrill")]
pub use mandrill::MandrillBackend;

#[cfg(feature = "amazon_ses")]
mod amazon_ses;
#[cfg(feature = "amazon_ses")]
pub use amazon_ses::AmazonSesBackend;

mod mock;
pub use mock::{MockBackend, SentEmail};
