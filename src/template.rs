//! Named template store for email bodies.
//!
//! Every email is rendered twice, from two template sets the embedding
//! application loads up front: one set of HTML templates and one set of
//! plain-text templates, both addressed by template name. The HTML template
//! context carries the payload under `data` plus a `styles` string for
//! inlined CSS; the text context carries `data` only.
//!
//! # Example
//!
//! ```
//! use herald::TemplateStore;
//! use serde_json::json;
//!
//! let mut store = TemplateStore::new();
//! store.add_html_template("welcome", "<style>{{ styles }}</style><p>Hi {{ data.name }}</p>").unwrap();
//! store.add_text_template("welcome", "Hi {{ data.name }}").unwrap();
//!
//! let body = store.render("welcome", "welcome", &json!({"name": "Alice"}), "p{color:red}").unwrap();
//! assert_eq!(body.text, "Hi Alice");
//! ```

use serde_json::Value;
use tera::{Context, Tera};

use crate::error::MailError;
use crate::message::RenderedEmail;

/// Pre-loaded HTML and plain-text template sets, addressed by name.
#[derive(Default)]
pub struct TemplateStore {
    html: Tera,
    text: Tera,
}

impl TemplateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load both sets from glob patterns (e.g. `"templates/html/*.html"`).
    pub fn from_globs(html_glob: &str, text_glob: &str) -> Result<Self, MailError> {
        Ok(Self {
            html: Tera::new(html_glob)?,
            text: Tera::new(text_glob)?,
        })
    }

    /// Register an HTML template under a name.
    pub fn add_html_template(&mut self, name: &str, body: &str) -> Result<(), MailError> {
        self.html.add_raw_template(name, body)?;
        Ok(())
    }

    /// Register a plain-text template under a name.
    pub fn add_text_template(&mut self, name: &str, body: &str) -> Result<(), MailError> {
        self.text.add_raw_template(name, body)?;
        Ok(())
    }

    /// Render the named template pair into an email body.
    ///
    /// The HTML context gets `data` and `styles`; the text context gets
    /// `data` only. A missing template or render failure aborts with
    /// [`MailError::Template`].
    pub fn render(
        &self,
        text_name: &str,
        html_name: &str,
        data: &Value,
        styles: &str,
    ) -> Result<RenderedEmail, MailError> {
        let mut html_ctx = Context::new();
        html_ctx.insert("data", data);
        html_ctx.insert("styles", styles);

        let html = self.html.render(html_name, &html_ctx).map_err(|e| {
            tracing::error!(template = html_name, error = %e, "HTML template render failed");
            MailError::Template(e.to_string())
        })?;

        let mut text_ctx = Context::new();
        text_ctx.insert("data", data);

        let text = self.text.render(text_name, &text_ctx).map_err(|e| {
            tracing::error!(template = text_name, error = %e, "text template render failed");
            MailError::Template(e.to_string())
        })?;

        Ok(RenderedEmail { text, html })
    }
}
