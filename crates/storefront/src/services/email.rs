//! Contact form email delivery.
//!
//! Submissions are rendered with Askama (HTML + plain text) and handed to a
//! [`ContactMailer`]. Production uses the Resend HTTP API; without an API key
//! the storefront falls back to logging the submission.

use askama::Template;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

use rapid_sites_core::{Email, ValidContact};

/// Resend API endpoint for sending a single email.
const RESEND_URL: &str = "https://api.resend.com/emails";

/// Errors that can occur when delivering a contact email.
#[derive(Debug, Error)]
pub enum MailerError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// The API key cannot be sent as a header.
    #[error("Invalid API key format")]
    InvalidApiKey,
}

/// A contact submission addressed to a tenant inbox.
#[derive(Debug, Clone)]
pub struct ContactEmail<'a> {
    pub from: &'a Email,
    pub to: &'a Email,
    pub site_name: &'a str,
    pub contact: &'a ValidContact,
}

impl ContactEmail<'_> {
    #[must_use]
    pub fn subject(&self) -> String {
        format!("New Contact Form Submission from {}", self.site_name)
    }

    /// Render the HTML body.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn html(&self) -> Result<String, askama::Error> {
        ContactEmailHtml {
            contact: self.contact,
        }
        .render()
    }

    /// Render the plain-text body.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn text(&self) -> Result<String, askama::Error> {
        ContactEmailText {
            contact: self.contact,
        }
        .render()
    }
}

/// HTML template for the contact notification.
#[derive(Template)]
#[template(path = "email/contact.html")]
struct ContactEmailHtml<'a> {
    contact: &'a ValidContact,
}

/// Plain text template for the contact notification.
#[derive(Template)]
#[template(path = "email/contact.txt")]
struct ContactEmailText<'a> {
    contact: &'a ValidContact,
}

/// Delivers contact form submissions to the tenant.
#[async_trait]
pub trait ContactMailer: Send + Sync {
    /// Deliver one submission.
    ///
    /// # Errors
    ///
    /// Returns error if rendering or delivery fails.
    async fn send_contact(&self, email: &ContactEmail<'_>) -> Result<(), MailerError>;
}

// =============================================================================
// Resend
// =============================================================================

/// Request body for `POST /emails`.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    html: String,
    text: String,
    reply_to: &'a str,
}

/// Resend API client.
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl ResendMailer {
    /// Create a new Resend client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(api_key: &SecretString) -> Result<Self, MailerError> {
        Self::with_endpoint(api_key, RESEND_URL)
    }

    /// Create a client that posts to a custom endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`ResendMailer::new`].
    pub fn with_endpoint(api_key: &SecretString, endpoint: &str) -> Result<Self, MailerError> {
        let mut headers = HeaderMap::new();
        let mut auth_value =
            HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
                .map_err(|_| MailerError::InvalidApiKey)?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl ContactMailer for ResendMailer {
    async fn send_contact(&self, email: &ContactEmail<'_>) -> Result<(), MailerError> {
        let body = SendEmailRequest {
            from: email.from.as_str(),
            to: [email.to.as_str()],
            subject: email.subject(),
            html: email.html()?,
            text: email.text()?,
            reply_to: email.contact.email.as_str(),
        };

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(to = %email.to, "Contact email sent");
        Ok(())
    }
}

// =============================================================================
// Log-only fallback
// =============================================================================

/// Logs submissions instead of sending them.
///
/// Used for local development when no Resend API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl ContactMailer for LogMailer {
    async fn send_contact(&self, email: &ContactEmail<'_>) -> Result<(), MailerError> {
        let text = email.text()?;
        tracing::info!(
            to = %email.to,
            reply_to = %email.contact.email,
            subject = %email.subject(),
            body = %text,
            "Contact email (log only, RESEND_API_KEY not set)"
        );
        Ok(())
    }
}
