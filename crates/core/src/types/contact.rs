//! Contact form submission and its validation rules.

use serde::{Deserialize, Serialize};

use super::email::Email;

/// Minimum message length, counted in characters after trimming.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// A contact form submission as posted by the browser.
///
/// Fields are kept as raw strings so that validation can report every
/// problem at once instead of failing on the first bad field.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// A single failed validation rule, reported back to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_owned(),
            message: message.to_owned(),
        }
    }
}

/// A submission that passed validation, with whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub message: String,
}

impl ContactSubmission {
    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns every failed rule in field order (`name`, `email`,
    /// `message`). A blank phone number is treated as absent.
    pub fn validate(&self) -> Result<ValidContact, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }

        let email = Email::parse(&self.email);
        if email.is_err() {
            errors.push(FieldError::new("email", "Valid email is required"));
        }

        let message = self.message.trim();
        if message.is_empty() {
            errors.push(FieldError::new("message", "Message is required"));
        } else if message.chars().count() < MIN_MESSAGE_CHARS {
            errors.push(FieldError::new(
                "message",
                "Message must be at least 10 characters",
            ));
        }

        match email {
            Ok(email) if errors.is_empty() => Ok(ValidContact {
                name: name.to_owned(),
                email,
                phone: self
                    .phone
                    .as_deref()
                    .map(str::trim)
                    .filter(|phone| !phone.is_empty())
                    .map(str::to_owned),
                message: message.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}
