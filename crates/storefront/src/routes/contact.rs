//! Contact API handler.
//!
//! Accepts a JSON submission, validates every field, and forwards valid
//! submissions to the configured [`ContactMailer`](crate::services::ContactMailer).

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rapid_sites_core::{ContactSubmission, FieldError};
use serde::Serialize;
use serde_json::json;
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::services::ContactEmail;
use crate::state::AppState;

/// Message returned when a submission is accepted.
pub const SUCCESS_MESSAGE: &str = "Thank you for your message. We'll be in touch soon!";

/// Error codes returned in the `error.code` field.
pub mod codes {
    pub const INVALID_BODY: &str = "INVALID_BODY";
    pub const EMAIL_ERROR: &str = "EMAIL_ERROR";
}

/// Successful submission payload.
#[derive(Debug, Serialize)]
pub struct ContactAccepted {
    pub message: &'static str,
}

/// Response envelope for the contact API.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ContactResponse {
    Accepted {
        success: bool,
        data: ContactAccepted,
    },
    Invalid {
        success: bool,
        errors: Vec<FieldError>,
    },
    Failed {
        success: bool,
        error: serde_json::Value,
    },
}

impl ContactResponse {
    fn accepted() -> (StatusCode, Json<Self>) {
        (
            StatusCode::OK,
            Json(Self::Accepted {
                success: true,
                data: ContactAccepted {
                    message: SUCCESS_MESSAGE,
                },
            }),
        )
    }

    fn invalid(errors: Vec<FieldError>) -> (StatusCode, Json<Self>) {
        (
            StatusCode::BAD_REQUEST,
            Json(Self::Invalid {
                success: false,
                errors,
            }),
        )
    }

    fn failed(status: StatusCode, message: &str, code: &str) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self::Failed {
                success: false,
                error: json!({ "message": message, "code": code }),
            }),
        )
    }
}

/// Submit the contact form.
///
/// POST /api/contact
#[instrument(skip(state, body))]
pub async fn submit(
    State(state): State<AppState>,
    body: Result<Json<ContactSubmission>, JsonRejection>,
) -> Response {
    let submission = match body {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected contact body");
            return ContactResponse::failed(
                StatusCode::BAD_REQUEST,
                "Invalid request body",
                codes::INVALID_BODY,
            )
            .into_response();
        }
    };

    let contact = match submission.validate() {
        Ok(contact) => contact,
        Err(errors) => {
            tracing::debug!(count = errors.len(), "Contact submission failed validation");
            return ContactResponse::invalid(errors).into_response();
        }
    };

    let config = state.config();
    let email = ContactEmail {
        from: &config.site.email_from,
        to: &config.site.contact_email,
        site_name: &config.site.name,
        contact: &contact,
    };

    if let Err(e) = state.mailer().send_contact(&email).await {
        let event_id = sentry::capture_error(&e);
        tracing::error!(error = %e, sentry_event_id = %event_id, "Failed to send contact email");
        return ContactResponse::failed(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to send message. Please try again.",
            codes::EMAIL_ERROR,
        )
        .into_response();
    }

    add_breadcrumb("contact", "Contact form submitted", None);
    tracing::info!("Contact form submitted");

    ContactResponse::accepted().into_response()
}
