//! Integration test harness for the Rapid Sites storefront.
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`,
//! carrying the session cookie between requests the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rapid-sites-integration-tests
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use tower::ServiceExt;

use rapid_sites_core::Catalog;
use rapid_sites_storefront::config::StorefrontConfig;
use rapid_sites_storefront::middleware::session::SESSION_COOKIE_NAME;
use rapid_sites_storefront::services::{ContactEmail, ContactMailer, MailerError};
use rapid_sites_storefront::state::AppState;

/// A mailer that records subjects instead of sending.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    subjects: Mutex<Vec<String>>,
}

impl RecordingMailer {
    /// Subjects of every email "sent" so far.
    #[must_use]
    pub fn subjects(&self) -> Vec<String> {
        self.subjects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ContactMailer for RecordingMailer {
    async fn send_contact(&self, email: &ContactEmail<'_>) -> Result<(), MailerError> {
        // Render both bodies so template errors surface in tests
        email.html()?;
        email.text()?;
        self.subjects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email.subject());
        Ok(())
    }
}

/// A mailer whose provider always rejects the message.
#[derive(Debug, Default)]
pub struct FailingMailer;

#[async_trait]
impl ContactMailer for FailingMailer {
    async fn send_contact(&self, _email: &ContactEmail<'_>) -> Result<(), MailerError> {
        Err(MailerError::Api {
            status: 503,
            message: "provider unavailable".to_string(),
        })
    }
}

/// Build the storefront router over the demo catalog.
pub fn app_with_mailer(mailer: Arc<dyn ContactMailer>) -> Router {
    app_with(Catalog::demo(), mailer)
}

/// Build the storefront router over an explicit catalog.
///
/// # Panics
///
/// Panics if the local demo configuration fails to parse.
#[allow(clippy::expect_used)]
pub fn app_with(catalog: Catalog, mailer: Arc<dyn ContactMailer>) -> Router {
    let config = StorefrontConfig::local().expect("local config is valid");
    let state = AppState::with_parts(config, catalog, mailer);
    rapid_sites_storefront::app(state)
}

/// A collected response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }

    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The `name=value` pair of the session cookie, if the response set one.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
            .map(str::to_string)
    }
}

/// A browser-like client: one router, one cookie jar holding the session.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    #[must_use]
    pub const fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Request::get(uri), Body::empty()).await
    }

    /// Send a form-encoded POST request.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let builder = Request::post(uri).header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        );
        self.send(builder, Body::from(form.to_string())).await
    }

    /// Send a JSON POST request with a raw body.
    pub async fn post_json(&mut self, uri: &str, json: &str) -> TestResponse {
        let builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        self.send(builder, Body::from(json.to_string())).await
    }

    /// Send a request built by the caller.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails, which only
    /// happens on a broken test.
    #[allow(clippy::expect_used)]
    pub async fn send(
        &mut self,
        mut builder: axum::http::request::Builder,
        body: Body,
    ) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.as_str());
        }
        let request = builder.body(body).expect("valid request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        let response = TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        };

        if let Some(cookie) = response.session_cookie() {
            self.cookie = Some(cookie);
        }

        response
    }
}
