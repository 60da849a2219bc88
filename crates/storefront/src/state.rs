//! Application state shared across handlers.

use std::sync::Arc;

use rapid_sites_core::Catalog;

use crate::config::StorefrontConfig;
use crate::services::{ContactMailer, LogMailer, MailerError, ResendMailer};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration, the product catalog, and the contact mailer.
/// Carts are not part of it: each visitor's cart lives in their session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    mailer: Arc<dyn ContactMailer>,
}

impl AppState {
    /// Create the production application state.
    ///
    /// Uses the Resend mailer when an API key is configured, otherwise logs
    /// contact submissions.
    ///
    /// # Errors
    ///
    /// Returns an error if the Resend client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, MailerError> {
        let mailer: Arc<dyn ContactMailer> = match &config.resend_api_key {
            Some(key) => Arc::new(ResendMailer::new(key)?),
            None => {
                tracing::warn!("RESEND_API_KEY not set; contact submissions will only be logged");
                Arc::new(LogMailer)
            }
        };

        Ok(Self::with_parts(config, Catalog::demo(), mailer))
    }

    /// Assemble state from explicit parts.
    #[must_use]
    pub fn with_parts(
        config: StorefrontConfig,
        catalog: Catalog,
        mailer: Arc<dyn ContactMailer>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                mailer,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the contact form mailer.
    #[must_use]
    pub fn mailer(&self) -> &dyn ContactMailer {
        self.inner.mailer.as_ref()
    }
}
