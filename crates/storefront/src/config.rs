//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run a local demo site.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: http://localhost:3000)
//! - `SITE_NAME` - Tenant display name (default: Rapid Sites)
//! - `CONTACT_EMAIL` - Where contact form submissions are delivered
//! - `EMAIL_FROM` - Sender address for outgoing mail
//! - `RESEND_API_KEY` - Resend API key; without it submissions are only logged
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use rapid_sites_core::Email;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Tenant identity and mail routing
    pub site: SiteConfig,
    /// Resend API key for contact form delivery
    pub resend_api_key: Option<SecretString>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g., "production")
    pub sentry_environment: Option<String>,
}

/// Per-tenant site settings.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Display name used in page titles and email subjects
    pub name: String,
    /// Inbox that receives contact form submissions
    pub contact_email: Email,
    /// Sender address for outgoing mail
    pub email_from: Email,
}

impl StorefrontConfig {
    /// Configuration for a local demo site, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a built-in default fails to parse.
    pub fn local() -> Result<Self, ConfigError> {
        Self::from_source(&|_| None)
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or if the Resend API
    /// key fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_source(&|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    fn from_source(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_var(env, "STOREFRONT_HOST", "127.0.0.1", str::parse::<IpAddr>)?;
        let port = parse_var(env, "STOREFRONT_PORT", "3000", str::parse::<u16>)?;
        let base_url = parse_var(env, "STOREFRONT_BASE_URL", "http://localhost:3000", Url::parse)?;

        let site = SiteConfig {
            name: env("SITE_NAME").unwrap_or_else(|| "Rapid Sites".to_string()),
            contact_email: parse_var(env, "CONTACT_EMAIL", "contact@rapidsites.dev", Email::parse)?,
            email_from: parse_var(env, "EMAIL_FROM", "noreply@rapidsites.dev", Email::parse)?,
        };

        let resend_api_key = env("RESEND_API_KEY")
            .filter(|key| !key.is_empty())
            .map(|key| {
                validate_secret_strength(&key, "RESEND_API_KEY")?;
                Ok::<_, ConfigError>(SecretString::from(key))
            })
            .transpose()?;

        Ok(Self {
            host,
            port,
            base_url,
            site,
            resend_api_key,
            sentry_dsn: env("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS (controls secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Read a variable (or its default) and parse it.
fn parse_var<T, E: std::fmt::Display>(
    env: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, ConfigError> {
    let value = env(key).unwrap_or_else(|| default.to_string());
    parse(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_source(&|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::local().unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.site.name, "Rapid Sites");
        assert_eq!(config.site.contact_email.as_str(), "contact@rapidsites.dev");
        assert!(config.resend_api_key.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_local_matches_empty_environment() {
        let local = StorefrontConfig::local().unwrap();
        let empty = load(&[]).unwrap();

        assert_eq!(local.socket_addr(), empty.socket_addr());
        assert_eq!(local.base_url, empty.base_url);
        assert_eq!(local.site.email_from.as_str(), "noreply@rapidsites.dev");
        assert_eq!(local.site.email_from.as_str(), empty.site.email_from.as_str());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_BASE_URL", "https://shop.example.org"),
            ("SITE_NAME", "Bean There"),
            ("CONTACT_EMAIL", "hello@beanthere.co"),
            ("RESEND_API_KEY", "re_aB3$xY9!mK2@nL5#pQ7&rT0"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.is_secure());
        assert_eq!(config.site.name, "Bean There");
        assert_eq!(config.site.contact_email.as_str(), "hello@beanthere.co");
        assert_eq!(
            config.resend_api_key.unwrap().expose_secret(),
            "re_aB3$xY9!mK2@nL5#pQ7&rT0"
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_invalid_contact_email() {
        let err = load(&[("CONTACT_EMAIL", "inbox")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CONTACT_EMAIL"));
    }

    #[test]
    fn test_empty_api_key_is_absent() {
        let config = load(&[("RESEND_API_KEY", "")]).unwrap();
        assert!(config.resend_api_key.is_none());
    }

    #[test]
    fn test_placeholder_api_key_rejected() {
        let err = load(&[("RESEND_API_KEY", "your-api-key-here")]).unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy("aB3$xY9!mK2@nL5#") > 3.3);
    }

    #[test]
    fn test_low_entropy_secret_rejected() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }
}
