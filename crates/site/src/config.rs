//! Site configuration loaded from environment variables.
//!
//! Configuration is read once at process start, validated, and handed to
//! [`AppState`](crate::state::AppState). Nothing else reads the environment.
//!
//! # Environment Variables
//!
//! ## Required in production
//! - `DATABASE_URL` - SQLite connection string (dev fallback: `sqlite://dev.db`)
//! - `AUTH_URL` - Public URL used by the auth provider
//! - `AUTH_SECRET` - Auth signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `SITE_ENV` - `development` (default), `production` or `test`
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `STRIPE_SECRET_KEY` - Stripe API secret key
//! - `STRIPE_PUBLISHABLE_KEY` - Stripe publishable key
//! - `STRIPE_WEBHOOK_SECRET` - Stripe webhook signing secret
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (default: `SITE_ENV`)
//! - `FLY_REGION` - Deployment region, reported by `/api/status`
//!
//! Empty or whitespace-only values are treated as unset.

use std::collections::HashMap;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Database used when `DATABASE_URL` is unset outside production.
pub const DEV_DATABASE_URL: &str = "sqlite://dev.db";

const MIN_AUTH_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Variables that must be present when running in production.
const REQUIRED_IN_PRODUCTION: &[&str] = &["DATABASE_URL", "AUTH_URL", "AUTH_SECRET"];

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
    #[error("Missing or empty required environment variables: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Runtime environment of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Runtime environment
    pub environment: Environment,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// SQLite connection URL, if configured
    pub database_url: Option<SecretString>,
    /// Auth provider configuration
    pub auth: AuthConfig,
    /// Stripe payment configuration
    pub payments: PaymentConfig,
    /// Deployment region (Fly.io)
    pub region: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Auth provider configuration.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Signing secret
    pub secret: Option<SecretString>,
    /// Public URL of the auth endpoints
    pub url: Option<Url>,
}

impl AuthConfig {
    /// Auth is usable only when both the secret and the URL are present.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.secret.is_some() && self.url.is_some()
    }
}

/// Stripe payment configuration.
#[derive(Debug, Clone, Default)]
pub struct PaymentConfig {
    /// Stripe API secret key (server-side only)
    pub secret_key: Option<SecretString>,
    /// Stripe publishable key (safe to expose in browser)
    pub publishable_key: Option<String>,
    /// Stripe webhook signing secret
    pub webhook_secret: Option<SecretString>,
}

impl PaymentConfig {
    /// Payments are considered configured when the secret key is present.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or, in production,
    /// if required variables are missing or secrets fail validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`SiteConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let environment = match get("SITE_ENV") {
            Some(value) => value
                .parse::<Environment>()
                .map_err(|e| ConfigError::InvalidEnvVar("SITE_ENV".to_string(), e))?,
            None => Environment::default(),
        };
        let host = get("SITE_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_HOST".to_string(), e.to_string()))?;
        let port = get("SITE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_PORT".to_string(), e.to_string()))?;

        let auth_url = get("AUTH_URL")
            .map(|value| Url::parse(&value))
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("AUTH_URL".to_string(), e.to_string()))?;

        let config = Self {
            environment,
            host,
            port,
            database_url: get("DATABASE_URL").map(SecretString::from),
            auth: AuthConfig {
                secret: get("AUTH_SECRET").map(SecretString::from),
                url: auth_url,
            },
            payments: PaymentConfig {
                secret_key: get("STRIPE_SECRET_KEY").map(SecretString::from),
                publishable_key: get("STRIPE_PUBLISHABLE_KEY"),
                webhook_secret: get("STRIPE_WEBHOOK_SECRET").map(SecretString::from),
            },
            region: get("FLY_REGION"),
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        };

        if config.environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Fail fast on anything a production deployment cannot run without.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let missing: Vec<&'static str> = REQUIRED_IN_PRODUCTION
            .iter()
            .copied()
            .filter(|key| match *key {
                "DATABASE_URL" => self.database_url.is_none(),
                "AUTH_URL" => self.auth.url.is_none(),
                "AUTH_SECRET" => self.auth.secret.is_none(),
                _ => false,
            })
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingRequired(missing));
        }

        if let Some(secret) = &self.auth.secret {
            validate_secret_length(secret, "AUTH_SECRET")?;
            validate_secret_strength(secret.expose_secret(), "AUTH_SECRET")?;
        }

        Ok(())
    }

    /// Optional payment variables that are not set.
    ///
    /// Payment features degrade without them, so production logs a warning.
    #[must_use]
    pub fn missing_optional(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.payments.secret_key.is_none() {
            missing.push("STRIPE_SECRET_KEY");
        }
        if self.payments.publishable_key.is_none() {
            missing.push("STRIPE_PUBLISHABLE_KEY");
        }
        if self.payments.webhook_secret.is_none() {
            missing.push("STRIPE_WEBHOOK_SECRET");
        }
        missing
    }

    /// The configured database URL, or the local development database.
    #[must_use]
    pub fn database_url_or_default(&self) -> SecretString {
        self.database_url
            .clone()
            .unwrap_or_else(|| SecretString::from(DEV_DATABASE_URL))
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Validate that a secret meets minimum length requirements.
fn validate_secret_length(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_AUTH_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_AUTH_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
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

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    const STRONG_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6vE8";

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    /// A development configuration with everything but Stripe set.
    pub(crate) fn dev_config() -> SiteConfig {
        SiteConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("AUTH_URL", "http://localhost:3000"),
            ("AUTH_SECRET", STRONG_SECRET),
        ]))
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = SiteConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(config.database_url.is_none());
        assert_eq!(
            config.database_url_or_default().expose_secret(),
            DEV_DATABASE_URL
        );
        assert!(!config.auth.is_configured());
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "   "),
            ("STRIPE_SECRET_KEY", ""),
        ]))
        .unwrap();
        assert!(config.database_url.is_none());
        assert!(!config.payments.is_configured());
    }

    #[test]
    fn test_production_reports_all_missing_required() {
        let err = SiteConfig::from_lookup(lookup_from(&[
            ("SITE_ENV", "production"),
            ("AUTH_URL", "https://bioarchitettura.it"),
        ]))
        .unwrap_err();
        match err {
            ConfigError::MissingRequired(missing) => {
                assert_eq!(missing, vec!["DATABASE_URL", "AUTH_SECRET"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_production_rejects_weak_auth_secret() {
        let err = SiteConfig::from_lookup(lookup_from(&[
            ("SITE_ENV", "production"),
            ("DATABASE_URL", "sqlite://prod.db"),
            ("AUTH_URL", "https://bioarchitettura.it"),
            ("AUTH_SECRET", "changeme-changeme-changeme-changeme"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_production_accepts_complete_config_without_stripe() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            ("SITE_ENV", "production"),
            ("DATABASE_URL", "sqlite://prod.db"),
            ("AUTH_URL", "https://bioarchitettura.it"),
            ("AUTH_SECRET", STRONG_SECRET),
        ]))
        .unwrap();
        assert!(config.environment.is_production());
        assert_eq!(
            config.missing_optional(),
            vec![
                "STRIPE_SECRET_KEY",
                "STRIPE_PUBLISHABLE_KEY",
                "STRIPE_WEBHOOK_SECRET"
            ]
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            SiteConfig::from_lookup(lookup_from(&[("SITE_PORT", "http")])),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            SiteConfig::from_lookup(lookup_from(&[("AUTH_URL", "not a url")])),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            SiteConfig::from_lookup(lookup_from(&[("SITE_ENV", "staging")])),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = SiteConfig::from_lookup(lookup_from(&[
            ("AUTH_SECRET", "super_secret_auth_value"),
            ("STRIPE_SECRET_KEY", "sk_live_super_secret"),
        ]))
        .unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("super_secret_auth_value"));
        assert!(!debug_output.contains("sk_live_super_secret"));
    }

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy(STRONG_SECRET) > MIN_ENTROPY_BITS_PER_CHAR);
    }

    #[test]
    fn test_secret_length() {
        let short = SecretString::from("short");
        assert!(validate_secret_length(&short, "AUTH_SECRET").is_err());
        let long = SecretString::from("a".repeat(32));
        assert!(validate_secret_length(&long, "AUTH_SECRET").is_ok());
    }
}
