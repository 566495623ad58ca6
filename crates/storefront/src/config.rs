//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `STOREFRONT_CATALOG_PATH` - JSON product catalog (default: embedded catalog)
//! - `STOREFRONT_STATIC_DIR` - Directory served under `/static` (default: the
//!   crate's `static/` directory)
//! - `STOREFRONT_CHECKOUT_DELAY_MS` - Delay between order placement and
//!   confirmation (default: 1000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CHECKOUT_DELAY_MS: u64 = 1000;
const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
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
    /// Product catalog file; the embedded catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Directory of stylesheets and images served under `/static`
    pub static_dir: PathBuf,
    /// Checkout flow settings
    pub checkout: CheckoutConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Checkout flow configuration.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutConfig {
    /// Time between accepting an order and confirming it.
    pub confirmation_delay: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            confirmation_delay: Duration::from_millis(DEFAULT_CHECKOUT_DELAY_MS),
        }
    }
}

impl Default for StorefrontConfig {
    #[allow(clippy::unwrap_used)] // DEFAULT_BASE_URL is a valid URL
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            base_url: Url::parse(DEFAULT_BASE_URL).unwrap(),
            catalog_path: None,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            checkout: CheckoutConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or("STOREFRONT_HOST", &lookup, IpAddr::V4(Ipv4Addr::LOCALHOST))?;
        let port = parse_or("STOREFRONT_PORT", &lookup, DEFAULT_PORT)?;
        let base_url = lookup("STOREFRONT_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;
        let catalog_path = lookup("STOREFRONT_CATALOG_PATH").map(PathBuf::from);
        let static_dir = lookup("STOREFRONT_STATIC_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);
        let delay_ms = parse_or(
            "STOREFRONT_CHECKOUT_DELAY_MS",
            &lookup,
            DEFAULT_CHECKOUT_DELAY_MS,
        )?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog_path,
            static_dir,
            checkout: CheckoutConfig {
                confirmation_delay: Duration::from_millis(delay_ms),
            },
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_rate("SENTRY_SAMPLE_RATE", &lookup, 1.0)?,
            sentry_traces_sample_rate: parse_rate("SENTRY_TRACES_SAMPLE_RATE", &lookup, 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (controls secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when it is unset.
fn parse_or<T>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a sample rate in `0.0..=1.0`.
fn parse_rate(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: f32,
) -> Result<f32, ConfigError> {
    let rate = parse_or(key, lookup, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}
