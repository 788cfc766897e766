//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional. Without any configuration the server runs on
//! `127.0.0.1:3000` against the bundled catalog fixtures.
//!
//! - `NANASU_HOST` - Bind address (default: 127.0.0.1)
//! - `NANASU_PORT` - Listen port (default: 3000)
//! - `NANASU_CATALOG_API_URL` - Remote catalog API; switches to the HTTP backend
//! - `NANASU_CATALOG_API_TOKEN` - Bearer token for the remote catalog API
//! - `NANASU_CATALOG_TIMEOUT_SECS` - Remote request timeout (default: 10)
//! - `NANASU_CATALOG_FIXTURES` - Path to a JSON fixture file (default: bundled)
//! - `NANASU_CATALOG_LATENCY_MS` - Simulated latency, `min-max` or a single value
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

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
    /// Where catalog data comes from
    pub catalog: CatalogConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production", "staging")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Catalog backend selection.
#[derive(Debug, Clone)]
pub enum CatalogConfig {
    /// In-memory fixtures, optionally with simulated latency.
    Fixtures {
        /// JSON fixture file; `None` uses the bundled catalog.
        path: Option<PathBuf>,
        latency: Option<Latency>,
    },
    /// Remote catalog API.
    Http(CatalogApiConfig),
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::Fixtures {
            path: None,
            latency: None,
        }
    }
}

/// Remote catalog API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CatalogApiConfig {
    /// Base URL, e.g. `https://api.nanasu.id/v1`
    pub base_url: Url,
    /// Bearer token, if the API requires one
    pub api_token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for CatalogApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Range an artificial delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub min: Duration,
    pub max: Duration,
}

impl Latency {
    /// Parse `"200-500"` or `"300"` (milliseconds).
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the value is malformed or
    /// the range is inverted.
    pub fn parse(value: &str) -> Result<Self, String> {
        let parse_ms = |s: &str| {
            s.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| format!("'{}' is not a number of milliseconds: {e}", s.trim()))
        };

        let (min, max) = match value.split_once('-') {
            Some((min, max)) => (parse_ms(min)?, parse_ms(max)?),
            None => {
                let fixed = parse_ms(value)?;
                (fixed, fixed)
            }
        };

        if min > max {
            return Err(format!("minimum {min:?} exceeds maximum {max:?}"));
        }

        Ok(Self { min, max })
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

        let host = parse_env("NANASU_HOST", "127.0.0.1")?;
        let port = parse_env("NANASU_PORT", "3000")?;
        let catalog = CatalogConfig::from_env()?;

        Ok(Self {
            host,
            port,
            catalog,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for StorefrontConfig {
    /// Localhost, bundled fixtures, Sentry disabled.
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            catalog: CatalogConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl CatalogConfig {
    /// Load the catalog backend selection from environment variables.
    ///
    /// Does not read `.env`; callers that want that call `dotenvy` first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the API URL, timeout or latency is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Some(raw_url) = get_optional_env("NANASU_CATALOG_API_URL") {
            let base_url = parse_base_url(&raw_url)
                .map_err(|e| ConfigError::InvalidEnvVar("NANASU_CATALOG_API_URL".to_string(), e))?;
            let timeout_secs: u64 =
                parse_env("NANASU_CATALOG_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string())?;

            return Ok(Self::Http(CatalogApiConfig {
                base_url,
                api_token: get_optional_env("NANASU_CATALOG_API_TOKEN").map(SecretString::from),
                timeout: Duration::from_secs(timeout_secs),
            }));
        }

        let latency = get_optional_env("NANASU_CATALOG_LATENCY_MS")
            .map(|value| Latency::parse(&value))
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("NANASU_CATALOG_LATENCY_MS".to_string(), e))?;

        Ok(Self::Fixtures {
            path: get_optional_env("NANASU_CATALOG_FIXTURES").map(PathBuf::from),
            latency,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to a default.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse and check a catalog API base URL.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.cannot_be_a_base() {
        return Err("URL cannot be used as a base".to_string());
    }
    Ok(url)
}
