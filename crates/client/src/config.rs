//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DZ_BACKEND_URL` - Base URL of the hosted data backend
//! - `DZ_BACKEND_ANON_KEY` - Public (anon) API key for the backend
//!
//! ## Optional
//! - `DZ_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 15)
//! - `DZ_SIGN_IN_PATH` - Where anonymous visitors are sent (default: /auth)
//! - `DZ_LANDING_PATH` - Where unprivileged users are sent (default: /)
//! - `DZ_PROGRESS_AUTO_HIDE_MS` - Delay before a completed progress dialog hides (default: 1000)

use std::collections::HashMap;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
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
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Complete client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Hosted backend connection settings
    pub backend: BackendConfig,
    /// Redirect targets used by the access gate
    pub routes: RouteConfig,
    /// Progress dialog behaviour
    pub progress: ProgressConfig,
}

/// Hosted data backend configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL of the backend (always ends with `/`)
    pub url: Url,
    /// Public (anon) API key, sent with every request
    pub anon_key: SecretString,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url.as_str())
            .field("anon_key", &"[REDACTED]")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Navigation targets used by the access gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    /// Sign-in page for anonymous visitors
    pub sign_in_path: String,
    /// Default authenticated landing page
    pub landing_path: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            sign_in_path: "/auth".to_string(),
            landing_path: "/".to_string(),
        }
    }
}

/// Progress dialog configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressConfig {
    /// How long a completed dialog stays visible
    pub auto_hide: Duration,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            auto_hide: Duration::from_millis(1000),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the API key fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend = BackendConfig::from_env()?;

        let routes = RouteConfig {
            sign_in_path: get_env_or_default("DZ_SIGN_IN_PATH", "/auth"),
            landing_path: get_env_or_default("DZ_LANDING_PATH", "/"),
        };

        let auto_hide_ms = get_env_or_default("DZ_PROGRESS_AUTO_HIDE_MS", "1000")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("DZ_PROGRESS_AUTO_HIDE_MS".to_string(), e.to_string())
            })?;

        Ok(Self {
            backend,
            routes,
            progress: ProgressConfig {
                auto_hide: Duration::from_millis(auto_hide_ms),
            },
        })
    }
}

impl BackendConfig {
    /// Build a backend configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL cannot be parsed or is
    /// not `http`/`https`.
    pub fn new(url: &str, anon_key: SecretString) -> Result<Self, ConfigError> {
        Ok(Self {
            url: parse_base_url("DZ_BACKEND_URL", url)?,
            anon_key,
            request_timeout: Duration::from_secs(15),
        })
    }

    fn from_env() -> Result<Self, ConfigError> {
        let url = get_required_env("DZ_BACKEND_URL")?;
        let anon_key = get_validated_secret("DZ_BACKEND_ANON_KEY")?;
        let timeout_secs = get_env_or_default("DZ_REQUEST_TIMEOUT_SECS", "15")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("DZ_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            request_timeout: Duration::from_secs(timeout_secs),
            ..Self::new(&url, anon_key)?
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a base URL, normalising it to end with `/` so joins append.
fn parse_base_url(var_name: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
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
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
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

    // Real API keys (JWTs, random tokens) have high entropy
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Copy the key from the backend dashboard."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

/// Expose a secret for a header value.
pub(crate) fn bearer(secret: &SecretString) -> String {
    format!("Bearer {}", secret.expose_secret())
}
