//! Server configuration from environment variables.
//!
//! Required: `BOUTIQUE_DATABASE_URL` (falls back to plain `DATABASE_URL`)
//! and `BOUTIQUE_JWT_SECRET`. Optional: `BOUTIQUE_HOST` (default 127.0.0.1),
//! `BOUTIQUE_PORT` (default 5000), `BOUTIQUE_CORS_ORIGIN`, `SENTRY_DSN`.
//!
//! The JWT secret is refused if it looks like a placeholder or has low
//! entropy - a misconfigured signing secret silently breaks every token the
//! server ever issues, so it fails loudly at startup instead.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Substrings that mark a secret as a placeholder (checked lowercased).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
];

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Boutique API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Postgres connection string (contains credentials).
    pub database_url: SecretString,
    /// Bind address.
    pub host: IpAddr,
    /// Listen port.
    pub port: u16,
    /// Bearer token signing secret.
    pub jwt_secret: SecretString,
    /// Allowed CORS origin for browser clients, if restricted.
    pub cors_origin: Option<String>,
    /// Sentry DSN, error tracking disabled when unset.
    pub sentry_dsn: Option<String>,
}

impl ApiConfig {
    /// Load configuration from the environment, reading `.env` first when
    /// one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a missing or unparsable variable, or a JWT
    /// secret that fails the strength checks.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let database_url = database_url_from_env()?;

        let host = env_or("BOUTIQUE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BOUTIQUE_HOST".to_string(), e.to_string()))?;
        let port = env_or("BOUTIQUE_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BOUTIQUE_PORT".to_string(), e.to_string()))?;

        let jwt_secret = jwt_secret_from_env("BOUTIQUE_JWT_SECRET")?;

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            cors_origin: std::env::var("BOUTIQUE_CORS_ORIGIN").ok(),
            sentry_dsn: std::env::var("SENTRY_DSN").ok(),
        })
    }

    /// Address to bind the listener to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// `BOUTIQUE_DATABASE_URL`, or `DATABASE_URL` when only the generic name is
/// set (the form most Postgres tooling writes).
fn database_url_from_env() -> Result<SecretString, ConfigError> {
    std::env::var("BOUTIQUE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar("BOUTIQUE_DATABASE_URL".to_string()))
}

/// Read and fully vet the signing secret: present, long enough, not a
/// placeholder, and with enough entropy to plausibly be random.
fn jwt_secret_from_env(key: &str) -> Result<SecretString, ConfigError> {
    let value =
        std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))?;

    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!(
                "must be at least {MIN_JWT_SECRET_LENGTH} characters (got {})",
                value.len()
            ),
        ));
    }

    validate_secret_strength(&value, key)?;

    Ok(SecretString::from(value))
}

/// Reject placeholder-looking and low-entropy secrets.
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
                "entropy too low ({entropy:.2} bits/char, need >= \
                 {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Shannon entropy of the string, in bits per character.
#[allow(clippy::cast_precision_loss)] // secret lengths are far below f64 precision
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_of_uniform_string_is_zero() {
        assert!(shannon_entropy("aaaaaaa").abs() < f64::EPSILON);
    }

    #[test]
    fn test_entropy_of_two_symbols() {
        // 50/50 split over two characters is exactly 1 bit per char.
        assert!((shannon_entropy("abab") - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_placeholder_secret_rejected() {
        let result = validate_secret_strength("your-jwt-key-here-your-jwt-key-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_low_entropy_secret_rejected() {
        let result = validate_secret_strength(&"ab".repeat(20), "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_random_looking_secret_accepted() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_socket_addr_combines_host_and_port() {
        let config = ApiConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "0.0.0.0".parse().unwrap(),
            port: 5000,
            jwt_secret: SecretString::from("x".repeat(32)),
            cors_origin: None,
            sentry_dsn: None,
        };

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
    }
}
