//! CoClean configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DB_HOST` - `PostgreSQL` host
//! - `DB_USER` - `PostgreSQL` user
//! - `DB_PASS` - `PostgreSQL` password
//! - `DB_NAME` - `PostgreSQL` database name
//!
//! ## Optional
//! - `DB_PORT` - `PostgreSQL` port (default: 5432)
//! - `COCLEAN_HOST` - Bind address (default: 127.0.0.1)
//! - `COCLEAN_PORT` - Listen port (default: 3000)
//! - `COCLEAN_BASE_URL` - Public URL (default: http://<host>:<port>)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Database connection credentials.
///
/// Bundles everything needed to reach the `PostgreSQL` backend, built once
/// at startup from the `DB_*` environment variables and passed down
/// explicitly — nothing reads the environment after this point.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct DatabaseCredentials {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database user.
    pub user: String,
    /// Database password.
    pub password: SecretString,
    /// Database name.
    pub database: String,
}

impl std::fmt::Debug for DatabaseCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseCredentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

impl DatabaseCredentials {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: get_required_env("DB_HOST")?,
            port: parse_env_or_default("DB_PORT", "5432")?,
            user: get_required_env("DB_USER")?,
            password: SecretString::from(get_required_env("DB_PASS")?),
            database: get_required_env("DB_NAME")?,
        })
    }
}

/// CoClean application configuration.
#[derive(Debug, Clone)]
pub struct CoCleanConfig {
    /// Database connection credentials.
    pub database: DatabaseCredentials,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Public base URL; session cookies are marked secure iff this is https.
    pub base_url: String,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
}

impl CoCleanConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database = DatabaseCredentials::from_env()?;
        let host: IpAddr = parse_env_or_default("COCLEAN_HOST", "127.0.0.1")?;
        let port: u16 = parse_env_or_default("COCLEAN_PORT", "3000")?;
        let base_url =
            get_optional_env("COCLEAN_BASE_URL").unwrap_or_else(|| format!("http://{host}:{port}"));
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database,
            host,
            port,
            base_url,
            sentry_dsn,
        })
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

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default, parsed into `T`.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_credentials() -> DatabaseCredentials {
        DatabaseCredentials {
            host: "localhost".to_string(),
            port: 5432,
            user: "coclean".to_string(),
            password: SecretString::from("hunter2-but-longer"),
            database: "coclean".to_string(),
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = CoCleanConfig {
            database: test_credentials(),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = test_credentials();
        let debug_output = format!("{creds:?}");

        assert!(debug_output.contains("localhost"));
        assert!(debug_output.contains("coclean"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"));
    }
}
