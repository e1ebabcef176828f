//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DATABASE_ACQUIRE_TIMEOUT_MS, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_DATABASE_STATEMENT_TIMEOUT_MS, DEFAULT_JWT_EXPIRY_HOURS, DEFAULT_QUEUE_BASE_BACKOFF_MS,
    DEFAULT_QUEUE_MAX_BACKOFF_MS, DEFAULT_QUEUE_MAX_RECONNECT_ATTEMPTS, DEFAULT_QUEUE_TIMEOUT_MS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub dispatch: DispatchConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// How long a request waits for a pooled connection
    pub acquire_timeout: Duration,
    /// Server-side bound on every statement
    pub statement_timeout: Duration,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

/// Judge dispatch configuration
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Upper bound for a single ping, reconnect or push
    pub queue_timeout: Duration,
    /// Reconnect attempts after the first failed liveness probe
    pub max_reconnect_attempts: u32,
    pub base_backoff: Duration,
    pub max_backoff: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            dispatch: DispatchConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_or("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
            acquire_timeout: Duration::from_millis(parse_or(
                "DATABASE_ACQUIRE_TIMEOUT_MS",
                DEFAULT_DATABASE_ACQUIRE_TIMEOUT_MS,
            )?),
            statement_timeout: Duration::from_millis(parse_or(
                "DATABASE_STATEMENT_TIMEOUT_MS",
                DEFAULT_DATABASE_STATEMENT_TIMEOUT_MS,
            )?),
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_hours: parse_or("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
        })
    }
}

impl DispatchConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            queue_timeout: Duration::from_millis(parse_or("QUEUE_TIMEOUT_MS", DEFAULT_QUEUE_TIMEOUT_MS)?),
            max_reconnect_attempts: parse_or(
                "QUEUE_MAX_RECONNECT_ATTEMPTS",
                DEFAULT_QUEUE_MAX_RECONNECT_ATTEMPTS,
            )?,
            base_backoff: Duration::from_millis(parse_or(
                "QUEUE_BASE_BACKOFF_MS",
                DEFAULT_QUEUE_BASE_BACKOFF_MS,
            )?),
            max_backoff: Duration::from_millis(parse_or(
                "QUEUE_MAX_BACKOFF_MS",
                DEFAULT_QUEUE_MAX_BACKOFF_MS,
            )?),
        };

        if config.queue_timeout.is_zero() {
            return Err(ConfigError::InvalidValue("QUEUE_TIMEOUT_MS".to_string()));
        }
        if config.max_backoff < config.base_backoff {
            return Err(ConfigError::InvalidValue("QUEUE_MAX_BACKOFF_MS".to_string()));
        }

        Ok(config)
    }
}

/// Read an optional variable, falling back to `default` when it is unset
fn parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_parse_or_falls_back_when_unset() {
        let value: u32 = parse_or("ONLINEJUDGE_TEST_SURELY_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }
}
