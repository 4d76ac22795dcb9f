use std::env;

use axum::http::HeaderValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("CORS_HOST is not a valid header value: {0:?}")]
    InvalidCorsHost(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_bind_addr: String,
    pub cors_host: HeaderValue,
    pub sentry_dsn: String,
    pub log_filter: String,
    pub history_size: usize,
    pub concurrency_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_bind_addr: "0.0.0.0:8000".to_string(),
            cors_host: HeaderValue::from_static("http://localhost:3000"),
            sentry_dsn: String::new(),
            log_filter: "info".to_string(),
            history_size: 5,
            concurrency_limit: 1000,
        }
    }
}

impl Config {
    pub fn init() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_bind_addr = lookup("SERVER_BIND").unwrap_or(defaults.server_bind_addr);
        let sentry_dsn = lookup("SENTRY_DSN").unwrap_or(defaults.sentry_dsn);
        let log_filter = lookup("RUST_LOG").unwrap_or(defaults.log_filter);

        let cors_host = match lookup("CORS_HOST") {
            Some(host) => host
                .parse::<HeaderValue>()
                .map_err(|_| ConfigError::InvalidCorsHost(host))?,
            None => defaults.cors_host,
        };

        let history_size = match lookup("HISTORY_SIZE") {
            Some(value) => parse_positive("HISTORY_SIZE", value)?,
            None => defaults.history_size,
        };
        let concurrency_limit = match lookup("CONCURRENCY_LIMIT") {
            Some(value) => parse_positive("CONCURRENCY_LIMIT", value)?,
            None => defaults.concurrency_limit,
        };

        Ok(Self {
            server_bind_addr,
            cors_host,
            sentry_dsn,
            log_filter,
            history_size,
            concurrency_limit,
        })
    }
}

fn parse_positive(key: &'static str, value: String) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber { key, value }),
    }
}
