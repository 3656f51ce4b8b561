//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Deployment mode. Production cookies are `Secure` and cross-site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Environment::Production),
            "development" | "dev" | "local" => Some(Environment::Development),
            _ => None,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// PostgreSQL URL. When absent the server runs on the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub log_level: Level,
    pub token_secret: String,
    pub environment: Environment,
    pub allowed_origins: Vec<HeaderValue>,
}

const DEFAULT_PORT: &str = "5000";
const DEFAULT_ORIGINS: &str = "http://localhost:5173,http://localhost:5174";

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server and Database Settings ---
        let bind_address_str = match std::env::var("BIND_ADDRESS") {
            Ok(address) => address,
            Err(_) => {
                let port = std::env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
                format!("0.0.0.0:{}", port)
            }
        };
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let database_max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse::<u32>().map_err(|e| {
                ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string(), e.to_string())
            })?,
            Err(_) => 5,
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Auth Settings ---
        let token_secret = std::env::var("ACCESS_TOKEN_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| ConfigError::MissingVar("ACCESS_TOKEN_SECRET".to_string()))?;

        let environment_str =
            std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let environment = Environment::parse(&environment_str).ok_or_else(|| {
            ConfigError::InvalidValue(
                "APP_ENV".to_string(),
                format!("'{}' is neither 'development' nor 'production'", environment_str),
            )
        })?;

        // --- Load Cross-Origin Settings ---
        let origins_str =
            std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string());
        let allowed_origins = parse_origins(&origins_str)?;

        Ok(Self {
            bind_address,
            database_url,
            database_max_connections,
            log_level,
            token_secret,
            environment,
            allowed_origins,
        })
    }
}

/// Splits a comma separated origin list into header values.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::InvalidValue("CORS_ORIGINS".to_string(), e.to_string())
            })
        })
        .collect()
}
