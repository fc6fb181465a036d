// src/config.rs

use std::{env, fmt, net::IpAddr};

use dotenvy::dotenv;

/// Seconds a client gets to finish the quiz before answers are force-submitted.
pub const QUIZ_TIME_LIMIT_SECS: u64 = 300;

/// Times the server retries the initial database connection before giving up.
pub const DB_CONNECT_RETRIES: u32 = 5;

const DEFAULT_DATABASE_URL: &str = "sqlite://quiz.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub rust_log: String,
    pub cors_origin: String,
    /// Bearer token guarding the admin API. The admin routes are not mounted when unset.
    pub admin_token: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidVar { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidVar { name, value } => {
                write!(f, "invalid value for {}: {:?}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let host = match lookup("HOST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "HOST",
                value: raw,
            })?,
            None => DEFAULT_HOST.parse().map_err(|_| ConfigError::InvalidVar {
                name: "HOST",
                value: DEFAULT_HOST.to_string(),
            })?,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let rust_log = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let cors_origin =
            lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let admin_token = lookup("ADMIN_TOKEN").filter(|t| !t.trim().is_empty());

        Ok(Self {
            database_url,
            host,
            port,
            rust_log,
            cors_origin,
            admin_token,
        })
    }
}
