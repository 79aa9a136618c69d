//! Runtime configuration, read from the environment (and `.env` when present).

use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use thiserror::Error;

const DEFAULT_MONGODB_DATABASE: &str = "registration";
const DEFAULT_UPLOAD_DIR: &str = "image_uploads";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },

    #[error("failed to read .env file: {0}")]
    EnvFile(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Relational store connection string.
    pub database_url: String,
    /// Document store connection string.
    pub mongodb_url: String,
    pub mongodb_database: String,
    /// Directory receiving uploaded pictures.
    pub upload_dir: PathBuf,
    pub bind_address: SocketAddr,
    pub max_connections: u32,
    /// Body limit applied to registration requests.
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Load from the process environment after sourcing `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        source_env_file(dotenvy::dotenv())?;
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let or_default =
            |key: &'static str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            mongodb_url: required("MONGODB_URL")?,
            mongodb_database: or_default("MONGODB_DATABASE", DEFAULT_MONGODB_DATABASE),
            upload_dir: PathBuf::from(or_default("UPLOAD_DIR", DEFAULT_UPLOAD_DIR)),
            bind_address: parse("BIND_ADDRESS", or_default("BIND_ADDRESS", DEFAULT_BIND_ADDRESS))?,
            max_connections: match lookup("DB_MAX_CONNECTIONS") {
                Some(value) => parse("DB_MAX_CONNECTIONS", value)?,
                None => DEFAULT_MAX_CONNECTIONS,
            },
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(value) => parse("MAX_UPLOAD_BYTES", value)?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

/// A missing `.env` is fine since the variables may be set directly; an
/// unreadable or malformed one is not.
fn source_env_file<T>(loaded: dotenvy::Result<T>) -> Result<(), ConfigError> {
    match loaded {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::EnvFile(err.to_string())),
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
