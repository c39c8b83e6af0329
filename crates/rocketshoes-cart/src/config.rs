//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ROCKETSHOES_API_URL` - Base URL of the stock/catalog API (default: http://localhost:3333)
//! - `ROCKETSHOES_STORAGE_DIR` - Directory holding the persisted cart (default: .rocketshoes)
//! - `ROCKETSHOES_HTTP_TIMEOUT_SECS` - Per-request timeout for the API (default: 10)
//! - `ROCKETSHOES_CHANNEL_CAPACITY` - Request queue size of the cart actor (default: 32)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const API_URL_VAR: &str = "ROCKETSHOES_API_URL";
pub const STORAGE_DIR_VAR: &str = "ROCKETSHOES_STORAGE_DIR";
pub const HTTP_TIMEOUT_VAR: &str = "ROCKETSHOES_HTTP_TIMEOUT_SECS";
pub const CHANNEL_CAPACITY_VAR: &str = "ROCKETSHOES_CHANNEL_CAPACITY";

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_DIR: &str = ".rocketshoes";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Runtime configuration of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Base URL of the stock/catalog API
    pub api_url: String,
    /// Directory for [`FileStorage`](crate::services::FileStorage)
    pub storage_dir: PathBuf,
    /// Timeout applied to each API request
    pub http_timeout: Duration,
    /// Capacity of the cart actor's request channel
    pub channel_capacity: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl CartConfig {
    /// Load configuration from the process environment.
    ///
    /// Does not read `.env`; the binary calls `dotenvy::dotenv()` before this.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for a value that does not parse or is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if api_url.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                API_URL_VAR.to_string(),
                "must not be empty".to_string(),
            ));
        }
        let storage_dir = lookup(STORAGE_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR));
        let timeout_secs = parse_positive(&lookup, HTTP_TIMEOUT_VAR, DEFAULT_HTTP_TIMEOUT_SECS)?;
        let channel_capacity =
            parse_positive(&lookup, CHANNEL_CAPACITY_VAR, DEFAULT_CHANNEL_CAPACITY)?;

        Ok(Self {
            api_url,
            storage_dir,
            http_timeout: Duration::from_secs(timeout_secs),
            channel_capacity,
        })
    }
}

/// Parse a numeric variable that must be greater than zero.
fn parse_positive<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if value == T::default() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(value)
}
