//! Configuration Module
//!
//! Handles loading and validating server configuration from environment variables.

use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::cache::{DEFAULT_MAX_SUMMARIES, DEFAULT_SUMMARY_TTL_SECS};

/// Default base URL of the Generative Language REST API.
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// == Config Error ==
/// Errors raised while reading configuration at startup.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// A required variable is absent or blank
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is present but cannot be parsed
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

// == Store Backend ==
/// Which review store implementation to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Server configuration parameters.
///
/// Everything except the provider API key has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Review store implementation
    pub store_backend: StoreBackend,
    /// MongoDB connection string
    pub mongo_uri: String,
    /// Database holding the review collection
    pub database_name: String,
    /// Review collection name
    pub collection_name: String,
    /// Store connection-establishment timeout in seconds
    pub store_connect_timeout: u64,
    /// Text-generation provider API key
    pub gemini_api_key: String,
    /// Text-generation model name
    pub gemini_model: String,
    /// Text-generation API base URL
    pub gemini_api_url: String,
    /// Summarizer request timeout in seconds
    pub summarizer_timeout: u64,
    /// Summary cache TTL in seconds
    pub cache_ttl: u64,
    /// Maximum number of cached summaries
    pub cache_max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Variables from a `.env` file are visible here once the binary has
    /// loaded it with `dotenvy`.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 5000)
    /// - `STORE_BACKEND` - `mongo` or `memory` (default: mongo)
    /// - `MONGO_URI` - store connection string (default: mongodb://localhost:27017)
    /// - `DATABASE_NAME` - database name (default: reviews)
    /// - `COLLECTION_NAME` - collection name (default: reviews)
    /// - `STORE_CONNECT_TIMEOUT` - seconds (default: 5)
    /// - `GEMINI_API_KEY` - provider key (required)
    /// - `GEMINI_MODEL` - model name (default: gemini-1.5-flash)
    /// - `GEMINI_API_URL` - provider base URL
    /// - `SUMMARIZER_TIMEOUT` - seconds (default: 30)
    /// - `SUMMARY_CACHE_TTL` - seconds (default: 3600)
    /// - `SUMMARY_CACHE_MAX_ENTRIES` - entries (default: 100)
    /// - `CLEANUP_INTERVAL` - seconds (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let gemini_api_key = lookup("GEMINI_API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let store_backend = match lookup("STORE_BACKEND") {
            Some(raw) => raw.parse::<StoreBackend>().map_err(|_| ConfigError::Invalid {
                name: "STORE_BACKEND",
                value: raw,
            })?,
            None => defaults.store_backend,
        };

        let cache_max_entries = parse_or(&lookup, "SUMMARY_CACHE_MAX_ENTRIES", defaults.cache_max_entries)?;
        if cache_max_entries == 0 {
            return Err(ConfigError::Invalid {
                name: "SUMMARY_CACHE_MAX_ENTRIES",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            server_port: parse_or(&lookup, "SERVER_PORT", defaults.server_port)?,
            store_backend,
            mongo_uri: lookup("MONGO_URI").unwrap_or(defaults.mongo_uri),
            database_name: lookup("DATABASE_NAME").unwrap_or(defaults.database_name),
            collection_name: lookup("COLLECTION_NAME").unwrap_or(defaults.collection_name),
            store_connect_timeout: parse_or(&lookup, "STORE_CONNECT_TIMEOUT", defaults.store_connect_timeout)?,
            gemini_api_key,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_url: lookup("GEMINI_API_URL").unwrap_or(defaults.gemini_api_url),
            summarizer_timeout: parse_or(&lookup, "SUMMARIZER_TIMEOUT", defaults.summarizer_timeout)?,
            cache_ttl: parse_or(&lookup, "SUMMARY_CACHE_TTL", defaults.cache_ttl)?,
            cache_max_entries,
            cleanup_interval: parse_or(&lookup, "CLEANUP_INTERVAL", defaults.cleanup_interval)?,
        })
    }
}

/// Parses an optional variable, falling back to `default` when unset.
fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}

impl Default for Config {
    /// Defaults for every field; the API key is left empty and must be supplied.
    fn default() -> Self {
        Self {
            server_port: 5000,
            store_backend: StoreBackend::Mongo,
            mongo_uri: "mongodb://localhost:27017".to_string(),
            database_name: "reviews".to_string(),
            collection_name: "reviews".to_string(),
            store_connect_timeout: 5,
            gemini_api_key: String::new(),
            gemini_model: "gemini-1.5-flash".to_string(),
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
            summarizer_timeout: 30,
            cache_ttl: DEFAULT_SUMMARY_TTL_SECS,
            cache_max_entries: DEFAULT_MAX_SUMMARIES,
            cleanup_interval: 60,
        }
    }
}
