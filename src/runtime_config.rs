//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the review service.
//!
//! ## Environment Variables
//!
//! ### `PORT`
//!
//! Port to listen on. Default: `8000`.
//!
//! ### `REVIEWS_BIND_HOST`
//!
//! Host/interface to bind. Default: `0.0.0.0`.
//!
//! ### `REVIEWS_DATA_PATH`
//!
//! CSV dataset the store is seeded from at startup. Default:
//! `data/reviews.csv`. A missing or unreadable file is not fatal; the
//! service starts with no reviews.
//!
//! ### `REVIEWS_STACK_SIZE`
//!
//! Stack size for request coroutines. Accepts values in:
//! - Decimal: `16384` (16 KB)
//! - Hexadecimal: `0x4000` (16 KB)
//!
//! Default: `0x4000` (16 KB). Raise it for scorers with deep call chains.
//!
//! ## Usage
//!
//! ```rust
//! use review_analyzer::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Serving on {}", config.bind_address());
//! ```
//!
//! Invalid values fall back to the default with a warning rather than
//! stopping the service.

use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATA_PATH: &str = "data/reviews.csv";
pub const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub port: u16,
    pub host: String,
    pub data_path: PathBuf,
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(val) => val.trim().parse::<u16>().unwrap_or_else(|e| {
                warn!(value = %val, error = %e, "Invalid PORT, using default {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let host = lookup("REVIEWS_BIND_HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);

        let data_path = lookup("REVIEWS_DATA_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let stack_size = match lookup("REVIEWS_STACK_SIZE") {
            Some(val) => parse_stack_size(&val).unwrap_or_else(|| {
                warn!(value = %val, "Invalid REVIEWS_STACK_SIZE, using default");
                DEFAULT_STACK_SIZE
            }),
            None => defaults.stack_size,
        };

        RuntimeConfig {
            port,
            host,
            data_path,
            stack_size,
        }
    }

    /// `host:port` string suitable for [`crate::server::HttpServer::start`].
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal size.
#[must_use]
pub fn parse_stack_size(val: &str) -> Option<usize> {
    let val = val.trim();
    let parsed = match val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    };
    parsed.filter(|size| *size > 0)
}
