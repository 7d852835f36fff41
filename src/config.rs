//! Configuration for album-dl
//!
//! All configuration comes from the process environment; there is no config
//! file. The two required variables identify the portal and authenticate the
//! listing requests. Media downloads themselves are unauthenticated.

use crate::error::{Error, Result};
use std::path::PathBuf;
use url::Url;

/// Environment variable naming the portal API base URL
pub const ENV_API_BASE_URL: &str = "API_BASE_URL";

/// Environment variable holding the bearer token for listing requests
pub const ENV_AUTH_TOKEN: &str = "AUTH_TOKEN";

/// Base directory for downloaded media, relative to the working directory
pub const MEDIA_DIR: &str = "media";

/// Runtime configuration, constructed once at startup and passed explicitly
/// to the components that need it
#[derive(Clone, Debug)]
pub struct Config {
    /// Portal API base URL (e.g., `https://portal.example.com`)
    pub api_base: Url,
    /// Bearer token sent with listing requests
    pub auth_token: String,
    /// Directory under which dated media subdirectories are created
    pub media_root: PathBuf,
}

impl Config {
    /// Build a configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `API_BASE_URL` or `AUTH_TOKEN` is unset
    /// or empty, or if `API_BASE_URL` is not a valid absolute URL.
    pub fn from_env() -> Result<Self> {
        let api_base = required_var(ENV_API_BASE_URL)?;
        let auth_token = required_var(ENV_AUTH_TOKEN)?;

        let api_base = Url::parse(&api_base).map_err(|e| Error::Config {
            message: format!("{ENV_API_BASE_URL} is not a valid URL: {e}"),
            key: Some(ENV_API_BASE_URL.to_string()),
        })?;

        Ok(Self {
            api_base,
            auth_token,
            media_root: PathBuf::from(MEDIA_DIR),
        })
    }
}

/// Read a required environment variable, treating empty values as unset
fn required_var(key: &'static str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Config {
            message: format!("{key} environment variable is not set"),
            key: Some(key.to_string()),
        }),
    }
}
