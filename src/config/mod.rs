//! Configuration management for the Aikido MCP server
//!
//! Credentials come from the process environment, optionally seeded from a
//! `.env` file. Missing credentials are not an error here; they surface on the
//! first API call so the server can still start and list its tools.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;

use crate::error::{ConfigError, Result};

/// Environment variable holding the OAuth client id
pub const CLIENT_ID_ENV: &str = "AIKIDO_CLIENT_ID";

/// Environment variable holding the OAuth client secret
pub const CLIENT_SECRET_ENV: &str = "AIKIDO_CLIENT_SECRET";

/// Environment variable selecting the region (`eu`, `us`, `me`)
pub const REGION_ENV: &str = "AIKIDO_REGION";

/// Environment variable overriding the regional API base URL
pub const BASE_URL_ENV: &str = "AIKIDO_API_BASE_URL";

/// Aikido deployment region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Region {
    /// European Union (app.aikido.dev)
    #[default]
    Eu,
    /// United States
    Us,
    /// Middle East
    Me,
}

impl Region {
    /// Base URL of the public API for this region
    pub fn base_url(&self) -> &'static str {
        match self {
            Region::Eu => "https://app.aikido.dev/api",
            Region::Us => "https://app.us.aikido.dev/api",
            Region::Me => "https://app.me.aikido.dev/api",
        }
    }

    /// Parse an optional region setting. Unset or blank means the default.
    pub fn from_setting(value: Option<&str>) -> std::result::Result<Self, ConfigError> {
        match value {
            Some(v) if !v.trim().is_empty() => v.parse(),
            _ => Ok(Region::default()),
        }
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eu" => Ok(Region::Eu),
            "us" => Ok(Region::Us),
            "me" => Ok(Region::Me),
            other => Err(ConfigError::InvalidRegion(other.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Eu => "eu",
            Region::Us => "us",
            Region::Me => "me",
        };
        f.write_str(name)
    }
}

/// OAuth client credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    /// Build credentials from raw values, treating missing or blank values as absent.
    pub fn from_values(client_id: Option<String>, client_secret: Option<String>) -> Option<Self> {
        let client_id = client_id.filter(|v| !v.trim().is_empty())?;
        let client_secret = client_secret.filter(|v| !v.trim().is_empty())?;
        Some(Self {
            client_id,
            client_secret,
        })
    }

    /// Read credentials from the process environment.
    pub fn from_env() -> Option<Self> {
        Self::from_values(
            std::env::var(CLIENT_ID_ENV).ok(),
            std::env::var(CLIENT_SECRET_ENV).ok(),
        )
    }
}

// Keep the secret out of debug logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API base URL without trailing slash (e.g. `https://app.aikido.dev/api`)
    pub base_url: String,

    /// OAuth credentials, if configured
    pub credentials: Option<Credentials>,
}

impl Config {
    /// Create a configuration for a region, with an optional base URL override.
    pub fn new(
        region: Region,
        base_url: Option<String>,
        credentials: Option<Credentials>,
    ) -> Self {
        let base_url = base_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| region.base_url().to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Build the configuration from the environment.
    ///
    /// Command-line values win; otherwise `AIKIDO_REGION` and
    /// `AIKIDO_API_BASE_URL` are read, which may have come from a `.env` file.
    pub fn from_env(region: Option<Region>, base_url: Option<String>) -> Result<Self> {
        let region = match region {
            Some(region) => region,
            None => Region::from_setting(std::env::var(REGION_ENV).ok().as_deref())?,
        };
        let base_url = base_url.or_else(|| std::env::var(BASE_URL_ENV).ok());

        let config = Self::new(region, base_url, Credentials::from_env());
        debug!("Using Aikido API at {} (region {})", config.base_url, region);
        Ok(config)
    }

    /// Validate that credentials are present
    pub fn require_credentials(&self) -> Result<&Credentials> {
        self.credentials
            .as_ref()
            .ok_or_else(|| ConfigError::MissingCredentials.into())
    }
}

/// Load a `.env` file into the process environment.
///
/// An explicit path must exist. Without one, `.env` in the working directory is
/// loaded when present. Variables already set in the environment are kept.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(ConfigError::from)?;
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(err) if err.not_found() => Ok(None),
            Err(err) => Err(ConfigError::from(err).into()),
        },
    }
}
