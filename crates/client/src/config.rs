use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Error;

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_ENV: &str = "FOLIO_BACKEND_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_SECS_ENV: &str = "FOLIO_TIMEOUT_SECS";

/// Connection settings for the contact endpoint, read once at startup.
///
/// ```toml
/// backend_url = "https://api.example.com"
/// timeout_secs = 15
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend; `/api/contact` is appended to it.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:8001".to_owned()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        toml::from_str(source).map_err(|e| Error::Configuration(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    /// Build from [`BACKEND_URL_ENV`] and [`TIMEOUT_SECS_ENV`], falling back
    /// to defaults for unset variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = Self::default();
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.backend_url = url.trim().to_owned();
        }
        if let Some(raw) = lookup(TIMEOUT_SECS_ENV) {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                Error::Configuration(format!(
                    "{TIMEOUT_SECS_ENV} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
