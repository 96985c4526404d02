//! Portal configuration
//!
//! Base URLs, the transport retry policy and the location of the region
//! reference table. Every field has a default, so an empty JSON object
//! (or no file at all) gives a working configuration.
//!
//! # Example
//! ```rust
//! use energo_reports::PortalConfig;
//!
//! let config = PortalConfig::from_json_str(r#"{ "max_attempts": 3 }"#).unwrap();
//! assert_eq!(config.max_attempts, 3);
//! assert_eq!(config.ats_base_url, "https://www.atsenergo.ru");
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::EtlError;

/// Configuration shared by both portal drivers
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// ATS (trading system administrator) portal root
    ///
    /// Example: `https://www.atsenergo.ru`
    pub ats_base_url: String,

    /// SO UPS (system operator) portal root
    ///
    /// Example: `http://br.so-ups.ru`
    pub so_base_url: String,

    /// Attempts per URL before giving up
    pub max_attempts: u32,

    /// Pause between attempts, in seconds
    pub backoff_secs: u64,

    /// HTTP client timeout, in seconds
    pub timeout_secs: u64,

    /// Semicolon-delimited region reference (`region_pk;region_name`)
    pub regions_path: PathBuf,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            ats_base_url: "https://www.atsenergo.ru".to_string(),
            so_base_url: "http://br.so-ups.ru".to_string(),
            max_attempts: 5,
            backoff_secs: 1,
            timeout_secs: 60,
            regions_path: PathBuf::from("regions.csv"),
        }
    }
}

impl PortalConfig {
    /// Parse configuration from JSON text and validate it
    pub fn from_json_str(json: &str) -> Result<Self, EtlError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EtlError::Config(format!("Invalid configuration JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, EtlError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            EtlError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    /// Check that both base URLs are absolute and at least one attempt is allowed
    pub fn validate(&self) -> Result<(), EtlError> {
        for base in [&self.ats_base_url, &self.so_base_url] {
            Url::parse(base)
                .map_err(|e| EtlError::Config(format!("Invalid base URL '{}': {}", base, e)))?;
        }
        if self.max_attempts == 0 {
            return Err(EtlError::Config(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
