//! Blocking HTTP transport with fixed-interval retries
//!
//! Every portal request goes through [`Transport::fetch`]: up to
//! `max_attempts` tries (5 by default), sleeping a fixed backoff between
//! attempts. No exponential backoff, no jitter, no partial-content resume.
//!
//! The HTTP client itself sits behind the [`HttpGet`] trait so drivers can
//! be exercised with canned responses.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::PortalConfig;
use crate::error::EtlError;

/// Default number of attempts per URL
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default pause between attempts
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

/// Single GET request returning the raw response body
///
/// Any `Err` counts as one failed attempt for the retry loop.
pub trait HttpGet {
    fn get(&self, url: &str) -> Result<Vec<u8>, String>;
}

impl<T: HttpGet + ?Sized> HttpGet for &T {
    fn get(&self, url: &str) -> Result<Vec<u8>, String> {
        (**self).get(url)
    }
}

/// `reqwest` blocking client
///
/// Non-success HTTP statuses are reported as failures.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new(timeout: Duration) -> Result<Self, EtlError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EtlError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpGet for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| format!("request failed: {}", e))?;

        let response = response
            .error_for_status()
            .map_err(|e| format!("bad status: {}", e))?;

        let bytes = response
            .bytes()
            .map_err(|e| format!("failed to read body: {}", e))?;
        Ok(bytes.to_vec())
    }
}

/// Retrying wrapper around an [`HttpGet`] client
#[derive(Debug, Clone)]
pub struct Transport<C> {
    client: C,
    max_attempts: u32,
    backoff: Duration,
}

impl<C: HttpGet> Transport<C> {
    /// Transport with the default policy (5 attempts, 1 second apart)
    pub fn new(client: C) -> Self {
        Self {
            client,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Transport with the retry policy from configuration
    pub fn from_config(client: C, config: &PortalConfig) -> Self {
        Self::new(client).with_retry(config.max_attempts, config.backoff())
    }

    /// Override the retry policy
    ///
    /// `max_attempts` below 1 is treated as 1.
    pub fn with_retry(mut self, max_attempts: u32, backoff: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff = backoff;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Fetch a URL, retrying on any failure
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<u8>)` - Body of the first successful attempt
    /// * `Err(EtlError::FetchExhausted)` - Every attempt failed
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, EtlError> {
        let mut last_error = String::new();

        for attempt in 1..=self.max_attempts {
            match self.client.get(url) {
                Ok(body) => {
                    debug!(url, attempt, bytes = body.len(), "Fetched");
                    return Ok(body);
                }
                Err(e) => {
                    warn!(url, attempt, error = %e, "Fetch failed");
                    last_error = e;
                    if attempt < self.max_attempts {
                        thread::sleep(self.backoff);
                    }
                }
            }
        }

        Err(EtlError::FetchExhausted {
            url: url.to_string(),
            attempts: self.max_attempts,
            last_error,
        })
    }
}
