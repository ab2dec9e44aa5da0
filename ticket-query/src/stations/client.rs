//! Station-name script client.

use super::error::StationError;

/// Default URL of the station-name script.
const DEFAULT_URL: &str = "https://kyfw.12306.cn/otn/resources/js/framework/station_name.js";

/// Configuration for the station table client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// URL of the station-name script
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Accept certificates that do not chain to a trusted root
    pub accept_invalid_certs: bool,
}

impl StationClientConfig {
    /// Create a config pointing at the production station table.
    pub fn new() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout_secs: 30,
            accept_invalid_certs: true,
        }
    }

    /// Set a custom URL (for testing).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Require a valid certificate chain.
    pub fn with_strict_tls(mut self) -> Self {
        self.accept_invalid_certs = false;
        self
    }
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the station-name script.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    url: String,
}

impl StationClient {
    /// Create a new station table client.
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Fetch the raw script body.
    pub async fn fetch_raw(&self) -> Result<String, StationError> {
        tracing::debug!(url = %self.url, "Fetching station table");

        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}
