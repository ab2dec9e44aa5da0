//! Ticket query HTTP client.
//!
//! Provides async methods for discovering the query endpoint of a route and
//! running the full ticket query against it.

use std::future::Future;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::redirect::Policy;
use tracing::debug;

use crate::domain::{Route, TravelDate};

use super::error::{QueryError, truncate_body};
use super::types::{LeftTicketResponse, RedirectBody};

/// Default base URL of the booking site.
const DEFAULT_BASE_URL: &str = "https://kyfw.12306.cn/otn/";

/// Query path probed first, and used as-is when the probe succeeds.
pub const DEFAULT_QUERY_PATH: &str = "leftTicket/queryA";

/// The upstream rejects requests without a browser-like user agent.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/59.0.3071.115 Safari/537.36";

/// Passenger type sent with every query.
const PURPOSE_CODES: &str = "ADULT";

/// Configuration for the ticket query client.
#[derive(Debug, Clone)]
pub struct LeftTicketConfig {
    /// Base URL the query paths are appended to (defaults to production)
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Accept certificates that do not chain to a trusted root
    pub accept_invalid_certs: bool,
}

impl LeftTicketConfig {
    /// Create a config pointing at the production booking site.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            accept_invalid_certs: true,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
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

impl Default for LeftTicketConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Where trip listings come from.
///
/// This abstraction allows the orchestrator to be tested with mock data.
pub trait TrainSource {
    /// Find the query path to use for a route.
    fn resolve_endpoint(
        &self,
        route: &Route,
        date: TravelDate,
    ) -> impl Future<Output = Result<String, QueryError>> + Send;

    /// Run the full query against a resolved path.
    fn fetch_trips(
        &self,
        endpoint: &str,
        route: &Route,
        date: TravelDate,
    ) -> impl Future<Output = Result<LeftTicketResponse, QueryError>> + Send;
}

/// Ticket query API client.
#[derive(Debug, Clone)]
pub struct LeftTicketClient {
    /// Redirects disabled, so the probe can observe a 302.
    probe_http: reqwest::Client,
    http: reqwest::Client,
    base_url: String,
}

impl LeftTicketClient {
    /// Create a new client with the given configuration.
    pub fn new(config: LeftTicketConfig) -> Result<Self, QueryError> {
        let mut headers = HeaderMap::new();
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| QueryError::Upstream {
                status: 0,
                message: "Invalid User-Agent format".to_string(),
            })?;
        headers.insert(USER_AGENT, user_agent);

        let timeout = std::time::Duration::from_secs(config.timeout_secs);

        let probe_http = reqwest::Client::builder()
            .default_headers(headers.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            probe_http,
            http,
            base_url: config.base_url,
        })
    }

    /// Absolute URL of a query path.
    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Query-string parameters, in the order the upstream expects them.
fn query_params(route: &Route, date: TravelDate) -> [(&'static str, String); 4] {
    [
        ("leftTicketDTO.train_date", date.to_string()),
        ("leftTicketDTO.from_station", route.from.code.as_str().to_string()),
        ("leftTicketDTO.to_station", route.to.code.as_str().to_string()),
        ("purpose_codes", PURPOSE_CODES.to_string()),
    ]
}

/// Decide the query path from a probe response.
///
/// A 302 names the path in its `c_url` body field; a 200 means the default
/// path serves this route. Any other status means the upstream is in a
/// state we do not understand.
pub(crate) fn endpoint_from_probe(status: StatusCode, body: &str) -> Result<String, QueryError> {
    match status {
        StatusCode::FOUND => {
            let redirect: RedirectBody =
                serde_json::from_str(body).map_err(|e| QueryError::Json {
                    message: e.to_string(),
                    body: Some(truncate_body(body)),
                })?;
            Ok(redirect.c_url)
        }
        StatusCode::OK => Ok(DEFAULT_QUERY_PATH.to_string()),
        other => Err(QueryError::EndpointResolution {
            status: other.as_u16(),
        }),
    }
}

impl TrainSource for LeftTicketClient {
    async fn resolve_endpoint(
        &self,
        route: &Route,
        date: TravelDate,
    ) -> Result<String, QueryError> {
        let response = self
            .probe_http
            .get(self.url(DEFAULT_QUERY_PATH))
            .query(&query_params(route, date))
            .send()
            .await?;

        let status = response.status();
        let body = if status == StatusCode::FOUND {
            response.text().await?
        } else {
            String::new()
        };

        let endpoint = endpoint_from_probe(status, &body)?;
        debug!(
            %route,
            %date,
            status = status.as_u16(),
            endpoint = %endpoint,
            "Resolved query endpoint"
        );
        Ok(endpoint)
    }

    async fn fetch_trips(
        &self,
        endpoint: &str,
        route: &Route,
        date: TravelDate,
    ) -> Result<LeftTicketResponse, QueryError> {
        let response = self
            .http
            .get(self.url(endpoint))
            .query(&query_params(route, date))
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::Upstream {
                status: status.as_u16(),
                message: truncate_body(&body),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| QueryError::Json {
            message: e.to_string(),
            body: Some(truncate_body(&body)),
        })
    }
}
