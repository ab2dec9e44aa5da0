//! Mock booking site for tests.
//!
//! Serves a station table and the ticket query endpoints from a local axum
//! server, recording every request path so tests can check which endpoint
//! a query actually hit.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

/// Station table served by default.
pub(crate) const STATION_TABLE: &str =
    "var station_names ='@gzq|广州|GZQ|guangzhou|gz|0@mmq|茂名|MHQ|maoming|mm|1';";

/// How the mock answers the probe on the default query path.
#[derive(Debug, Clone)]
pub(crate) enum ProbeReply {
    /// 200 with the configured results.
    Ok,
    /// 302 with a `c_url` body naming another path under `leftTicket/`.
    Redirect(String),
    /// Any status, empty body.
    Status(u16),
}

#[derive(Debug)]
struct MockState {
    station_table: String,
    station_status: StatusCode,
    probe: ProbeReply,
    results: Vec<String>,
    listing_body: Option<String>,
    requests: Mutex<Vec<String>>,
}

/// Builder for [`MockUpstream`].
#[derive(Debug)]
pub(crate) struct MockUpstreamBuilder {
    station_table: String,
    station_status: StatusCode,
    probe: ProbeReply,
    results: Vec<String>,
    listing_body: Option<String>,
}

impl MockUpstreamBuilder {
    pub fn station_table(mut self, table: impl Into<String>) -> Self {
        self.station_table = table.into();
        self
    }

    /// Serve the station table with this status instead of 200.
    pub fn station_status(mut self, status: u16) -> Self {
        self.station_status = StatusCode::from_u16(status).unwrap();
        self
    }

    pub fn probe(mut self, probe: ProbeReply) -> Self {
        self.probe = probe;
        self
    }

    pub fn results(mut self, results: Vec<String>) -> Self {
        self.results = results;
        self
    }

    /// Answer listing requests with this raw body (status 200) instead of
    /// the JSON results.
    pub fn listing_body(mut self, body: impl Into<String>) -> Self {
        self.listing_body = Some(body.into());
        self
    }

    /// Bind to an ephemeral local port and start serving.
    pub async fn start(self) -> MockUpstream {
        let state = Arc::new(MockState {
            station_table: self.station_table,
            station_status: self.station_status,
            probe: self.probe,
            results: self.results,
            listing_body: self.listing_body,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/otn/resources/js/framework/station_name.js", get(station_table))
            .route("/otn/leftTicket/:path", get(left_ticket))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockUpstream { addr, state }
    }
}

/// A running mock booking site.
pub(crate) struct MockUpstream {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockUpstream {
    pub fn builder() -> MockUpstreamBuilder {
        MockUpstreamBuilder {
            station_table: STATION_TABLE.to_string(),
            station_status: StatusCode::OK,
            probe: ProbeReply::Ok,
            results: Vec::new(),
            listing_body: None,
        }
    }

    /// Base URL to configure the query client with.
    pub fn base_url(&self) -> String {
        format!("http://{}/otn/", self.addr)
    }

    /// URL of the station table.
    pub fn station_url(&self) -> String {
        format!("http://{}/otn/resources/js/framework/station_name.js", self.addr)
    }

    /// Every query request seen so far, as `path?query`.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn station_table(State(state): State<Arc<MockState>>) -> Response {
    (state.station_status, state.station_table.clone()).into_response()
}

async fn left_ticket(
    State(state): State<Arc<MockState>>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    state.requests.lock().unwrap().push(format!(
        "/otn/leftTicket/{}?{}",
        path,
        query.unwrap_or_default()
    ));

    let results = || match &state.listing_body {
        Some(body) => body.clone().into_response(),
        None => Json(json!({ "data": { "result": state.results } })).into_response(),
    };

    match (&state.probe, path.as_str()) {
        (ProbeReply::Ok, "queryA") => results(),
        (ProbeReply::Redirect(c_url), "queryA") => {
            (StatusCode::FOUND, Json(json!({ "c_url": c_url }))).into_response()
        }
        (ProbeReply::Redirect(c_url), other) if c_url.ends_with(other) => results(),
        (ProbeReply::Status(code), "queryA") => StatusCode::from_u16(*code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}
