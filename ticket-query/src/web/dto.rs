//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{StationCode, TripRecord};

/// Query parameters for a ticket search.
#[derive(Debug, Deserialize)]
pub struct TrainQueryRequest {
    /// Travel date, `YYYY-MM-DD`
    pub date: String,

    /// Origin station name
    pub from: String,

    /// Destination station name
    pub to: String,
}

/// Candidate trains for a query.
#[derive(Debug, Serialize)]
pub struct TrainQueryResponse {
    pub trains: Vec<String>,
}

/// Every on-sale trip for a query, unfiltered.
#[derive(Debug, Serialize)]
pub struct TrainDetailsResponse {
    pub trips: Vec<TripRecord>,
    pub skipped_unavailable: usize,
    pub skipped_not_on_sale: usize,
    pub malformed: usize,
}

/// Request to search stations.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Name prefix or telegraph code
    pub q: String,

    /// Maximum number of results (default 10, max 50)
    pub limit: Option<usize>,
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationSearchResult {
    pub name: String,
    pub code: StationCode,
}

/// Station search results.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationSearchResult>,
}

/// Error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
