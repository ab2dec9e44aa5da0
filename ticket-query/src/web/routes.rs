//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::warn;

use crate::domain::TravelDate;
use crate::query::TicketError;
use crate::stations::StationError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations/search", get(search_stations))
        .route("/trains", get(query_trains))
        .route("/trains/details", get(query_train_details))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search stations by name prefix or code.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationSearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let stations = state
        .tickets
        .query()
        .stations()
        .search(&req.q, limit)
        .into_iter()
        .map(|m| StationSearchResult {
            name: m.name,
            code: m.code,
        })
        .collect();

    Json(StationSearchResponse { stations })
}

fn parse_date(raw: &str) -> Result<TravelDate, AppError> {
    raw.parse().map_err(|e| AppError::BadRequest {
        message: format!("Invalid date {raw:?}: {e}"),
    })
}

/// Candidate trains for a route and date.
async fn query_trains(
    State(state): State<AppState>,
    Query(req): Query<TrainQueryRequest>,
) -> Result<Json<TrainQueryResponse>, AppError> {
    let date = parse_date(&req.date)?;
    let trains = state
        .tickets
        .filtered_trains(date, &req.from, &req.to)
        .await?;

    Ok(Json(TrainQueryResponse {
        trains: trains.to_vec(),
    }))
}

/// Every on-sale trip for a route and date, bypassing the cache.
async fn query_train_details(
    State(state): State<AppState>,
    Query(req): Query<TrainQueryRequest>,
) -> Result<Json<TrainDetailsResponse>, AppError> {
    let date = parse_date(&req.date)?;
    let report = state.tickets.query().trips(date, &req.from, &req.to).await?;

    Ok(Json(TrainDetailsResponse {
        skipped_unavailable: report.skipped_unavailable,
        skipped_not_on_sale: report.skipped_not_on_sale,
        malformed: report.malformed,
        trips: report.into_trips(),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
}

impl From<TicketError> for AppError {
    fn from(e: TicketError) -> Self {
        match e {
            TicketError::Station(StationError::UnknownStation { .. }) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        warn!(status = status.as_u16(), %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
