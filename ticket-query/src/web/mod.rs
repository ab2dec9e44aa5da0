//! Web layer for the ticket query engine.
//!
//! Provides HTTP endpoints for station lookup and ticket queries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
