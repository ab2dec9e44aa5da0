//! Ticket query endpoint client.
//!
//! This module provides an HTTP client for the booking site's ticket query
//! endpoints.
//!
//! Key characteristics of the upstream:
//! - The query endpoint family is route-dependent. A probe against the
//!   default path either succeeds (use it) or redirects with a `c_url`
//!   naming the path to use instead.
//! - Results are a list of `|`-delimited strings, decoded in
//!   [`crate::domain::RawTripFields`].
//! - The service presents a certificate chain that common trust stores
//!   reject, so TLS verification is relaxed by default.

mod client;
mod error;
mod types;

pub use client::{DEFAULT_QUERY_PATH, LeftTicketClient, LeftTicketConfig, TrainSource};
pub use error::QueryError;
pub use types::{LeftTicketData, LeftTicketResponse, RedirectBody};
