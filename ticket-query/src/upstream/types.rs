//! Query endpoint response DTOs.
//!
//! These types map directly to the JSON the booking site returns. Only the
//! fields this crate reads are modelled.

use serde::Deserialize;

/// Body of a full ticket query.
#[derive(Debug, Clone, Deserialize)]
pub struct LeftTicketResponse {
    pub data: LeftTicketData,
}

/// The `data` object of a ticket query.
#[derive(Debug, Clone, Deserialize)]
pub struct LeftTicketData {
    /// One `|`-delimited string per train service.
    #[serde(default)]
    pub result: Vec<String>,
}

/// Body of a probe redirect, naming the endpoint to use instead.
#[derive(Debug, Clone, Deserialize)]
pub struct RedirectBody {
    pub c_url: String,
}
