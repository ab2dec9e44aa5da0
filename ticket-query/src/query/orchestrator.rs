//! End-to-end ticket query: names in, candidate train names out.

use std::sync::Arc;

use tracing::info;

use crate::domain::TravelDate;
use crate::stations::{StationDirectory, StationError};
use crate::upstream::{QueryError, TrainSource};

use super::config::FilterConfig;
use super::filter::filter_trips;
use super::parse::{ParseReport, parse_trips};

/// Error from a ticket query.
#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    /// A station name could not be resolved
    #[error(transparent)]
    Station(#[from] StationError),

    /// Endpoint resolution or the full query failed
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Runs ticket queries for a loaded station directory.
///
/// Each query resolves the route, probes for the query endpoint, fetches
/// the listing, parses it and filters it, strictly in that order. Nothing
/// is retried; the first failure is returned.
#[derive(Debug, Clone)]
pub struct TicketQuery<S> {
    stations: Arc<StationDirectory>,
    source: S,
    filter: FilterConfig,
}

impl<S: TrainSource> TicketQuery<S> {
    /// Create a query runner with the default filter.
    pub fn new(stations: Arc<StationDirectory>, source: S) -> Self {
        Self {
            stations,
            source,
            filter: FilterConfig::default(),
        }
    }

    /// Use a custom filter.
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn stations(&self) -> &StationDirectory {
        &self.stations
    }

    pub fn filter_config(&self) -> &FilterConfig {
        &self.filter
    }

    /// Fetch and parse every on-sale trip for a route, unfiltered.
    pub async fn trips(
        &self,
        date: TravelDate,
        from: &str,
        to: &str,
    ) -> Result<ParseReport, TicketError> {
        let route = self.stations.route(from, to)?;
        let endpoint = self.source.resolve_endpoint(&route, date).await?;
        let response = self.source.fetch_trips(&endpoint, &route, date).await?;
        Ok(parse_trips(&response.data.result))
    }

    /// Train names worth trying to book, in listing order.
    pub async fn filtered_trains(
        &self,
        date: TravelDate,
        from: &str,
        to: &str,
    ) -> Result<Vec<String>, TicketError> {
        let report = self.trips(date, from, to).await?;
        let trains = filter_trips(report.trips(), &self.filter);

        info!(
            %date,
            from,
            to,
            on_sale = report.trips.len(),
            candidates = trains.len(),
            "Ticket query complete"
        );

        Ok(trains)
    }
}
