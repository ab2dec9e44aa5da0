//! Turning a query payload into trip records.

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::domain::{RawTripFields, SaleStatus, TripRecord};

/// Outcome of parsing one query payload.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    /// On-sale trips keyed by train name, in first-seen order.
    pub trips: IndexMap<String, TripRecord>,

    /// Entries skipped because the service is temporarily unavailable.
    pub skipped_unavailable: usize,

    /// Entries skipped because sales have not opened yet.
    pub skipped_not_on_sale: usize,

    /// Entries skipped because they could not be decoded.
    pub malformed: usize,
}

impl ParseReport {
    /// Trips in first-seen order.
    pub fn trips(&self) -> impl Iterator<Item = &TripRecord> {
        self.trips.values()
    }

    pub fn into_trips(self) -> Vec<TripRecord> {
        self.trips.into_values().collect()
    }
}

/// Parse the raw result entries of a ticket query.
///
/// Only entries whose can-buy flag is `Y` become trips. Entries that are
/// unavailable, not yet on sale, or malformed are skipped and counted, never
/// raised. If two on-sale entries share a train name the later one replaces
/// the earlier, keeping the earlier one's position.
pub fn parse_trips<S: AsRef<str>>(entries: &[S]) -> ParseReport {
    let mut report = ParseReport::default();

    for (index, entry) in entries.iter().enumerate() {
        let raw = match RawTripFields::decode(entry.as_ref()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed trip record");
                report.malformed += 1;
                continue;
            }
        };

        match SaleStatus::classify(&raw) {
            SaleStatus::OnSale => {}
            SaleStatus::Unavailable => {
                trace!(train = raw.train_name(), "Tickets temporarily unavailable");
                report.skipped_unavailable += 1;
                continue;
            }
            SaleStatus::NotYetOnSale(note) => {
                trace!(train = raw.train_name(), note = %note, "Tickets not on sale yet");
                report.skipped_not_on_sale += 1;
                continue;
            }
        }

        match TripRecord::from_raw(&raw, index) {
            Ok(trip) => {
                if let Some(previous) = report.trips.insert(trip.train_name.clone(), trip) {
                    debug!(train = %previous.train_name, "Duplicate train name, keeping later entry");
                }
            }
            Err(e) => {
                warn!(index, train = raw.train_name(), error = %e, "Skipping malformed trip record");
                report.malformed += 1;
            }
        }
    }

    debug!(
        entries = entries.len(),
        trips = report.trips.len(),
        unavailable = report.skipped_unavailable,
        not_on_sale = report.skipped_not_on_sale,
        malformed = report.malformed,
        "Parsed ticket query payload"
    );

    report
}
