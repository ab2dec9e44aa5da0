//! Domain types for the ticket query engine.
//!
//! This module contains the core domain model types that represent
//! validated booking data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod record;
mod seat;
mod station;
mod time;
mod trip;

#[cfg(test)]
pub(crate) use record::RawRecordBuilder;
pub use record::{FIELD_SEPARATOR, MalformedRecord, RawTripFields};
pub use seat::{PLENTY_MARKER, SOLD_OUT_MARKER, SeatAvailability, SeatClass};
pub use station::{InvalidStationCode, Route, Station, StationCode};
pub use time::{TimeError, TravelDate, parse_compact_date, parse_hhmm};
pub use trip::{SaleStatus, SeatMap, TripRecord};
