//! Parsed train services for one queried route and date.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::record::{MalformedRecord, RawTripFields};
use super::seat::{SeatAvailability, SeatClass};
use super::time::{TimeError, parse_compact_date, parse_hhmm};

/// Value of the can-buy field when ticket sales are open.
const ON_SALE_FLAG: &str = "Y";

/// Whether a train's tickets can be bought right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "note", rename_all = "snake_case")]
pub enum SaleStatus {
    /// Tickets are on sale.
    OnSale,
    /// Sales have not opened yet; carries the upstream's free-text note
    /// (usually the sale start time).
    NotYetOnSale(String),
    /// Sold out, suspended, or otherwise unavailable.
    Unavailable,
}

impl SaleStatus {
    /// Derive the sale status from the can-buy flag and booking token.
    ///
    /// The can-buy flag wins: a `Y` means on sale regardless of the token.
    /// Otherwise an empty token marks a service that is temporarily
    /// unavailable, and anything else has simply not opened yet.
    pub fn classify(raw: &RawTripFields<'_>) -> Self {
        if raw.can_buy() == ON_SALE_FLAG {
            SaleStatus::OnSale
        } else if raw.secret().is_empty() {
            SaleStatus::Unavailable
        } else {
            SaleStatus::NotYetOnSale(raw.sale_note().to_string())
        }
    }

    pub fn is_on_sale(&self) -> bool {
        matches!(self, SaleStatus::OnSale)
    }
}

/// Availability of every seat class on one train.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatMap {
    pub no_seat: SeatAvailability,
    pub hard_seat: SeatAvailability,
    pub hard_sleeper: SeatAvailability,
    pub soft_sleeper: SeatAvailability,
    pub business: SeatAvailability,
    pub first_class: SeatAvailability,
    pub second_class: SeatAvailability,
    pub deluxe_sleeper: SeatAvailability,
}

impl SeatMap {
    fn from_raw(raw: &RawTripFields<'_>) -> Self {
        let seat = |class| SeatAvailability::parse(raw.seat(class));
        Self {
            no_seat: seat(SeatClass::NoSeat),
            hard_seat: seat(SeatClass::HardSeat),
            hard_sleeper: seat(SeatClass::HardSleeper),
            soft_sleeper: seat(SeatClass::SoftSleeper),
            business: seat(SeatClass::Business),
            first_class: seat(SeatClass::FirstClass),
            second_class: seat(SeatClass::SecondClass),
            deluxe_sleeper: seat(SeatClass::DeluxeSleeper),
        }
    }

    /// Look up one class.
    pub fn get(&self, class: SeatClass) -> &SeatAvailability {
        match class {
            SeatClass::NoSeat => &self.no_seat,
            SeatClass::HardSeat => &self.hard_seat,
            SeatClass::HardSleeper => &self.hard_sleeper,
            SeatClass::SoftSleeper => &self.soft_sleeper,
            SeatClass::Business => &self.business,
            SeatClass::FirstClass => &self.first_class,
            SeatClass::SecondClass => &self.second_class,
            SeatClass::DeluxeSleeper => &self.deluxe_sleeper,
        }
    }
}

/// One train service that is on sale for the queried route and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripRecord {
    /// Train number, e.g. "K123". Unique within one query result.
    pub train_name: String,
    pub depart_date: NaiveDate,
    pub depart_time: NaiveTime,
    /// Arrival time as the upstream renders it; not interpreted.
    pub arrive_time: String,
    /// Journey duration as the upstream renders it (e.g. "04:30").
    pub spend_time: String,
    pub seats: SeatMap,
    pub sale_status: SaleStatus,
    /// Position of the raw entry in the payload, skipped entries included.
    pub index: usize,
}

impl TripRecord {
    /// Build a trip from decoded raw fields.
    pub fn from_raw(raw: &RawTripFields<'_>, index: usize) -> Result<Self, MalformedRecord> {
        let bad = |field: &'static str| {
            move |source: TimeError| MalformedRecord::BadField { field, source }
        };

        Ok(Self {
            train_name: raw.train_name().to_string(),
            depart_date: parse_compact_date(raw.depart_date()).map_err(bad("depart_date"))?,
            depart_time: parse_hhmm(raw.depart_time()).map_err(bad("depart_time"))?,
            arrive_time: raw.arrive_time().to_string(),
            spend_time: raw.spend_time().to_string(),
            seats: SeatMap::from_raw(raw),
            sale_status: SaleStatus::classify(raw),
            index,
        })
    }

    /// Departure as a single timestamp.
    pub fn departs_at(&self) -> NaiveDateTime {
        self.depart_date.and_time(self.depart_time)
    }
}
