//! Named-field decoding of pipe-delimited trip records.
//!
//! Each entry in the query result is one `|`-delimited string. The fields
//! are positional and undocumented upstream, so every offset this crate
//! reads lives here and nowhere else.

use super::seat::SeatClass;
use super::time::TimeError;

/// Field separator inside one raw record.
pub const FIELD_SEPARATOR: char = '|';

/// Positional offsets into a raw record.
mod offset {
    /// Opaque booking token; empty when the service is temporarily unavailable.
    pub const SECRET: usize = 0;
    /// Free-text sale status (e.g. the sale start time).
    pub const SALE_NOTE: usize = 1;
    pub const TRAIN_NAME: usize = 3;
    pub const DEPART_TIME: usize = 8;
    pub const ARRIVE_TIME: usize = 9;
    pub const SPEND_TIME: usize = 10;
    /// `Y` when tickets can be bought now.
    pub const CAN_BUY: usize = 11;
    pub const DEPART_DATE: usize = 13;

    pub const SOFT_SLEEPER: usize = 23;
    pub const NO_SEAT: usize = 26;
    pub const HARD_SLEEPER: usize = 28;
    pub const HARD_SEAT: usize = 29;
    pub const SECOND_CLASS: usize = 30;
    pub const FIRST_CLASS: usize = 31;
    pub const BUSINESS: usize = 32;
    pub const DELUXE_SLEEPER: usize = 33;

    /// Highest offset read; a record must have more fields than this.
    pub const MAX: usize = DELUXE_SLEEPER;
}

fn seat_offset(class: SeatClass) -> usize {
    match class {
        SeatClass::NoSeat => offset::NO_SEAT,
        SeatClass::HardSeat => offset::HARD_SEAT,
        SeatClass::HardSleeper => offset::HARD_SLEEPER,
        SeatClass::SoftSleeper => offset::SOFT_SLEEPER,
        SeatClass::Business => offset::BUSINESS,
        SeatClass::FirstClass => offset::FIRST_CLASS,
        SeatClass::SecondClass => offset::SECOND_CLASS,
        SeatClass::DeluxeSleeper => offset::DELUXE_SLEEPER,
    }
}

/// Error returned when a raw record cannot be turned into a trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedRecord {
    /// The record is too short to hold every named field.
    #[error("malformed trip record: {found} fields, at least {required} required")]
    TooFewFields { found: usize, required: usize },

    /// A named field is present but does not parse.
    #[error("malformed trip record: bad {field}: {source}")]
    BadField {
        field: &'static str,
        #[source]
        source: TimeError,
    },
}

/// A raw record split into fields and bounds-checked.
///
/// Accessors return the untouched string of each named field. Interpreting
/// them is left to [`TripRecord`](super::TripRecord).
#[derive(Debug, Clone)]
pub struct RawTripFields<'a> {
    fields: Vec<&'a str>,
}

impl<'a> RawTripFields<'a> {
    /// Split a raw record and check that every named field is present.
    pub fn decode(line: &'a str) -> Result<Self, MalformedRecord> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let required = offset::MAX + 1;
        if fields.len() < required {
            return Err(MalformedRecord::TooFewFields {
                found: fields.len(),
                required,
            });
        }
        Ok(Self { fields })
    }

    fn field(&self, idx: usize) -> &'a str {
        // Bounds were checked in `decode`.
        self.fields[idx]
    }

    pub fn secret(&self) -> &'a str {
        self.field(offset::SECRET)
    }

    pub fn sale_note(&self) -> &'a str {
        self.field(offset::SALE_NOTE)
    }

    pub fn train_name(&self) -> &'a str {
        self.field(offset::TRAIN_NAME)
    }

    pub fn depart_time(&self) -> &'a str {
        self.field(offset::DEPART_TIME)
    }

    pub fn arrive_time(&self) -> &'a str {
        self.field(offset::ARRIVE_TIME)
    }

    pub fn spend_time(&self) -> &'a str {
        self.field(offset::SPEND_TIME)
    }

    pub fn can_buy(&self) -> &'a str {
        self.field(offset::CAN_BUY)
    }

    pub fn depart_date(&self) -> &'a str {
        self.field(offset::DEPART_DATE)
    }

    /// Raw availability field for a seat class.
    pub fn seat(&self, class: SeatClass) -> &'a str {
        self.field(seat_offset(class))
    }
}

/// Test helper: build a raw record with the given named fields set.
#[cfg(test)]
pub(crate) struct RawRecordBuilder {
    fields: Vec<String>,
}

#[cfg(test)]
impl RawRecordBuilder {
    pub fn new(train_name: &str) -> Self {
        let mut fields = vec![String::new(); offset::MAX + 3];
        fields[offset::SECRET] = "secretToken".to_string();
        fields[offset::SALE_NOTE] = "预订".to_string();
        fields[offset::TRAIN_NAME] = train_name.to_string();
        fields[offset::DEPART_TIME] = "10:00".to_string();
        fields[offset::ARRIVE_TIME] = "14:30".to_string();
        fields[offset::SPEND_TIME] = "04:30".to_string();
        fields[offset::CAN_BUY] = "Y".to_string();
        fields[offset::DEPART_DATE] = "20190109".to_string();
        Self { fields }
    }

    pub fn secret(mut self, s: &str) -> Self {
        self.fields[offset::SECRET] = s.to_string();
        self
    }

    pub fn sale_note(mut self, s: &str) -> Self {
        self.fields[offset::SALE_NOTE] = s.to_string();
        self
    }

    pub fn can_buy(mut self, s: &str) -> Self {
        self.fields[offset::CAN_BUY] = s.to_string();
        self
    }

    pub fn depart(mut self, date: &str, time: &str) -> Self {
        self.fields[offset::DEPART_DATE] = date.to_string();
        self.fields[offset::DEPART_TIME] = time.to_string();
        self
    }

    pub fn arrive(mut self, time: &str) -> Self {
        self.fields[offset::ARRIVE_TIME] = time.to_string();
        self
    }

    pub fn seat(mut self, class: SeatClass, value: &str) -> Self {
        self.fields[seat_offset(class)] = value.to_string();
        self
    }

    pub fn build(&self) -> String {
        self.fields.join("|")
    }
}
