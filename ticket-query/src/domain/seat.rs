//! Seat classes and per-class availability.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker the upstream uses for "none left in this class".
pub const SOLD_OUT_MARKER: &str = "无";

/// Marker the upstream uses for "plenty left" when it declines to give a count.
pub const PLENTY_MARKER: &str = "有";

/// The eight seat classes tracked per train service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatClass {
    NoSeat,
    HardSeat,
    HardSleeper,
    SoftSleeper,
    Business,
    FirstClass,
    SecondClass,
    DeluxeSleeper,
}

impl SeatClass {
    /// All classes, in the order they appear on the booking page.
    pub const ALL: [SeatClass; 8] = [
        SeatClass::Business,
        SeatClass::FirstClass,
        SeatClass::SecondClass,
        SeatClass::SoftSleeper,
        SeatClass::DeluxeSleeper,
        SeatClass::HardSleeper,
        SeatClass::HardSeat,
        SeatClass::NoSeat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeatClass::NoSeat => "no_seat",
            SeatClass::HardSeat => "hard_seat",
            SeatClass::HardSleeper => "hard_sleeper",
            SeatClass::SoftSleeper => "soft_sleeper",
            SeatClass::Business => "business",
            SeatClass::FirstClass => "first_class",
            SeatClass::SecondClass => "second_class",
            SeatClass::DeluxeSleeper => "deluxe_sleeper",
        }
    }
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remaining-ticket indicator for one seat class on one train.
///
/// # Examples
///
/// ```
/// use ticket_query::domain::SeatAvailability;
///
/// assert_eq!(SeatAvailability::parse("50"), SeatAvailability::Remaining(50));
/// assert_eq!(SeatAvailability::parse("无"), SeatAvailability::SoldOut);
/// assert_eq!(SeatAvailability::parse(""), SeatAvailability::NotOffered);
///
/// assert!(SeatAvailability::parse("有").is_purchasable());
/// assert!(!SeatAvailability::parse("无").is_purchasable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SeatAvailability {
    /// A numeric count of remaining tickets.
    Remaining(u32),
    /// Tickets remain but the upstream does not say how many.
    Plenty,
    /// The class exists on this train but nothing is left.
    SoldOut,
    /// The class is not offered on this train.
    NotOffered,
    /// Any other marker (e.g. `*` for "not yet released").
    Other(String),
}

impl SeatAvailability {
    /// Decode a raw availability field.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" => SeatAvailability::NotOffered,
            SOLD_OUT_MARKER => SeatAvailability::SoldOut,
            PLENTY_MARKER => SeatAvailability::Plenty,
            other => match other.parse::<u32>() {
                Ok(n) => SeatAvailability::Remaining(n),
                Err(_) => SeatAvailability::Other(other.to_string()),
            },
        }
    }

    /// Whether the field is non-empty and not the sold-out marker.
    pub fn is_purchasable(&self) -> bool {
        !matches!(
            self,
            SeatAvailability::SoldOut | SeatAvailability::NotOffered
        )
    }
}

impl fmt::Display for SeatAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatAvailability::Remaining(n) => write!(f, "{n}"),
            SeatAvailability::Plenty => f.write_str(PLENTY_MARKER),
            SeatAvailability::SoldOut => f.write_str(SOLD_OUT_MARKER),
            SeatAvailability::NotOffered => Ok(()),
            SeatAvailability::Other(s) => f.write_str(s),
        }
    }
}
