//! Filter configuration for candidate selection.

use chrono::NaiveTime;

use crate::domain::SeatClass;

/// Configuration parameters for filtering trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// A trip qualifies if any of these classes can be bought.
    pub seat_classes: Vec<SeatClass>,

    /// Earliest acceptable departure on the departure date (inclusive).
    pub window_start: NaiveTime,

    /// Latest acceptable departure on the departure date (inclusive).
    pub window_end: NaiveTime,
}

impl FilterConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        seat_classes: Vec<SeatClass>,
        window_start: NaiveTime,
        window_end: NaiveTime,
    ) -> Self {
        Self {
            seat_classes,
            window_start,
            window_end,
        }
    }

    /// Whether a departure time falls inside the window.
    pub fn in_window(&self, time: NaiveTime) -> bool {
        self.window_start <= time && time <= self.window_end
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            seat_classes: vec![SeatClass::HardSeat, SeatClass::SecondClass],
            window_start: NaiveTime::MIN + chrono::Duration::hours(8),
            window_end: NaiveTime::MIN + chrono::Duration::hours(18),
        }
    }
}
