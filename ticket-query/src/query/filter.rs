//! Candidate selection over parsed trips.

use tracing::trace;

use crate::domain::TripRecord;

use super::config::FilterConfig;

/// Whether any of the configured seat classes can be bought.
pub fn has_wanted_seat(trip: &TripRecord, config: &FilterConfig) -> bool {
    config
        .seat_classes
        .iter()
        .any(|class| trip.seats.get(*class).is_purchasable())
}

/// Whether the trip departs inside the window on its own departure date.
///
/// The window is anchored to the trip's departure date, not the query date,
/// so a trip is judged purely on its departure time of day.
pub fn departs_in_window(trip: &TripRecord, config: &FilterConfig) -> bool {
    config.in_window(trip.depart_time)
}

/// Train names of trips passing both the seat and the time-window test.
///
/// Order follows the input; nothing is re-sorted.
pub fn filter_trips<'a, I>(trips: I, config: &FilterConfig) -> Vec<String>
where
    I: IntoIterator<Item = &'a TripRecord>,
{
    trips
        .into_iter()
        .filter(|trip| {
            if !has_wanted_seat(trip, config) {
                trace!(train = %trip.train_name, "No wanted seat class available");
                return false;
            }
            if !departs_in_window(trip, config) {
                trace!(train = %trip.train_name, depart = %trip.depart_time, "Departs outside window");
                return false;
            }
            true
        })
        .map(|trip| trip.train_name.clone())
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{RawRecordBuilder, RawTripFields, SeatClass};
    use proptest::prelude::*;

    proptest! {
        /// A trip with seats passes exactly when 08:00 <= departure <= 18:00
        #[test]
        fn window_matches_time_of_day(h in 0u32..24, m in 0u32..60) {
            let time = format!("{:02}:{:02}", h, m);
            let line = RawRecordBuilder::new("K1")
                .seat(SeatClass::SecondClass, "1")
                .depart("20190109", &time)
                .build();
            let raw = RawTripFields::decode(&line).unwrap();
            let trip = TripRecord::from_raw(&raw, 0).unwrap();

            let minutes = h * 60 + m;
            let expected = (8 * 60..=18 * 60).contains(&minutes);
            prop_assert_eq!(filter_trips([&trip], &FilterConfig::default()).len() == 1, expected);
        }
    }
}
