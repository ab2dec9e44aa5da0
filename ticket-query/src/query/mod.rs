//! Ticket availability query and candidate selection.
//!
//! Given a travel date and two station names, this module resolves the
//! route, fetches the upstream listing, parses it into trip records and
//! narrows them to the trains worth trying to book: those with a wanted
//! seat class left that depart inside the configured time window.

mod config;
mod filter;
mod orchestrator;
mod parse;

#[cfg(test)]
mod orchestrator_tests;

pub use config::FilterConfig;
pub use filter::{departs_in_window, filter_trips, has_wanted_seat};
pub use orchestrator::{TicketError, TicketQuery};
pub use parse::{ParseReport, parse_trips};
