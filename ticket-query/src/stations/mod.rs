//! Station name directory.
//!
//! Provides station name → telegraph code mapping, fetched once from the
//! booking site's station-name script and held for the life of the caller.

mod client;
mod directory;
mod error;

pub use client::{StationClient, StationClientConfig};
pub use directory::{StationDirectory, StationMatch};
pub use error::StationError;
