//! Station code and route types.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid 3-letter station telegraph code.
///
/// Telegraph codes are always 3 uppercase ASCII letters (e.g. `GZQ` for
/// Guangzhou). This type guarantees that any `StationCode` value is valid
/// by construction.
///
/// # Examples
///
/// ```
/// use ticket_query::domain::StationCode;
///
/// let gzq = StationCode::parse("GZQ").unwrap();
/// assert_eq!(gzq.as_str(), "GZQ");
///
/// // Lowercase is rejected
/// assert!(StationCode::parse("gzq").is_err());
///
/// // Wrong length is rejected
/// assert!(StationCode::parse("GZ").is_err());
/// assert!(StationCode::parse("GZQQ").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationCode([u8; 3]);

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidStationCode {
                reason: "must be exactly 3 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidStationCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(StationCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StationCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A named station with its telegraph code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    /// Human-readable name, as typed by the user (e.g. "广州").
    pub name: String,
    /// Telegraph code used in query URLs.
    pub code: StationCode,
}

impl Station {
    pub fn new(name: impl Into<String>, code: StationCode) -> Self {
        Self {
            name: name.into(),
            code,
        }
    }
}

/// An ordered pair of stations: where the trip starts and where it ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub from: Station,
    pub to: Station,
}

impl Route {
    pub fn new(from: Station, to: Station) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) -> {}({})",
            self.from.name, self.from.code, self.to.name, self.to.code
        )
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in "[A-Z]{3}") {
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Wrong-length strings are always rejected
        #[test]
        fn wrong_length_rejected(s in "[A-Z]{0,2}|[A-Z]{4,10}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }
    }
}
