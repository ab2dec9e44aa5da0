//! Station name lookup.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::domain::{Route, Station, StationCode};

use super::client::StationClient;
use super::error::StationError;

/// Separator between station records in the table body.
const RECORD_SEPARATOR: char = '@';

/// Separator between fields of one station record.
const FIELD_SEPARATOR: char = '|';

/// Delimiter around the table literal in the script body.
const QUOTE: char = '\'';

/// A station returned by a directory search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationMatch {
    pub name: String,
    pub code: StationCode,
}

/// Station name → telegraph code lookup.
///
/// Built once by the caller with [`StationDirectory::load`] and read-only
/// afterwards. There is no refresh: rebuilding means loading a new
/// directory.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    codes: IndexMap<String, StationCode>,
}

impl StationDirectory {
    /// Fetch and parse the station table.
    ///
    /// Fails if the table cannot be fetched or contains no stations.
    pub async fn load(client: &StationClient) -> Result<Self, StationError> {
        let body = client.fetch_raw().await?;
        let directory = Self::parse(&body)?;

        if directory.is_empty() {
            return Err(StationError::Malformed {
                message: "station table contains no stations".to_string(),
            });
        }

        info!(stations = directory.len(), "Loaded station directory");
        Ok(directory)
    }

    /// Parse the body of the station-name script.
    ///
    /// The body holds one quoted literal of `@`-separated records, each a
    /// `|`-separated list whose second field is the display name and whose
    /// third field is the telegraph code, e.g.
    /// `var station_names ='@gzq|广州|GZQ|guangzhou|gz|0';`.
    /// Records that are too short or carry an invalid code are skipped.
    pub fn parse(body: &str) -> Result<Self, StationError> {
        let literal = quoted_literal(body).ok_or_else(|| StationError::Malformed {
            message: "no quoted station list found".to_string(),
        })?;

        let mut codes = IndexMap::new();
        for record in literal.split(RECORD_SEPARATOR) {
            if record.is_empty() {
                continue;
            }

            let mut fields = record.split(FIELD_SEPARATOR).skip(1);
            let (Some(name), Some(code)) = (fields.next(), fields.next()) else {
                debug!(record, "Skipping short station record");
                continue;
            };

            match StationCode::parse(code) {
                Ok(code) => {
                    codes.insert(name.to_string(), code);
                }
                Err(e) => debug!(record, error = %e, "Skipping station with invalid code"),
            }
        }

        Ok(Self { codes })
    }

    /// Build a directory from known name/code pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, StationCode)>,
        S: Into<String>,
    {
        Self {
            codes: entries
                .into_iter()
                .map(|(name, code)| (name.into(), code))
                .collect(),
        }
    }

    /// Look up a station by its display name.
    pub fn lookup(&self, name: &str) -> Result<Station, StationError> {
        self.codes
            .get(name)
            .map(|code| Station::new(name, *code))
            .ok_or_else(|| StationError::UnknownStation {
                name: name.to_string(),
            })
    }

    /// Resolve both ends of a route.
    pub fn route(&self, from: &str, to: &str) -> Result<Route, StationError> {
        Ok(Route::new(self.lookup(from)?, self.lookup(to)?))
    }

    /// Whether a station name is known.
    pub fn contains(&self, name: &str) -> bool {
        self.codes.contains_key(name)
    }

    /// Find stations whose name starts with `query`, or whose code equals it
    /// (case-insensitively), in table order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<StationMatch> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let upper = query.to_uppercase();

        self.codes
            .iter()
            .filter(|(name, code)| name.starts_with(query) || code.as_str() == upper)
            .take(limit)
            .map(|(name, code)| StationMatch {
                name: name.clone(),
                code: *code,
            })
            .collect()
    }

    /// Number of stations in the directory.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// The text between the first and the last quote, if both exist.
fn quoted_literal(body: &str) -> Option<&str> {
    let start = body.find(QUOTE)? + QUOTE.len_utf8();
    let end = body.rfind(QUOTE)?;
    (end >= start).then(|| &body[start..end])
}
