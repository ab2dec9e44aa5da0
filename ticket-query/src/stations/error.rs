//! Station directory error types.

/// Errors that can occur when loading or querying the station directory.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Station table resource returned an error status
    #[error("station table error {status}: {message}")]
    Api { status: u16, message: String },

    /// Station table body is not in the expected format
    #[error("malformed station table: {message}")]
    Malformed { message: String },

    /// Station name is not in the directory
    #[error("unknown station: {name}")]
    UnknownStation { name: String },
}

impl StationError {
    /// Whether this error means the directory could not be loaded at all.
    pub fn is_load_failure(&self) -> bool {
        !matches!(self, StationError::UnknownStation { .. })
    }
}
