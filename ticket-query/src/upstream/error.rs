//! Query endpoint error types.

use std::fmt;

/// Errors from the ticket query endpoints.
#[derive(Debug)]
pub enum QueryError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// The probe returned a status that is neither a redirect nor success
    EndpointResolution { status: u16 },

    /// The full query returned an error status
    Upstream { status: u16, message: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Http(e) => write!(f, "HTTP error: {e}"),
            QueryError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            QueryError::EndpointResolution { status } => {
                write!(f, "query endpoint probe returned unexpected status {status}")
            }
            QueryError::Upstream { status, message } => {
                write!(f, "upstream error {status}: {message}")
            }
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        QueryError::Http(err)
    }
}

/// Keep error bodies short enough to log.
pub(crate) fn truncate_body(body: &str) -> String {
    body.chars().take(500).collect()
}
