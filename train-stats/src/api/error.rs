//! Train API client error types.

use std::fmt;

use super::convert::ConversionError;

/// Errors from fetching and normalizing train API data.
#[derive(Debug)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Status { status: u16, message: String },

    /// The requested entity does not exist
    NotFound,

    /// The body decoded but a required field was missing or invalid
    Conversion(ConversionError),

    /// Reading a fixture file failed
    Io(std::io::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "HTTP error: {e}"),
            ApiError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            ApiError::Status { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            ApiError::NotFound => write!(f, "not found"),
            ApiError::Conversion(e) => write!(f, "unusable response: {e}"),
            ApiError::Io(e) => write!(f, "fixture read failed: {e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http(e) => Some(e),
            ApiError::Conversion(e) => Some(e),
            ApiError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err)
    }
}

impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        ApiError::Conversion(err)
    }
}

impl ApiError {
    /// Decode failure for a response body, keeping the start of the body
    /// for diagnosis.
    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        ApiError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(ApiError::NotFound.to_string(), "not found");

        let err = ApiError::Status {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = ApiError::Conversion(ConversionError::MissingField("leg.id"));
        assert_eq!(
            err.to_string(),
            "unusable response: missing required field: leg.id"
        );
    }

    #[test]
    fn json_error_truncates_body() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let body = "x".repeat(2000);
        match ApiError::json(bad, &body) {
            ApiError::Json { body: Some(kept), .. } => assert_eq!(kept.len(), 500),
            other => panic!("unexpected {other:?}"),
        }
    }
}
