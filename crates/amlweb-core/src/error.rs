//! Error types for amlweb-core
//!
//! Every way a dashboard load can go wrong collapses into [`FetchError`].
//! The variants keep the reason apart so the view can show it, and
//! [`ErrorCode`] gives API clients something stable to match on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Connection or transport failure
    NetworkError,
    /// Request exceeded the configured timeout
    Timeout,
    /// Upstream answered with a non-success status
    HttpStatus,
    /// Response body is not JSON
    InvalidBody,
    /// JSON does not have the expected record shape
    DecodeError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NetworkError => write!(f, "NETWORK_ERROR"),
            ErrorCode::Timeout => write!(f, "TIMEOUT"),
            ErrorCode::HttpStatus => write!(f, "HTTP_STATUS"),
            ErrorCode::InvalidBody => write!(f, "INVALID_BODY"),
            ErrorCode::DecodeError => write!(f, "DECODE_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }
}

/// A transaction payload that does not match the positional record layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected a JSON array of records, found {found}")]
    NotAList { found: &'static str },

    #[error("record {record}: expected an array of fields, found {found}")]
    NotARecord { record: usize, found: &'static str },

    #[error("record {record}: expected at least {expected} fields, found {found}")]
    TooFewFields {
        record: usize,
        expected: usize,
        found: usize,
    },

    #[error("record {record}, field {position} ({field}): {reason}")]
    InvalidField {
        record: usize,
        position: usize,
        field: &'static str,
        reason: String,
    },
}

impl DecodeError {
    /// Re-attribute a single-record error to its position in the payload
    pub(crate) fn at_record(self, index: usize) -> Self {
        match self {
            DecodeError::NotARecord { found, .. } => DecodeError::NotARecord { record: index, found },
            DecodeError::TooFewFields { expected, found, .. } => DecodeError::TooFewFields {
                record: index,
                expected,
                found,
            },
            DecodeError::InvalidField {
                position,
                field,
                reason,
                ..
            } => DecodeError::InvalidField {
                record: index,
                position,
                field,
                reason,
            },
            other => other,
        }
    }
}

/// Failure to fetch or parse the transaction list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("response body is not valid JSON: {message}")]
    InvalidBody { message: String },

    #[error("malformed transaction data: {0}")]
    Decode(#[from] DecodeError),
}

impl FetchError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            FetchError::Network { .. } => ErrorCode::NetworkError,
            FetchError::Timeout { .. } => ErrorCode::Timeout,
            FetchError::Status { .. } => ErrorCode::HttpStatus,
            FetchError::InvalidBody { .. } => ErrorCode::InvalidBody,
            FetchError::Decode(_) => ErrorCode::DecodeError,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());
        match self {
            FetchError::Network { .. } => {
                details.with_suggestion("Check that the transaction service is running and source.url is correct.")
            }
            FetchError::Timeout { .. } => details.with_suggestion("Increase source.timeout_secs or check the service load."),
            FetchError::Status { status, .. } if *status >= 500 => {
                details.with_suggestion("The transaction service reported an internal error; check its logs.")
            }
            FetchError::Decode(_) => details.with_suggestion(
                "Each record must be [id, payment currency, received currency, sender bank, receiver bank, payment type, amount, ...].",
            ),
            _ => details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_serialize_screaming() {
        let json = serde_json::to_string(&ErrorCode::HttpStatus).unwrap();
        assert_eq!(json, "\"HTTP_STATUS\"");
        assert_eq!(ErrorCode::DecodeError.to_string(), "DECODE_ERROR");
    }

    #[test]
    fn test_decode_error_reattributed() {
        let err = DecodeError::TooFewFields {
            record: 0,
            expected: 7,
            found: 3,
        }
        .at_record(4);
        assert_eq!(err.to_string(), "record 4: expected at least 7 fields, found 3");
    }

    #[test]
    fn test_server_error_details() {
        let err = FetchError::Status {
            url: "http://127.0.0.1:5000/transactions".to_string(),
            status: 500,
        };
        let details = err.to_details();
        assert_eq!(details.code, ErrorCode::HttpStatus);
        assert_eq!(details.message, "http://127.0.0.1:5000/transactions responded with HTTP 500");
        assert_eq!(details.suggestions.len(), 1);
    }

    #[test]
    fn test_decode_wraps_into_fetch_error() {
        let err: FetchError = DecodeError::NotAList { found: "object" }.into();
        assert_eq!(err.code(), ErrorCode::DecodeError);
        assert_eq!(
            err.to_string(),
            "malformed transaction data: expected a JSON array of records, found object"
        );
    }
}
