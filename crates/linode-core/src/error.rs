//! Error types for Linode operations.
//!
//! This module provides the error hierarchy shared by every Linode client crate, including
//! decoding of the provider's structured error bodies and the completion poller outcomes.

use serde::Deserialize;
use thiserror::Error;

use crate::types::{EntityId, EntityType, Event, EventAction, EventStatus};

/// Main error type for Linode operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Client or resource configuration error (e.g. parent/non-parent endpoint misuse)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Request options failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Invalid endpoint or URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Invalid resource identifier
    #[error("Invalid ID: {0}")]
    InvalidId(String),

    /// Timestamp did not match the provider layout
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// HTTP request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Linode API could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    /// Structured error returned by the Linode API
    #[error("[{status:03}] {message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Provider supplied reasons, joined
        message: String,
    },

    /// The awaited event did not reach a terminal status in time
    #[error(
        "Did not find '{expected}' status of {entity_type} {entity_id} action '{action}' within {timeout_secs} seconds"
    )]
    PollTimeout {
        /// Terminal status that was expected
        expected: EventStatus,
        /// Entity type being watched
        entity_type: EntityType,
        /// Entity being watched
        entity_id: EntityId,
        /// Action being watched
        action: EventAction,
        /// Configured timeout in seconds
        timeout_secs: u64,
    },

    /// The awaited event reached the `failed` status
    #[error("{entity_type} {entity_id} action {action} failed")]
    PollFailed {
        /// Entity type being watched
        entity_type: EntityType,
        /// Entity being watched
        entity_id: EntityId,
        /// Action being watched
        action: EventAction,
        /// The failed event as reported by the provider
        event: Box<Event>,
    },

    /// Waiting was cancelled by the caller
    #[error("Cancelled while waiting for {entity_type} {entity_id} action {action}")]
    Cancelled {
        /// Entity type being watched
        entity_type: EntityType,
        /// Entity being watched
        entity_id: EntityId,
        /// Action being watched
        action: EventAction,
    },
}

/// Specialized result type for Linode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by the Linode API on non-success responses.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    /// Individual error reasons
    #[serde(default)]
    pub errors: Vec<ApiErrorReason>,
}

/// A single reason within an [`ApiErrorBody`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiErrorReason {
    /// Human readable reason
    pub reason: String,
    /// Request field the reason refers to, if any
    #[serde(default)]
    pub field: Option<String>,
}

impl ApiErrorReason {
    fn describe(&self) -> String {
        match &self.field {
            Some(field) => format!("{field}: {}", self.reason),
            None => self.reason.clone(),
        }
    }
}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::InvalidId(_) => "INVALID_ID",
            Self::InvalidTimestamp(_) => "INVALID_TIMESTAMP",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::DecodeError(_) => "DECODE_ERROR",
            Self::Api { .. } => "API_ERROR",
            Self::PollTimeout { .. } => "POLL_TIMEOUT",
            Self::PollFailed { .. } => "POLL_FAILED",
            Self::Cancelled { .. } => "CANCELLED",
        }
    }

    /// Build an [`Error::Api`] from a non-success response.
    ///
    /// The provider's `{"errors": [{"reason", "field"}]}` body is preferred; any other body is
    /// carried verbatim.
    #[must_use]
    pub fn from_api_response(status: u16, body: &str) -> Self {
        let reasons = serde_json::from_str::<ApiErrorBody>(body)
            .map(|parsed| parsed.errors)
            .unwrap_or_default();

        let message = if reasons.is_empty() {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|code| code.canonical_reason())
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                trimmed.to_string()
            }
        } else {
            reasons
                .iter()
                .map(ApiErrorReason::describe)
                .collect::<Vec<_>>()
                .join("; ")
        };

        Self::Api { status, message }
    }

    /// Returns true if the provider reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Returns true for transport level failures (network, timeout, connect).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpError(_) | Self::Timeout(_) | Self::ServiceUnavailable(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else if err.is_decode() {
            Self::DecodeError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::ConfigError("test".to_string()).error_code(),
            "CONFIG_ERROR"
        );
        assert_eq!(
            Error::DecodeError("test".to_string()).error_code(),
            "DECODE_ERROR"
        );
        assert_eq!(
            Error::InvalidTimestamp("test".to_string()).error_code(),
            "INVALID_TIMESTAMP"
        );
        assert_eq!(
            Error::Api {
                status: 400,
                message: "bad".to_string()
            }
            .error_code(),
            "API_ERROR"
        );
        assert_eq!(
            Error::PollTimeout {
                expected: EventStatus::Finished,
                entity_type: EntityType::Linode,
                entity_id: EntityId::from(1_u64),
                action: EventAction::LinodeBoot,
                timeout_secs: 10,
            }
            .error_code(),
            "POLL_TIMEOUT"
        );
        assert_eq!(
            Error::Cancelled {
                entity_type: EntityType::Volume,
                entity_id: EntityId::from(7_u64),
                action: EventAction::VolumeAttach,
            }
            .error_code(),
            "CANCELLED"
        );
    }

    #[test]
    fn test_api_error_from_structured_body() {
        let body = r#"{"errors":[{"reason":"Not found"}]}"#;
        let err = Error::from_api_response(404, body);
        assert_eq!(
            err,
            Error::Api {
                status: 404,
                message: "Not found".to_string()
            }
        );
        assert_eq!(err.to_string(), "[404] Not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_api_error_joins_field_reasons() {
        let body = r#"{"errors":[{"reason":"label is required","field":"label"},{"reason":"bad region"}]}"#;
        let err = Error::from_api_response(400, body);
        assert_eq!(err.to_string(), "[400] label: label is required; bad region");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_api_error_unstructured_body() {
        let err = Error::from_api_response(502, "upstream exploded\n");
        assert_eq!(err.to_string(), "[502] upstream exploded");

        let err = Error::from_api_response(503, "");
        assert_eq!(err.to_string(), "[503] Service Unavailable");
    }

    #[test]
    fn test_poll_timeout_display() {
        let err = Error::PollTimeout {
            expected: EventStatus::Finished,
            entity_type: EntityType::Linode,
            entity_id: EntityId::from(123_u64),
            action: EventAction::LinodeCreate,
            timeout_secs: 240,
        };
        assert_eq!(
            err.to_string(),
            "Did not find 'finished' status of linode 123 action 'linode_create' within 240 seconds"
        );
    }

    #[test]
    fn test_is_transport() {
        assert!(Error::Timeout("t".to_string()).is_transport());
        assert!(Error::ServiceUnavailable("s".to_string()).is_transport());
        assert!(!Error::DecodeError("d".to_string()).is_transport());
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let linode_err: Error = err.into();
        assert!(matches!(linode_err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let linode_err: Error = err.into();
        assert!(matches!(linode_err, Error::DecodeError(_)));
    }

    #[test]
    fn test_error_partial_eq() {
        let err1 = Error::ConfigError("test".to_string());
        let err2 = Error::ConfigError("test".to_string());
        let err3 = Error::ConfigError("other".to_string());

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
