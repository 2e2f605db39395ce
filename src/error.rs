use std::path::PathBuf;

use log::warn;
use serde::Deserialize;
use thiserror::Error;

/// Message carried by [`VeryfiError::UnknownError`].
pub const UNKNOWN_ERROR_MESSAGE: &str =
    "Unknown error. Please contact customer support at support@veryfi.com.";

/// Status codes treated as success.
pub const SUCCESS_STATUSES: [u16; 4] = [200, 201, 202, 204];

/// Error type for Veryfi API operations.
///
/// Service failures (classified from the HTTP status):
///
/// - `UnauthorizedAccessToken` — HTTP 401
/// - `BadRequest` — HTTP 404 (the service's mapping, not the usual 400)
/// - `UnexpectedHttpMethod` — HTTP 405
/// - `AccessLimitReached` — HTTP 409
/// - `InternalError` — HTTP 500
/// - `ServiceError` — any other non-success status
/// - `UnknownError` — the failure body was not a valid error envelope
///
/// Local failures: `LocalIo`, `RequestFailed`, `InvalidHeader`,
/// `InvalidConfig`, `Decode`.
#[derive(Debug, Error)]
pub enum VeryfiError {
    #[error("Bad request ({status}): {message}")]
    BadRequest {
        status: u16,
        message: String,
        code: Option<i64>,
    },

    #[error("Unauthorized access token ({status}): {message}")]
    UnauthorizedAccessToken {
        status: u16,
        message: String,
        code: Option<i64>,
    },

    #[error("Unexpected HTTP method ({status}): {message}")]
    UnexpectedHttpMethod {
        status: u16,
        message: String,
        code: Option<i64>,
    },

    #[error("Access limit reached ({status}): {message}")]
    AccessLimitReached {
        status: u16,
        message: String,
        code: Option<i64>,
    },

    #[error("Internal error ({status}): {message}")]
    InternalError {
        status: u16,
        message: String,
        code: Option<i64>,
    },

    #[error("API error {status}: {message}")]
    ServiceError {
        status: u16,
        message: String,
        code: Option<i64>,
    },

    #[error("{message} (HTTP {status})")]
    UnknownError { status: u16, message: String },

    #[error("Cannot read {}: {source}", .path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Deserialization error: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, VeryfiError>;

impl VeryfiError {
    /// HTTP status of a service failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            VeryfiError::BadRequest { status, .. }
            | VeryfiError::UnauthorizedAccessToken { status, .. }
            | VeryfiError::UnexpectedHttpMethod { status, .. }
            | VeryfiError::AccessLimitReached { status, .. }
            | VeryfiError::InternalError { status, .. }
            | VeryfiError::ServiceError { status, .. }
            | VeryfiError::UnknownError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Service-specific error code, when the envelope carried one.
    pub fn service_code(&self) -> Option<i64> {
        match self {
            VeryfiError::BadRequest { code, .. }
            | VeryfiError::UnauthorizedAccessToken { code, .. }
            | VeryfiError::UnexpectedHttpMethod { code, .. }
            | VeryfiError::AccessLimitReached { code, .. }
            | VeryfiError::InternalError { code, .. }
            | VeryfiError::ServiceError { code, .. } => *code,
            _ => None,
        }
    }

    /// True for errors reported by the service rather than raised locally.
    pub fn is_service_error(&self) -> bool {
        self.status_code().is_some()
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, VeryfiError::UnauthorizedAccessToken { .. })
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// The service's JSON error body: `{"status": "fail", "error": "...", "code": 123}`.
///
/// Only `error` is required. A `code` that is neither an integer nor a
/// numeric string is dropped rather than failing the parse.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    pub error: String,
    #[serde(default, deserialize_with = "lenient_code")]
    pub code: Option<i64>,
}

fn lenient_code<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

type Constructor = fn(u16, String, Option<i64>) -> VeryfiError;

/// Constructor for the variant a failing status code maps to.
fn constructor_for(status: u16) -> Constructor {
    match status {
        401 => |status, message, code| VeryfiError::UnauthorizedAccessToken {
            status,
            message,
            code,
        },
        404 => |status, message, code| VeryfiError::BadRequest {
            status,
            message,
            code,
        },
        405 => |status, message, code| VeryfiError::UnexpectedHttpMethod {
            status,
            message,
            code,
        },
        409 => |status, message, code| VeryfiError::AccessLimitReached {
            status,
            message,
            code,
        },
        500 => |status, message, code| VeryfiError::InternalError {
            status,
            message,
            code,
        },
        _ => |status, message, code| VeryfiError::ServiceError {
            status,
            message,
            code,
        },
    }
}

/// Map a failing status and its parsed envelope to a typed error.
pub fn classify(status: u16, envelope: ErrorEnvelope) -> VeryfiError {
    constructor_for(status)(status, envelope.error, envelope.code)
}

/// Classify a failing response from its raw body.
///
/// A body that is not a valid error envelope yields
/// [`VeryfiError::UnknownError`]; parse failures never escape.
pub fn classify_response(status: u16, body: &[u8]) -> VeryfiError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => classify(status, envelope),
        Err(e) => {
            warn!("unparseable error body for HTTP {status}: {e}");
            VeryfiError::UnknownError {
                status,
                message: UNKNOWN_ERROR_MESSAGE.into(),
            }
        }
    }
}

pub fn is_success(status: u16) -> bool {
    SUCCESS_STATUSES.contains(&status)
}
