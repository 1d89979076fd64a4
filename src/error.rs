//! Error types for the Legalesign SDK.
//!
//! Every operation returns [`Result`], so callers can tell retryable failures
//! (throttling, documents still processing) apart from fatal ones
//! (rejected credentials, invalid signing requests) by matching on the
//! variant.

use thiserror::Error;

/// Result type for Legalesign operations.
pub type Result<T> = std::result::Result<T, LegalesignError>;

const REASON_NOT_FOUND: &str = "Request failed. This usually indicates a required property was \
    missing, the document with the ID requested does not exist, or you tried to use a template \
    for a number of signers not matching the sent number.";
const REASON_METHOD_NOT_ALLOWED: &str = "Method not allowed.";
const REASON_SERVER_ERROR: &str = "Legalesign server error. (Perhaps the request was malformed.)";

/// Errors that can occur when using the Legalesign SDK.
#[derive(Error, Debug)]
pub enum LegalesignError {
    /// The client is not usable as configured (missing credentials, bad method).
    ///
    /// Raised before any network I/O takes place.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The API rejected the user id / secret pair (HTTP 401).
    #[error("Failed to authenticate to the Legalesign API: the userId/secret pair was not valid.")]
    Authentication,

    /// The account exceeded its quota and is being throttled (HTTP 429).
    #[error("The Legalesign API account has exceeded its quota and is throttled.")]
    Throttled,

    /// The resource exists but is still processing (HTTP 202).
    #[error("The requested resource is processing, and is not currently available. Try again later.")]
    Retrieving,

    /// Any other non-success reply from the API.
    #[error("Legalesign API replied: {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Human-readable reason, or the raw body when no reason is known.
        message: String,
    },

    /// A signing request is missing a required field.
    #[error("Invalid signing request: {field} {reason}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A payload could not be encoded, or a response could not be interpreted.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl LegalesignError {
    /// Returns true if repeating the same call later may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            LegalesignError::Throttled | LegalesignError::Retrieving => true,
            LegalesignError::Http(_) => true,
            LegalesignError::Api { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }

    /// Returns true if the API rejected the credentials (HTTP 401).
    pub fn is_auth_error(&self) -> bool {
        matches!(self, LegalesignError::Authentication)
    }

    /// Returns the HTTP status code if available.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LegalesignError::Api { status_code, .. } => Some(*status_code),
            LegalesignError::Authentication => Some(401),
            LegalesignError::Throttled => Some(429),
            LegalesignError::Retrieving => Some(202),
            _ => None,
        }
    }
}

/// Maps an HTTP status code (and the response body) to an error.
///
/// Returns `None` for 200, 201 and 204. Every other status, including other
/// 2xx and 3xx codes, is an error.
pub fn error_for_status(status: u16, body: &str) -> Option<LegalesignError> {
    match status {
        200 | 201 | 204 => None,
        202 => Some(LegalesignError::Retrieving),
        401 => Some(LegalesignError::Authentication),
        429 => Some(LegalesignError::Throttled),
        _ => {
            let message = match reason_for_status(status) {
                Some(reason) => reason.to_string(),
                None if !body.trim().is_empty() => body.trim().to_string(),
                None => status.to_string(),
            };
            Some(LegalesignError::Api {
                status_code: status,
                message,
            })
        }
    }
}

fn reason_for_status(status: u16) -> Option<&'static str> {
    match status {
        404 => Some(REASON_NOT_FOUND),
        405 => Some(REASON_METHOD_NOT_ALLOWED),
        400 | 500 => Some(REASON_SERVER_ERROR),
        _ => None,
    }
}
