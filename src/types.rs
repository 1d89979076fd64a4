//! Type definitions for the Legalesign SDK.
//!
//! Status enums, the [`Signer`] value type and small helpers for the
//! identifiers the API embeds in resource URLs.

use crate::error::{LegalesignError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Lifecycle state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Sent to the signers (code 10).
    Sent,
    /// All fields filled in (code 20).
    FieldsComplete,
    /// Signed by everyone (code 30).
    Signed,
    /// Cancelled (code 40).
    Cancelled,
    /// Any code the SDK does not know about.
    Unknown,
}

impl DocumentStatus {
    /// Converts an API status code.
    pub fn from_code(code: i64) -> Self {
        match code {
            10 => Self::Sent,
            20 => Self::FieldsComplete,
            30 => Self::Signed,
            40 => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    /// The semantic name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::FieldsComplete => "fields_complete",
            Self::Signed => "signed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of a single signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignerStatus {
    /// Scheduled to receive the document (code 5).
    Scheduled,
    /// Email sent (code 10).
    Sent,
    /// Email opened (code 15).
    Opened,
    /// Signing page visited (code 20).
    Visited,
    /// Fields completed (code 30).
    FieldsCompleted,
    /// Signed (code 40).
    Signed,
    /// Final document downloaded (code 50).
    Downloaded,
    /// Any code the SDK does not know about, and signers not yet submitted.
    #[default]
    Unknown,
}

impl SignerStatus {
    /// Converts an API status code.
    pub fn from_code(code: i64) -> Self {
        match code {
            5 => Self::Scheduled,
            10 => Self::Sent,
            15 => Self::Opened,
            20 => Self::Visited,
            30 => Self::FieldsCompleted,
            40 => Self::Signed,
            50 => Self::Downloaded,
            _ => Self::Unknown,
        }
    }

    /// The semantic name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Sent => "sent",
            Self::Opened => "opened",
            Self::Visited => "visited",
            Self::FieldsCompleted => "fields_completed",
            Self::Signed => "signed",
            Self::Downloaded => "downloaded",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SignerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A party required to sign a document.
///
/// Signers read back from a [`Document`](crate::documents::Document) carry an
/// `id` and a status; signers built locally for a
/// [`SigningRequest`](crate::signing_request::SigningRequest) do not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Signer {
    /// Signer id, taken from the signer's resource URL.
    pub id: Option<String>,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Organisation or person the signer signs on behalf of.
    pub behalf_of: Option<String>,
    /// Message included in the signing email.
    pub message: Option<String>,
    /// Additional message included in the signing email.
    pub extra_message: Option<String>,
    /// Current progress.
    pub status: SignerStatus,
    /// Position in the signing sequence.
    pub order: u32,
}

impl Signer {
    /// Create a signer with the three required contact fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_behalf_of(mut self, behalf_of: impl Into<String>) -> Self {
        self.behalf_of = Some(behalf_of.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_extra_message(mut self, extra_message: impl Into<String>) -> Self {
        self.extra_message = Some(extra_message.into());
        self
    }

    /// Set the order. Ignored when the signer is submitted through a
    /// signing request, which numbers signers by insertion order.
    #[must_use]
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Full name, first then last.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Strips an id down to ASCII alphanumerics, hyphens and spaces before it is
/// embedded in an endpoint path.
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == ' ')
        .collect()
}

/// Extracts the id from an API resource URL such as `/api/v1/document/<id>/`.
///
/// The id is the second-to-last `/`-separated segment.
pub fn id_from_resource_url(url: &str) -> Option<String> {
    let parts: Vec<&str> = url.trim().split('/').collect();
    if parts.len() < 2 {
        return None;
    }
    let id = parts[parts.len() - 2];
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Parses an API timestamp. Values without an offset are taken as UTC.
pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| LegalesignError::Decode(format!("invalid timestamp {value:?}: {e}")))
}
